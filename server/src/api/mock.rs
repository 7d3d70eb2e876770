use std::sync::Mutex;

use async_trait::async_trait;
use shared::{Credential, QueryRequest, ServiceError};

use super::GraphqlTransport;

type Responder =
    Box<dyn Fn(&Credential, &QueryRequest, usize) -> Result<serde_json::Value, ServiceError> + Send + Sync>;

/// Transport answering with a scripted closure. The closure receives the
/// credential, the request and the zero based number of the call.
pub struct MockTransport {
    responder: Responder,
    calls: Mutex<Vec<(String, QueryRequest)>>,
}

impl MockTransport {
    pub fn new(
        responder: impl Fn(&Credential, &QueryRequest, usize) -> Result<serde_json::Value, ServiceError>
            + Send
            + Sync
            + 'static,
    ) -> Self {
        Self {
            responder: Box::new(responder),
            calls: Default::default(),
        }
    }

    /// Secrets of the credentials used so far, in call order.
    pub fn used_credentials(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(secret, _)| secret.clone())
            .collect()
    }

    pub fn requests(&self) -> Vec<QueryRequest> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(_, request)| request.clone())
            .collect()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl GraphqlTransport for MockTransport {
    async fn execute(
        &self,
        credential: &Credential,
        request: &QueryRequest,
    ) -> Result<serde_json::Value, ServiceError> {
        let call = {
            let mut calls = self.calls.lock().unwrap();
            calls.push((credential.secret().to_string(), request.clone()));
            calls.len() - 1
        };
        (self.responder)(credential, request, call)
    }
}

pub fn activity_json(created_at: &str, commits: u64, restricted: u64, reviews: u64) -> serde_json::Value {
    serde_json::json!({
        "user": {
            "createdAt": created_at,
            "contributionsCollection": {
                "totalCommitContributions": commits,
                "restrictedContributionsCount": restricted,
                "totalPullRequestReviewContributions": reviews
            },
            "organizations": { "totalCount": 3 },
            "followers": { "totalCount": 42 }
        }
    })
}
