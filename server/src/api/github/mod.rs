use std::collections::HashMap;

use async_trait::async_trait;
use shared::{Credential, CredentialPool, QueryRequest, ServiceError};
use tracing::instrument;

use super::GraphqlTransport;

pub mod queries;
mod types;
pub use types::*;

/// GitHub GraphQL transport, holds one authorized octocrab instance per
/// credential of the pool.
#[derive(Clone)]
pub struct GithubClient {
    clients: HashMap<Credential, octocrab::Octocrab>,
}

impl GithubClient {
    pub fn new(pool: &CredentialPool) -> anyhow::Result<Self> {
        let clients = pool
            .iter()
            .map(|credential| {
                let octocrab = octocrab::Octocrab::builder()
                    .personal_token(credential.secret().to_string())
                    .build()?;
                Ok((credential.clone(), octocrab))
            })
            .collect::<anyhow::Result<_>>()?;

        Ok(Self { clients })
    }
}

#[async_trait]
impl GraphqlTransport for GithubClient {
    #[instrument(skip_all)]
    async fn execute(
        &self,
        credential: &Credential,
        request: &QueryRequest,
    ) -> Result<serde_json::Value, ServiceError> {
        let octocrab = self
            .clients
            .get(credential)
            .ok_or_else(|| ServiceError::unknown("Credential is not registered in the client"))?;

        let response: GraphqlResponse = octocrab
            .graphql(request)
            .await
            .map_err(classify_octocrab_error)?;

        response.into_data()
    }
}

fn classify_octocrab_error(error: octocrab::Error) -> ServiceError {
    match error {
        octocrab::Error::GitHub { source, .. } => {
            classify_status(source.status_code.as_u16(), &source.message)
        }
        octocrab::Error::Serde { source, .. } => {
            ServiceError::unknown(format!("Failed to decode GraphQL response: {source}"))
        }
        error => ServiceError::transport(error.to_string()),
    }
}
