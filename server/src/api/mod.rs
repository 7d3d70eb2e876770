use async_trait::async_trait;
use shared::{Credential, QueryRequest, ServiceError};

pub mod github;

#[cfg(test)]
pub(crate) mod mock;

/// Executes a single GraphQL request on behalf of a single credential.
///
/// Returns the `data` object of the response. Failures are already
/// classified, so callers can tell a rate limit from any other error.
#[async_trait]
pub trait GraphqlTransport: Send + Sync {
    async fn execute(
        &self,
        credential: &Credential,
        request: &QueryRequest,
    ) -> Result<serde_json::Value, ServiceError>;
}
