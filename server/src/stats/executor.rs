use std::sync::Arc;

use serde::de::DeserializeOwned;
use shared::{CredentialPool, QueryRequest, ServiceError};
use tracing::{debug, instrument, warn};

use crate::{api::GraphqlTransport, consts::NO_CREDENTIALS_MESSAGE};

/// Runs a query with every credential of the pool in order until one succeeds.
#[derive(Clone)]
pub struct CredentialRotatingExecutor {
    pool: Arc<CredentialPool>,
    transport: Arc<dyn GraphqlTransport>,
}

impl CredentialRotatingExecutor {
    pub fn new(pool: Arc<CredentialPool>, transport: Arc<dyn GraphqlTransport>) -> Self {
        Self { pool, transport }
    }

    /// At most one transport call per credential. Only the last failure is
    /// reported, earlier ones are logged and dropped.
    #[instrument(skip_all, fields(variables = ?request.variables))]
    pub async fn execute<T: DeserializeOwned>(
        &self,
        request: &QueryRequest,
    ) -> Result<T, ServiceError> {
        let mut last_error = None;

        for (index, credential) in self.pool.iter().enumerate() {
            let result = self
                .transport
                .execute(credential, request)
                .await
                .and_then(|data| Ok(serde_json::from_value::<T>(data)?));

            match result {
                Ok(value) => {
                    debug!("Query succeeded with credential #{index}");
                    return Ok(value);
                }
                Err(error) => {
                    let has_next = index + 1 < self.pool.len();
                    warn!(
                        "Query failed with credential #{index} ({}), {}",
                        error,
                        if has_next {
                            "trying next credential"
                        } else {
                            "no credentials left"
                        }
                    );
                    last_error = Some(error);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| ServiceError::unknown(NO_CREDENTIALS_MESSAGE)))
    }
}
