use serde::Deserialize;
use shared::{ErrorKind, ServiceError};

/// Raw GitHub GraphQL response, errors may come together with partial data.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphqlResponse {
    pub data: Option<serde_json::Value>,
    #[serde(default)]
    pub errors: Vec<GraphqlError>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphqlError {
    pub message: String,
    #[serde(rename = "type")]
    pub error_type: Option<String>,
}

impl GraphqlError {
    pub fn kind(&self) -> ErrorKind {
        match self.error_type.as_deref() {
            Some("RATE_LIMITED") => ErrorKind::RateLimited,
            Some("NOT_FOUND") => ErrorKind::NotFound,
            _ => ErrorKind::Unknown,
        }
    }
}

impl GraphqlResponse {
    pub fn into_data(self) -> Result<serde_json::Value, ServiceError> {
        if !self.errors.is_empty() {
            // A rate limit anywhere in the batch decides the backoff policy
            let kind = self
                .errors
                .iter()
                .map(GraphqlError::kind)
                .find(|kind| *kind == ErrorKind::RateLimited)
                .unwrap_or_else(|| self.errors[0].kind());
            let message = self
                .errors
                .iter()
                .map(|e| e.message.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(ServiceError::new(message, kind));
        }

        self.data
            .ok_or_else(|| ServiceError::unknown("GraphQL response contains no data"))
    }
}

/// Classifies a non-successful HTTP answer of the GitHub API.
///
/// GitHub reports both primary and secondary rate limits either as 429 or as
/// 403 with a "rate limit" message. Other 403s are permission problems.
pub fn classify_status(status: u16, message: &str) -> ServiceError {
    let is_rate_limit_message = message.to_lowercase().contains("rate limit");
    match status {
        429 => ServiceError::rate_limited(message),
        403 if is_rate_limit_message => ServiceError::rate_limited(message),
        404 => ServiceError::not_found(message),
        _ => ServiceError::unknown(format!("HTTP {status}: {message}")),
    }
}
