use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum ErrorKind {
    /// Quota of the credential is exhausted, should be retried after a pause
    RateLimited,
    NotFound,
    /// Connectivity or protocol failure
    Transport,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
#[error("{kind}: {message}")]
pub struct ServiceError {
    pub message: String,
    pub kind: ErrorKind,
}

impl ServiceError {
    pub fn new(message: impl Into<String>, kind: ErrorKind) -> Self {
        Self {
            message: message.into(),
            kind,
        }
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::new(message, ErrorKind::RateLimited)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(message, ErrorKind::NotFound)
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(message, ErrorKind::Transport)
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(message, ErrorKind::Unknown)
    }

    pub const fn is_rate_limited(&self) -> bool {
        matches!(self.kind, ErrorKind::RateLimited)
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(error: serde_json::Error) -> Self {
        Self::unknown(format!("Failed to decode response: {error}"))
    }
}
