use rocket::{http::Status, serde::json::Json};
use serde::{Deserialize, Serialize};
use user_stats_server::{ErrorKind, ServiceError};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
    pub kind: ErrorKind,
}

impl From<ServiceError> for ErrorResponse {
    fn from(error: ServiceError) -> Self {
        Self {
            message: error.message,
            kind: error.kind,
        }
    }
}

pub type ApiError = (Status, Json<ErrorResponse>);

/// The user route only ever sees `NotFound` from the composer, the other
/// arms cover any `ServiceError` surfaced by future routes.
pub fn status_for(kind: ErrorKind) -> Status {
    match kind {
        ErrorKind::NotFound => Status::NotFound,
        ErrorKind::RateLimited => Status::TooManyRequests,
        ErrorKind::Transport => Status::BadGateway,
        ErrorKind::Unknown => Status::InternalServerError,
    }
}

pub fn api_error(error: ServiceError) -> ApiError {
    (status_for(error.kind), Json(error.into()))
}
