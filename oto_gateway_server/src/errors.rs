use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use log::error;
use oto_auth_engine::{AuthFailure, TransactionAuthError};
use thiserror::Error;

use crate::data_objects::FailureResponse;

/// Sent in place of the real message whenever something went wrong on our side.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error. Please contact the gateway operator.";

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Invalid query. {0}")]
    InvalidQuery(String),
    #[error("An I/O error happened in the server. {0}")]
    IOError(#[from] std::io::Error),
    #[error("Invalid server configuration. {0}")]
    ConfigurationError(String),
    #[error("UnspecifiedError. {0}")]
    Unspecified(String),
    #[error("{0}")]
    AuthenticationError(#[from] AuthFailure),
    #[error("Internal error. {0}")]
    InternalError(String),
}

impl ServerError {
    /// The machine-readable result code placed in the `rc` field of the failure body.
    pub fn rc(&self) -> &'static str {
        match self {
            Self::AuthenticationError(f) => f.rc(),
            Self::InvalidQuery(_) => "InvalidQuery",
            _ => "INTERNAL_SERVER_ERROR",
        }
    }
}

impl From<TransactionAuthError> for ServerError {
    fn from(e: TransactionAuthError) -> Self {
        match e {
            TransactionAuthError::Rejected(f) => Self::AuthenticationError(f),
            TransactionAuthError::Internal(s) => Self::InternalError(s),
        }
    }
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::AuthenticationError(f) => {
                StatusCode::from_u16(f.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            },
            Self::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            Self::IOError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ConfigurationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unspecified(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        // Never leak configuration or backend details to callers
        let message = if status.is_server_error() {
            error!("💻️ Request failed with an internal error. {self}");
            INTERNAL_ERROR_MESSAGE.to_string()
        } else {
            self.to_string()
        };
        HttpResponse::build(status)
            .insert_header(ContentType::json())
            .body(serde_json::json!(FailureResponse::new(self.rc(), message)).to_string())
    }
}
