use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;

use crate::auth::principal::LookupFailure;

#[derive(Debug, ThisError)]
pub enum RosterError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] SqlxError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("Invalid page request: page={page}, size={size}")]
    InvalidPageRequest { page: u32, size: u32 },

    #[error("Unknown authority: {0}")]
    UnknownAuthority(String),

    #[error(transparent)]
    UserNotFound(#[from] LookupFailure),
}

impl From<figment::Error> for RosterError {
    fn from(e: figment::Error) -> Self {
        RosterError::Config(e.to_string())
    }
}

impl IntoResponse for RosterError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_body) = match self {
            RosterError::DatabaseError(_)
            | RosterError::Config(_)
            | RosterError::PasswordHash(_)
            | RosterError::UnknownAuthority(_) => {
                let status = StatusCode::INTERNAL_SERVER_ERROR;
                let body = ApiErrorBody {
                    code: "INTERNAL_ERROR".to_string(),
                    message: "An internal server error occurred.".to_string(),
                };
                (status, body)
            }
            RosterError::InvalidPageRequest { .. } => {
                let status = StatusCode::BAD_REQUEST;
                let body = ApiErrorBody {
                    code: "BAD_REQUEST".to_string(),
                    message: "Page size must be at least one.".to_string(),
                };
                (status, body)
            }
            RosterError::UserNotFound(_) => {
                let status = StatusCode::UNAUTHORIZED;
                let body = ApiErrorBody {
                    code: "UNAUTHORIZED".to_string(),
                    message: "Access denied.".to_string(),
                };
                (status, body)
            }
        };
        (status, Json(ApiErrorResponse { error: error_body })).into_response()
    }
}

/// Standardized API error response body
#[derive(Serialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}
