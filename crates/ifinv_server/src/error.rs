//! Error types for the inventory server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use ifinv_core::CoreError;
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;

/// Errors that can occur while serving a request.
///
/// Each variant maps to one fixed status code and client-facing message.
#[derive(Error, Debug)]
pub enum ServerError {
    /// Malformed list query parameters.
    #[error("Query parameter invalid!")]
    InvalidQuery,

    /// Malformed create/update body.
    #[error("Request body invalid!")]
    InvalidBody,

    /// Unknown record id.
    #[error("Interface with id '{id}' not found")]
    NotFound {
        /// The id from the request path.
        id: String,
    },

    /// Missing or invalid credentials, token or session.
    ///
    /// The reason is for logs only; clients always see `Unauthorized`.
    #[error("not authorized: {0}")]
    Unauthorized(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),

    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ServerError {
    /// Creates an unauthorized error with a log-only reason.
    pub fn unauthorized(reason: impl Into<String>) -> Self {
        ServerError::Unauthorized(reason.into())
    }

    /// Returns the HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::InvalidQuery | ServerError::InvalidBody => StatusCode::BAD_REQUEST,
            ServerError::NotFound { .. } => StatusCode::NOT_FOUND,
            ServerError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ServerError::Internal(_) | ServerError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the message sent to the client.
    pub fn client_message(&self) -> String {
        match self {
            ServerError::Unauthorized(_) => "Unauthorized".to_string(),
            ServerError::Internal(_) | ServerError::Io(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }

    /// Returns true if this is a client error (4xx).
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }

    /// Returns true if this is a server error (5xx).
    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }
}

impl From<CoreError> for ServerError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::RecordNotFound { id } => ServerError::NotFound { id },
            CoreError::InvalidSortField(_) | CoreError::InvalidSortDirection(_) => {
                ServerError::InvalidQuery
            }
            other => ServerError::Internal(other.to_string()),
        }
    }
}

/// JSON error body: `{"status": 404, "message": "..."}`.
#[derive(Debug, Serialize)]
struct ErrorBody {
    status: u16,
    message: String,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        if self.is_server_error() {
            warn!(error = %self, "request failed");
        }
        let status = self.status_code();
        let body = ErrorBody {
            status: status.as_u16(),
            message: self.client_message(),
        };
        (status, Json(body)).into_response()
    }
}
