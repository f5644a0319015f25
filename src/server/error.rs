use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::models::ErrorResponse;

/// Errors surfaced at the HTTP boundary. Internal failures are logged with
/// their full cause chain; the client only receives the generic message.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("{message}")]
    Internal {
        message: &'static str,
        report: eyre::Report,
    },
}

impl ServerError {
    pub fn internal(message: &'static str, report: eyre::Report) -> Self {
        Self::Internal { message, report }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ServerError::BadRequest(message) => {
                log::debug!("Rejecting request: {}", message);
                (StatusCode::BAD_REQUEST, message)
            }
            ServerError::Internal { message, report } => {
                log::error!("{}: {:?}", message, report);
                (StatusCode::INTERNAL_SERVER_ERROR, message.to_string())
            }
        };
        (status, Json(ErrorResponse { message })).into_response()
    }
}
