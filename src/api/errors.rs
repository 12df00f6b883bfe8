use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use super::dto::ErrorResponse;
use crate::{sensors::service::IngestError, store::StoreError};

#[derive(Debug, Error)]
pub enum AppError {
    /// Client sent a missing field or an unreadable body. Never retried.
    #[error("{0}")]
    BadRequest(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let error = match &self {
            Self::BadRequest(msg) => msg.clone(),
            // Store failures are logged where they happen; keep details server-side.
            Self::Store(_) => "internal server error".to_owned(),
        };
        (self.status(), Json(ErrorResponse { error })).into_response()
    }
}

impl From<IngestError> for AppError {
    fn from(e: IngestError) -> Self {
        match e {
            IngestError::Invalid(v) => Self::BadRequest(v.to_string()),
            IngestError::Store(s) => Self::Store(s),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(e: JsonRejection) -> Self {
        Self::BadRequest(format!("invalid sensor payload: {}", e.body_text()))
    }
}
