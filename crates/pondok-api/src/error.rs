//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  /// Transient storage failure; the client may retry.
  #[error("storage unavailable: {0}")]
  Unavailable(String),

  #[error("internal error: {0}")]
  Internal(String),
}

impl From<pondok_core::Error> for ApiError {
  fn from(err: pondok_core::Error) -> Self {
    match err {
      pondok_core::Error::SubjectNotFound(id) => {
        Self::NotFound(format!("subject {id} not found"))
      }
      pondok_core::Error::StorageUnavailable(m) => Self::Unavailable(m),
      other => Self::Internal(other.to_string()),
    }
  }
}

/// Fold a backend error into the API taxonomy.
pub fn store_err<E: Into<pondok_core::Error>>(err: E) -> ApiError {
  ApiError::from(err.into())
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Unavailable(m) => (StatusCode::SERVICE_UNAVAILABLE, m.clone()),
      ApiError::Internal(m) => (StatusCode::INTERNAL_SERVER_ERROR, m.clone()),
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
