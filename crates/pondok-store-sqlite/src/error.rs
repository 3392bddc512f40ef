//! Error type for `pondok-store-sqlite` and its mapping onto the
//! caller-visible taxonomy in [`pondok_core::Error`].

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// A stored column no longer decodes to its domain type.
  #[error("corrupt column: {0}")]
  Decode(String),

  #[error("subject not found: {0}")]
  SubjectNotFound(Uuid),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl From<Error> for pondok_core::Error {
  fn from(err: Error) -> Self {
    match err {
      Error::SubjectNotFound(id) => Self::SubjectNotFound(id),
      Error::Json(e) => Self::Serialization(e),
      Error::Database(tokio_rusqlite::Error::Rusqlite(e)) => map_rusqlite(e),
      Error::Database(e) => Self::StorageUnavailable(e.to_string()),
      Error::Uuid(e) => Self::IntegrityViolation(format!("corrupt uuid: {e}")),
      Error::DateParse(e) => {
        Self::IntegrityViolation(format!("corrupt timestamp: {e}"))
      }
      Error::Decode(e) => Self::IntegrityViolation(e),
    }
  }
}

fn map_rusqlite(e: rusqlite::Error) -> pondok_core::Error {
  use rusqlite::ErrorCode;

  match &e {
    rusqlite::Error::SqliteFailure(f, _) => match f.code {
      ErrorCode::ConstraintViolation => {
        pondok_core::Error::IntegrityViolation(e.to_string())
      }
      _ => pondok_core::Error::StorageUnavailable(e.to_string()),
    },
    _ => pondok_core::Error::StorageUnavailable(e.to_string()),
  }
}
