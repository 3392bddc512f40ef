//! Error taxonomy for `pondok-core`.
//!
//! Every failure a caller can observe from the engine is one of these kinds.
//! Scoring rules never raise; all failures originate in storage, except
//! [`Error::ConstraintMismatch`], which marks a rule bug and is fatal.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  /// The primary subject row does not exist. Not retryable.
  #[error("subject not found: {0}")]
  SubjectNotFound(Uuid),

  /// Connection or timeout failure. The caller may retry.
  #[error("storage unavailable: {0}")]
  StorageUnavailable(String),

  /// A unique-key collision that survived conflict handling.
  #[error("integrity violation: {0}")]
  IntegrityViolation(String),

  /// A sub-score fell outside its declared range. Indicates a rule bug.
  #[error("dimension {dimension} produced out-of-range value {value}")]
  ConstraintMismatch { dimension: &'static str, value: i64 },

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
