//! Error type for `catdex-store-sqlite`.

use catdex_core::Entity;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("decode error: {0}")]
  Decode(String),

  #[error("{entity} with id {id} could not be found")]
  NotFound { entity: Entity, id: i64 },
}

impl Error {
  /// True when SQLite rejected a write for breaking a constraint (foreign
  /// key, unique, check, or not-null).
  pub fn is_constraint_violation(&self) -> bool {
    matches!(
      self,
      Self::Database(tokio_rusqlite::Error::Rusqlite(
        rusqlite::Error::SqliteFailure(failure, _),
      )) if failure.code == rusqlite::ErrorCode::ConstraintViolation
    )
  }
}

impl From<Error> for catdex_core::Error {
  fn from(e: Error) -> Self {
    match e {
      Error::NotFound { entity, id } => Self::NotFound { entity, id },
      e if e.is_constraint_violation() => Self::Integrity(e.to_string()),
      e => Self::store(e),
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
