//! Error types for `catdex-core`.

use std::fmt;

use thiserror::Error;

use crate::validate::FieldError;

/// The kind of record a [`Error::NotFound`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
  Cat,
  CatList,
}

impl fmt::Display for Entity {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Self::Cat => "cat",
      Self::CatList => "cat list",
    })
  }
}

#[derive(Debug, Error)]
pub enum Error {
  /// The id does not resolve to a live row.
  #[error("{entity} with id {id} could not be found")]
  NotFound { entity: Entity, id: i64 },

  /// The row exists but belongs to someone else.
  #[error("you do not have permission to modify this {0}")]
  Forbidden(Entity),

  #[error("authentication required")]
  Unauthenticated,

  /// Every violated field constraint, in field order.
  #[error("validation failed: {}", summarize(.0))]
  Validation(Vec<FieldError>),

  /// A storage constraint was violated, e.g. a dangling foreign key.
  #[error("integrity violation: {0}")]
  Integrity(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub fn not_found(entity: Entity, id: impl Into<i64>) -> Self {
    Self::NotFound { entity, id: id.into() }
  }

  /// Wrap an arbitrary backend failure.
  pub fn store(e: impl std::error::Error + Send + Sync + 'static) -> Self {
    Self::Store(Box::new(e))
  }
}

fn summarize(errors: &[FieldError]) -> String {
  errors
    .iter()
    .map(|e| e.message.as_str())
    .collect::<Vec<_>>()
    .join("; ")
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
