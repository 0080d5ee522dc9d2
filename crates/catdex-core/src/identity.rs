//! The requester as resolved by the transport layer.

use crate::{Error, Result, id::UserId};

/// Who is making the current request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Identity {
  Anonymous,
  User(UserId),
}

impl Identity {
  /// The authenticated user, or [`Error::Unauthenticated`].
  pub fn require(&self) -> Result<UserId> {
    match self {
      Self::User(id) => Ok(*id),
      Self::Anonymous => Err(Error::Unauthenticated),
    }
  }
}
