//! Ownership guard shared by every user-owned resource.
//!
//! Callers resolve the resource first and report [`Error::NotFound`]
//! themselves; the guard only ever sees rows that exist.

use crate::{
  Error, Result,
  cat::Cat,
  error::Entity,
  id::UserId,
  identity::Identity,
  list::CatList,
};

/// A record owned by exactly one user through its `user_id` column.
pub trait Owned {
  const ENTITY: Entity;

  fn owner(&self) -> UserId;
}

impl Owned for Cat {
  const ENTITY: Entity = Entity::Cat;

  fn owner(&self) -> UserId { self.user_id }
}

impl Owned for CatList {
  const ENTITY: Entity = Entity::CatList;

  fn owner(&self) -> UserId { self.user_id }
}

/// Allow the request iff the requester owns `resource`.
///
/// Anonymous requesters get [`Error::Unauthenticated`]; anyone else who is
/// not the owner gets [`Error::Forbidden`].
pub fn check_permission<R: Owned>(resource: &R, identity: &Identity) -> Result<()> {
  let requester = identity.require()?;
  if resource.owner() == requester {
    return Ok(());
  }
  tracing::debug!(
    entity = %R::ENTITY,
    owner = %resource.owner(),
    requester = %requester,
    "ownership check denied"
  );
  Err(Error::Forbidden(R::ENTITY))
}
