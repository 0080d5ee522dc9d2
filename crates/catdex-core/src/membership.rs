//! Cat lists and the cats that belong to them.

use crate::{
  Error, Result,
  error::Entity,
  guard::check_permission,
  id::{CatId, ListId, UserId},
  identity::Identity,
  list::{CatList, CatsInList, ListDetail, ListWithCats, NewCatList},
  store::{CatalogStore, IntoCore},
};

/// Reads and writes list membership on top of a [`CatalogStore`].
pub struct ListManager<'a, S> {
  store: &'a S,
}

impl<'a, S: CatalogStore> ListManager<'a, S> {
  pub fn new(store: &'a S) -> Self { Self { store } }

  /// Every list `owner` owns, each with its member cats. Never returns
  /// another user's lists.
  pub async fn list_owned_by(&self, owner: UserId) -> Result<Vec<ListWithCats>> {
    let lists = self.store.lists_owned_by(owner).await.into_core()?;
    if lists.is_empty() {
      return Ok(Vec::new());
    }

    let cats = self.store.member_cats(owner).await.into_core()?;
    Ok(
      lists
        .into_iter()
        .map(|list| ListWithCats { list, cats: cats.clone() })
        .collect(),
    )
  }

  /// A list with its member cats and their reviews.
  ///
  /// A list owned by someone else is reported exactly like a missing one, so
  /// list ids cannot be probed.
  pub async fn get_detail(
    &self,
    id: ListId,
    requester: &Identity,
  ) -> Result<ListDetail> {
    requester.require()?;
    let not_found = || Error::not_found(Entity::CatList, id);

    let list = self.store.get_list(id).await.into_core()?.ok_or_else(not_found)?;
    match check_permission(&list, requester) {
      Ok(()) => {}
      Err(Error::Forbidden(_)) => return Err(not_found()),
      Err(e) => return Err(e),
    }

    let cats = self
      .store
      .member_cats_with_reviews(list.user_id)
      .await
      .into_core()?;
    Ok(ListDetail { list, cats })
  }

  /// Create a new, empty list for the requester. `name` must already have
  /// passed [`crate::validate::validate_list_name`].
  pub async fn create(&self, name: String, requester: &Identity) -> Result<CatList> {
    let owner = requester.require()?;
    let list = self
      .store
      .insert_list(NewCatList { name, user_id: owner })
      .await
      .into_core()?;

    tracing::info!(list_id = %list.id, owner = %owner, "cat list created");
    Ok(list)
  }

  /// Put a cat into `user_id`'s list context.
  ///
  /// The caller vouches for `user_id` being the authenticated requester. A
  /// missing cat is [`Error::NotFound`]; a missing user fails the foreign key
  /// and surfaces as [`Error::Integrity`].
  pub async fn add_membership(
    &self,
    cat_id: CatId,
    user_id: UserId,
  ) -> Result<CatsInList> {
    self
      .store
      .get_cat(cat_id)
      .await
      .into_core()?
      .ok_or_else(|| Error::not_found(Entity::Cat, cat_id))?;

    let row = self
      .store
      .insert_membership(cat_id, user_id)
      .await
      .into_core()?;

    tracing::debug!(cat_id = %cat_id, user_id = %user_id, "membership added");
    Ok(row)
  }

  /// Drop every membership row for a cat. Only reached from an already
  /// authorised cat delete, so no ownership check is made here. Running it
  /// against a cat with no memberships is a no-op.
  pub async fn remove_memberships_for_cat(&self, cat_id: CatId) -> Result<u64> {
    self.store.remove_memberships_for_cat(cat_id).await.into_core()
  }
}
