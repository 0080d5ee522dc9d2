//! Cat lifecycle: create, read, update, delete, and reviews.
//!
//! A cat moves `Nonexistent → Active` on create, loops on `Active` through
//! updates, and ends in `Deleted`. Ids are never reused, so once deleted an id
//! only ever resolves to [`Error::NotFound`].

use crate::{
  Error, Result,
  cat::{CascadeReport, Cat, CatFields, CatUpdate, CatWithReviews, NewCat},
  error::Entity,
  guard::check_permission,
  id::{CatId, UserId},
  identity::Identity,
  review::{NewReview, Review, ReviewFields},
  store::{CatalogStore, IntoCore},
  validate::{RawCatFields, validate_cat, validate_cat_update},
};

/// A cat whose ownership by the requester has been checked. Only
/// [`CatManager::load_owned`] hands these out.
#[derive(Debug, Clone)]
pub struct OwnedCat(Cat);

impl OwnedCat {
  pub fn cat(&self) -> &Cat { &self.0 }
}

/// Orchestrates every write against a cat on top of a [`CatalogStore`].
pub struct CatManager<'a, S> {
  store: &'a S,
}

impl<'a, S: CatalogStore> CatManager<'a, S> {
  pub fn new(store: &'a S) -> Self { Self { store } }

  // ── Reads ─────────────────────────────────────────────────────────────

  /// Every cat in the catalogue. Reads are public.
  pub async fn list(&self) -> Result<Vec<Cat>> {
    self.store.list_cats().await.into_core()
  }

  /// One cat with its reviews.
  pub async fn get(&self, id: CatId) -> Result<CatWithReviews> {
    let cat = self.load(id).await?;
    let reviews = self.store.reviews_for_cat(id).await.into_core()?;
    Ok(CatWithReviews { cat, reviews })
  }

  /// Load a cat the requester is allowed to change.
  ///
  /// Checks run in a fixed order: identity ([`Error::Unauthenticated`]),
  /// existence ([`Error::NotFound`]), then ownership ([`Error::Forbidden`]).
  pub async fn load_owned(
    &self,
    id: CatId,
    requester: &Identity,
  ) -> Result<OwnedCat> {
    requester.require()?;
    let cat = self.load(id).await?;
    check_permission(&cat, requester)?;
    Ok(OwnedCat(cat))
  }

  // ── Writes ────────────────────────────────────────────────────────────

  /// Persist a new cat owned by `owner`.
  ///
  /// The fields are re-checked even though they should already have been
  /// through [`validate_cat`]; anything that fails is rejected with
  /// [`Error::Validation`] and nothing is written.
  pub async fn create(&self, fields: CatFields, owner: UserId) -> Result<Cat> {
    let fields = validate_cat(&RawCatFields::from(fields))
      .map_err(Error::Validation)?;

    let cat = self
      .store
      .insert_cat(NewCat { fields, user_id: owner })
      .await
      .into_core()?;

    tracing::info!(cat_id = %cat.id, owner = %owner, "cat created");
    Ok(cat)
  }

  /// Replace the mutable fields of a cat owned by the requester.
  ///
  /// Ownership is settled before the fields are looked at. A full
  /// [`CatFields`] converts into an update that also rewrites the image url.
  pub async fn update(
    &self,
    id: CatId,
    update: impl Into<CatUpdate>,
    requester: &Identity,
  ) -> Result<Cat> {
    let raw = RawCatFields::from(update.into());
    let owned = self.load_owned(id, requester).await?;
    self.update_owned(owned, &raw).await
  }

  /// Apply a raw submission to a cat already loaded through
  /// [`Self::load_owned`]. The submission is validated here, once.
  pub async fn update_owned(
    &self,
    owned: OwnedCat,
    raw: &RawCatFields,
  ) -> Result<Cat> {
    let update = validate_cat_update(raw).map_err(Error::Validation)?;
    let id = owned.cat().id;

    let updated = self
      .store
      .update_cat(id, update)
      .await
      .into_core()?
      .ok_or_else(|| Error::not_found(Entity::Cat, id))?;

    tracing::info!(cat_id = %id, "cat updated");
    Ok(updated)
  }

  /// Delete a cat owned by the requester, along with its reviews and list
  /// memberships. The cascade is atomic: on failure nothing is removed.
  pub async fn delete(
    &self,
    id: CatId,
    requester: &Identity,
  ) -> Result<CascadeReport> {
    self.load_owned(id, requester).await?;

    let report = self.store.destroy_cat_cascade(id).await.into_core()?;

    tracing::info!(
      cat_id = %id,
      reviews_removed = report.reviews_removed,
      memberships_removed = report.memberships_removed,
      "cat deleted"
    );
    Ok(report)
  }

  /// Attach a review to an existing cat. Any signed-in user may review any
  /// cat.
  pub async fn add_review(
    &self,
    cat_id: CatId,
    fields: ReviewFields,
    requester: &Identity,
  ) -> Result<Review> {
    let author = requester.require()?;
    self.load(cat_id).await?;

    let review = self
      .store
      .insert_review(NewReview { cat_id, user_id: author, fields })
      .await
      .into_core()?;

    tracing::debug!(cat_id = %cat_id, review_id = %review.id, "review added");
    Ok(review)
  }

  async fn load(&self, id: CatId) -> Result<Cat> {
    self
      .store
      .get_cat(id)
      .await
      .into_core()?
      .ok_or_else(|| Error::not_found(Entity::Cat, id))
  }
}
