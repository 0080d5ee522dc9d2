//! The `CatalogStore` trait, the entity store every manager runs on.
//!
//! The trait is implemented by storage backends (e.g. `catdex-store-sqlite`).
//! Ownership is never enforced here; that is the job of
//! [`crate::guard::check_permission`]. The store does own referential
//! integrity: foreign keys, unique constraints, and the atomic delete cascade.

use std::future::Future;

use crate::{
  cat::{CascadeReport, Cat, CatUpdate, CatWithReviews, NewCat},
  id::{CatId, ListId, UserId},
  list::{CatList, CatsInList, NewCatList},
  review::{NewReview, Review},
  user::{User, UserCredentials},
};

/// Abstraction over a catdex storage backend.
///
/// Each method is a self-contained transaction. Backend errors convert into
/// [`crate::Error`]; constraint violations must surface as
/// [`crate::Error::Integrity`].
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait CatalogStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + Into<crate::Error> + 'static;

  // ── Users ─────────────────────────────────────────────────────────────

  /// Persist a new user. Usernames are unique.
  fn create_user(
    &self,
    username: String,
    password_hash: String,
  ) -> impl Future<Output = Result<User, Self::Error>> + Send + '_;

  fn get_user(
    &self,
    id: UserId,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + '_;

  /// Look up a user and their password hash by username.
  fn find_credentials(
    &self,
    username: String,
  ) -> impl Future<Output = Result<Option<UserCredentials>, Self::Error>> + Send + '_;

  // ── Cats ──────────────────────────────────────────────────────────────

  /// Persist a new cat and return it with its generated id.
  fn insert_cat(
    &self,
    input: NewCat,
  ) -> impl Future<Output = Result<Cat, Self::Error>> + Send + '_;

  fn get_cat(
    &self,
    id: CatId,
  ) -> impl Future<Output = Result<Option<Cat>, Self::Error>> + Send + '_;

  /// Every cat, in ascending id order.
  fn list_cats(&self) -> impl Future<Output = Result<Vec<Cat>, Self::Error>> + Send + '_;

  /// Overwrite the mutable fields of a cat. The owner column is not touched,
  /// and the image url only when the update asks for it.
  /// Returns `None` if the cat does not exist.
  fn update_cat(
    &self,
    id: CatId,
    update: CatUpdate,
  ) -> impl Future<Output = Result<Option<Cat>, Self::Error>> + Send + '_;

  /// Delete a cat together with every membership row and review that
  /// references it, as a single all-or-nothing unit. Dependents go first.
  ///
  /// If the cat does not exist nothing is changed and a not-found error is
  /// returned.
  fn destroy_cat_cascade(
    &self,
    id: CatId,
  ) -> impl Future<Output = Result<CascadeReport, Self::Error>> + Send + '_;

  // ── Reviews ───────────────────────────────────────────────────────────

  fn insert_review(
    &self,
    input: NewReview,
  ) -> impl Future<Output = Result<Review, Self::Error>> + Send + '_;

  /// Reviews for one cat, oldest first.
  fn reviews_for_cat(
    &self,
    cat_id: CatId,
  ) -> impl Future<Output = Result<Vec<Review>, Self::Error>> + Send + '_;

  // ── Lists ─────────────────────────────────────────────────────────────

  fn insert_list(
    &self,
    input: NewCatList,
  ) -> impl Future<Output = Result<CatList, Self::Error>> + Send + '_;

  fn get_list(
    &self,
    id: ListId,
  ) -> impl Future<Output = Result<Option<CatList>, Self::Error>> + Send + '_;

  /// Lists whose `user_id` is `owner`, in ascending id order.
  fn lists_owned_by(
    &self,
    owner: UserId,
  ) -> impl Future<Output = Result<Vec<CatList>, Self::Error>> + Send + '_;

  // ── Memberships ───────────────────────────────────────────────────────

  /// Add a cat to a user's list context. Adding a pair that already exists
  /// returns the existing row.
  fn insert_membership(
    &self,
    cat_id: CatId,
    user_id: UserId,
  ) -> impl Future<Output = Result<CatsInList, Self::Error>> + Send + '_;

  /// The cats in a user's list context, in ascending cat id order.
  fn member_cats(
    &self,
    user_id: UserId,
  ) -> impl Future<Output = Result<Vec<Cat>, Self::Error>> + Send + '_;

  /// Like [`Self::member_cats`], with each cat's reviews loaded in the same
  /// round trip.
  fn member_cats_with_reviews(
    &self,
    user_id: UserId,
  ) -> impl Future<Output = Result<Vec<CatWithReviews>, Self::Error>> + Send + '_;

  /// Delete every membership row for `cat_id`, returning how many went.
  /// Deleting from an already-empty set is not an error.
  fn remove_memberships_for_cat(
    &self,
    cat_id: CatId,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;
}

/// Lifts a backend result into a core [`crate::Result`].
pub(crate) trait IntoCore<T> {
  fn into_core(self) -> crate::Result<T>;
}

impl<T, E: Into<crate::Error>> IntoCore<T> for Result<T, E> {
  fn into_core(self) -> crate::Result<T> { self.map_err(Into::into) }
}
