//! Cats, the primary catalogued resource.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  id::{CatId, UserId},
  review::Review,
};

/// A persisted cat. `user_id` is fixed at creation and never rewritten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cat {
  pub id:         CatId,
  pub name:       String,
  pub breed:      String,
  pub size:       String,
  /// The friendliness marker exactly as submitted (e.g. `"yes"`).
  pub friendly:   String,
  pub coat:       String,
  pub img_url:    Option<String>,
  pub user_id:    UserId,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

/// The fields of a cat its owner may set or change.
///
/// This is the only shape accepted by create and update, so an owner id can
/// never ride along in a bulk update. Values are produced by
/// [`crate::validate::validate_cat`] and are already trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatFields {
  pub name:     String,
  pub breed:    String,
  pub size:     String,
  pub friendly: String,
  pub coat:     String,
  pub img_url:  Option<String>,
}

/// An owner's edit to an existing cat.
///
/// The required fields are always rewritten. `img_url` is optional on the
/// wire, so an edit that left it out keeps whatever url is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatUpdate {
  pub fields:          CatFields,
  /// `false` when the submission did not mention `imgUrl` at all.
  pub replace_img_url: bool,
}

impl From<CatFields> for CatUpdate {
  fn from(fields: CatFields) -> Self { Self { fields, replace_img_url: true } }
}

/// Input to [`crate::store::CatalogStore::insert_cat`].
/// Timestamps and the id are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewCat {
  pub fields:  CatFields,
  pub user_id: UserId,
}

/// A cat together with every review attached to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatWithReviews {
  #[serde(flatten)]
  pub cat:     Cat,
  pub reviews: Vec<Review>,
}

/// Rows removed by a cat delete cascade, besides the cat itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CascadeReport {
  pub memberships_removed: u64,
  pub reviews_removed:     u64,
}
