//! Reviews: user-authored content attached to a single cat.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::{CatId, ReviewId, UserId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
  pub id:         ReviewId,
  pub cat_id:     CatId,
  /// The author. Authoring a review does not require owning the cat.
  pub user_id:    UserId,
  pub body:       String,
  /// 1 (worst) to 5 (best).
  pub rating:     u8,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

/// Validated review content, produced by [`crate::validate::validate_review`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewFields {
  pub body:   String,
  pub rating: u8,
}

/// Input to [`crate::store::CatalogStore::insert_review`].
#[derive(Debug, Clone)]
pub struct NewReview {
  pub cat_id:  CatId,
  pub user_id: UserId,
  pub fields:  ReviewFields,
}
