//! Cat lists and list membership.
//!
//! Membership is recorded per owner rather than per list: a [`CatsInList`]
//! row puts a cat into its user's list context, and every list owned by that
//! user presents those cats.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  cat::{Cat, CatWithReviews},
  id::{CatId, ListId, MembershipId, UserId},
};

/// A named, user-owned collection of cats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatList {
  pub id:         ListId,
  pub name:       String,
  pub user_id:    UserId,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

/// Input to [`crate::store::CatalogStore::insert_list`].
#[derive(Debug, Clone)]
pub struct NewCatList {
  pub name:    String,
  pub user_id: UserId,
}

/// Join row: this cat is a member of this user's list context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatsInList {
  pub id:         MembershipId,
  pub cat_id:     CatId,
  pub user_id:    UserId,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

/// A list with its member cats, as shown on the owner's index page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListWithCats {
  #[serde(flatten)]
  pub list: CatList,
  pub cats: Vec<Cat>,
}

/// A list with its member cats and each cat's reviews.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListDetail {
  #[serde(flatten)]
  pub list: CatList,
  pub cats: Vec<CatWithReviews>,
}
