//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! All timestamps are stored as RFC 3339 strings. Ids are plain integers.

use chrono::{DateTime, Utc};
use catdex_core::{
  cat::Cat,
  id::{CatId, ListId, MembershipId, ReviewId, UserId},
  list::{CatList, CatsInList},
  review::Review,
  user::{User, UserCredentials},
};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::Decode(format!("bad timestamp {s:?}: {e}")))
}

// ─── Column lists ────────────────────────────────────────────────────────────

/// Select list matching [`RawCat::from_row`], qualified with alias `c`.
pub const CAT_COLUMNS: &str = "c.id, c.name, c.breed, c.size, c.friendly, \
  c.coat, c.img_url, c.user_id, c.created_at, c.updated_at";

/// Select list matching [`RawReview::from_row`], qualified with alias `r`.
pub const REVIEW_COLUMNS: &str =
  "r.id, r.cat_id, r.user_id, r.body, r.rating, r.created_at, r.updated_at";

pub const LIST_COLUMNS: &str = "id, name, user_id, created_at, updated_at";

pub const MEMBERSHIP_COLUMNS: &str =
  "id, cat_id, user_id, created_at, updated_at";

pub const USER_COLUMNS: &str =
  "id, username, password_hash, created_at, updated_at";

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from a `cats` row.
pub struct RawCat {
  pub id:         i64,
  pub name:       String,
  pub breed:      String,
  pub size:       String,
  pub friendly:   String,
  pub coat:       String,
  pub img_url:    Option<String>,
  pub user_id:    i64,
  pub created_at: String,
  pub updated_at: String,
}

impl RawCat {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:         row.get(0)?,
      name:       row.get(1)?,
      breed:      row.get(2)?,
      size:       row.get(3)?,
      friendly:   row.get(4)?,
      coat:       row.get(5)?,
      img_url:    row.get(6)?,
      user_id:    row.get(7)?,
      created_at: row.get(8)?,
      updated_at: row.get(9)?,
    })
  }

  pub fn into_cat(self) -> Result<Cat> {
    Ok(Cat {
      id:         CatId(self.id),
      name:       self.name,
      breed:      self.breed,
      size:       self.size,
      friendly:   self.friendly,
      coat:       self.coat,
      img_url:    self.img_url,
      user_id:    UserId(self.user_id),
      created_at: decode_dt(&self.created_at)?,
      updated_at: decode_dt(&self.updated_at)?,
    })
  }
}

/// Raw values read directly from a `reviews` row.
pub struct RawReview {
  pub id:         i64,
  pub cat_id:     i64,
  pub user_id:    i64,
  pub body:       String,
  pub rating:     i64,
  pub created_at: String,
  pub updated_at: String,
}

impl RawReview {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:         row.get(0)?,
      cat_id:     row.get(1)?,
      user_id:    row.get(2)?,
      body:       row.get(3)?,
      rating:     row.get(4)?,
      created_at: row.get(5)?,
      updated_at: row.get(6)?,
    })
  }

  pub fn into_review(self) -> Result<Review> {
    let rating = u8::try_from(self.rating)
      .map_err(|_| Error::Decode(format!("bad rating {}", self.rating)))?;
    Ok(Review {
      id: ReviewId(self.id),
      cat_id: CatId(self.cat_id),
      user_id: UserId(self.user_id),
      body: self.body,
      rating,
      created_at: decode_dt(&self.created_at)?,
      updated_at: decode_dt(&self.updated_at)?,
    })
  }
}

/// Raw values read directly from a `cat_lists` row.
pub struct RawList {
  pub id:         i64,
  pub name:       String,
  pub user_id:    i64,
  pub created_at: String,
  pub updated_at: String,
}

impl RawList {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:         row.get(0)?,
      name:       row.get(1)?,
      user_id:    row.get(2)?,
      created_at: row.get(3)?,
      updated_at: row.get(4)?,
    })
  }

  pub fn into_list(self) -> Result<CatList> {
    Ok(CatList {
      id:         ListId(self.id),
      name:       self.name,
      user_id:    UserId(self.user_id),
      created_at: decode_dt(&self.created_at)?,
      updated_at: decode_dt(&self.updated_at)?,
    })
  }
}

/// Raw values read directly from a `cats_in_lists` row.
pub struct RawMembership {
  pub id:         i64,
  pub cat_id:     i64,
  pub user_id:    i64,
  pub created_at: String,
  pub updated_at: String,
}

impl RawMembership {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:         row.get(0)?,
      cat_id:     row.get(1)?,
      user_id:    row.get(2)?,
      created_at: row.get(3)?,
      updated_at: row.get(4)?,
    })
  }

  pub fn into_membership(self) -> Result<CatsInList> {
    Ok(CatsInList {
      id:         MembershipId(self.id),
      cat_id:     CatId(self.cat_id),
      user_id:    UserId(self.user_id),
      created_at: decode_dt(&self.created_at)?,
      updated_at: decode_dt(&self.updated_at)?,
    })
  }
}

/// Raw values read directly from a `users` row.
pub struct RawUser {
  pub id:            i64,
  pub username:      String,
  pub password_hash: String,
  pub created_at:    String,
  pub updated_at:    String,
}

impl RawUser {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:            row.get(0)?,
      username:      row.get(1)?,
      password_hash: row.get(2)?,
      created_at:    row.get(3)?,
      updated_at:    row.get(4)?,
    })
  }

  pub fn into_credentials(self) -> Result<UserCredentials> {
    Ok(UserCredentials {
      user:          User {
        id:         UserId(self.id),
        username:   self.username,
        created_at: decode_dt(&self.created_at)?,
        updated_at: decode_dt(&self.updated_at)?,
      },
      password_hash: self.password_hash,
    })
  }
}
