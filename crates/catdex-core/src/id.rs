//! Typed primary keys.
//!
//! Every table uses an auto-incrementing integer key. Wrapping each one in its
//! own newtype keeps a `CatId` from being passed where a `UserId` is expected.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! id_type {
  ($(#[$meta:meta])* $name:ident) => {
    $(#[$meta])*
    #[derive(
      Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize,
      Deserialize,
    )]
    #[serde(transparent)]
    pub struct $name(pub i64);

    impl $name {
      pub fn get(self) -> i64 { self.0 }
    }

    impl fmt::Display for $name {
      fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
      }
    }

    impl From<i64> for $name {
      fn from(raw: i64) -> Self { Self(raw) }
    }

    impl From<$name> for i64 {
      fn from(id: $name) -> Self { id.0 }
    }
  };
}

id_type!(
  /// Primary key of a `users` row.
  UserId
);
id_type!(
  /// Primary key of a `cats` row.
  CatId
);
id_type!(
  /// Primary key of a `reviews` row.
  ReviewId
);
id_type!(
  /// Primary key of a `cat_lists` row.
  ListId
);
id_type!(
  /// Primary key of a `cats_in_lists` row.
  MembershipId
);
