//! [`SqliteStore`] is the SQLite implementation of [`CatalogStore`].

use std::{collections::HashMap, path::Path};

use chrono::Utc;
use rusqlite::OptionalExtension as _;

use catdex_core::{
  Entity,
  cat::{CascadeReport, Cat, CatUpdate, CatWithReviews, NewCat},
  id::{CatId, ListId, ReviewId, UserId},
  list::{CatList, CatsInList, NewCatList},
  review::{NewReview, Review},
  store::CatalogStore,
  user::{User, UserCredentials},
};

use crate::{
  Error, Result,
  encode::{
    CAT_COLUMNS, LIST_COLUMNS, MEMBERSHIP_COLUMNS, REVIEW_COLUMNS, RawCat,
    RawList, RawMembership, RawReview, RawUser, USER_COLUMNS, encode_dt,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A catdex store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── Query helpers ───────────────────────────────────────────────────────────
// These run inside `Connection::call` closures, on the database thread.

fn select_cat(
  conn: &rusqlite::Connection,
  id: i64,
) -> rusqlite::Result<Option<RawCat>> {
  conn
    .query_row(
      &format!("SELECT {CAT_COLUMNS} FROM cats c WHERE c.id = ?1"),
      rusqlite::params![id],
      RawCat::from_row,
    )
    .optional()
}

fn select_member_cats(
  conn: &rusqlite::Connection,
  user_id: i64,
) -> rusqlite::Result<Vec<RawCat>> {
  let mut stmt = conn.prepare(&format!(
    "SELECT {CAT_COLUMNS}
     FROM cats c
     JOIN cats_in_lists m ON m.cat_id = c.id
     WHERE m.user_id = ?1
     ORDER BY c.id"
  ))?;
  let rows = stmt
    .query_map(rusqlite::params![user_id], RawCat::from_row)?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  Ok(rows)
}

fn select_membership(
  conn: &rusqlite::Connection,
  cat_id: i64,
  user_id: i64,
) -> rusqlite::Result<RawMembership> {
  conn.query_row(
    &format!(
      "SELECT {MEMBERSHIP_COLUMNS} FROM cats_in_lists
       WHERE cat_id = ?1 AND user_id = ?2"
    ),
    rusqlite::params![cat_id, user_id],
    RawMembership::from_row,
  )
}

// ─── CatalogStore impl ───────────────────────────────────────────────────────

impl CatalogStore for SqliteStore {
  type Error = Error;

  // ── Users ─────────────────────────────────────────────────────────────────

  async fn create_user(
    &self,
    username:      String,
    password_hash: String,
  ) -> Result<User> {
    let now    = Utc::now();
    let at_str = encode_dt(now);
    let name   = username.clone();

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO users (username, password_hash, created_at, updated_at)
           VALUES (?1, ?2, ?3, ?3)",
          rusqlite::params![name, password_hash, at_str],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(User { id: UserId(id), username, created_at: now, updated_at: now })
  }

  async fn get_user(&self, id: UserId) -> Result<Option<User>> {
    let raw: Option<RawUser> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"),
              rusqlite::params![id.get()],
              RawUser::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw
      .map(|r| r.into_credentials().map(|c| c.user))
      .transpose()
  }

  async fn find_credentials(
    &self,
    username: String,
  ) -> Result<Option<UserCredentials>> {
    let raw: Option<RawUser> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {USER_COLUMNS} FROM users WHERE username = ?1"),
              rusqlite::params![username],
              RawUser::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawUser::into_credentials).transpose()
  }

  // ── Cats ──────────────────────────────────────────────────────────────────

  async fn insert_cat(&self, input: NewCat) -> Result<Cat> {
    let NewCat { fields, user_id } = input;
    let now    = Utc::now();
    let at_str = encode_dt(now);
    let f      = fields.clone();

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO cats (
             name, breed, size, friendly, coat, img_url,
             user_id, created_at, updated_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)",
          rusqlite::params![
            f.name,
            f.breed,
            f.size,
            f.friendly,
            f.coat,
            f.img_url,
            user_id.get(),
            at_str,
          ],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(Cat {
      id:         CatId(id),
      name:       fields.name,
      breed:      fields.breed,
      size:       fields.size,
      friendly:   fields.friendly,
      coat:       fields.coat,
      img_url:    fields.img_url,
      user_id,
      created_at: now,
      updated_at: now,
    })
  }

  async fn get_cat(&self, id: CatId) -> Result<Option<Cat>> {
    let raw = self
      .conn
      .call(move |conn| Ok(select_cat(conn, id.get())?))
      .await?;

    raw.map(RawCat::into_cat).transpose()
  }

  async fn list_cats(&self) -> Result<Vec<Cat>> {
    let raws: Vec<RawCat> = self
      .conn
      .call(|conn| {
        let mut stmt =
          conn.prepare(&format!("SELECT {CAT_COLUMNS} FROM cats c ORDER BY c.id"))?;
        let rows = stmt
          .query_map([], RawCat::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawCat::into_cat).collect()
  }

  async fn update_cat(&self, id: CatId, update: CatUpdate) -> Result<Option<Cat>> {
    let at_str = encode_dt(Utc::now());
    let CatUpdate { fields, replace_img_url } = update;

    let raw = self
      .conn
      .call(move |conn| {
        let changed = conn.execute(
          "UPDATE cats
           SET name = ?1, breed = ?2, size = ?3, friendly = ?4, coat = ?5,
               img_url = CASE WHEN ?6 THEN ?7 ELSE img_url END,
               updated_at = ?8
           WHERE id = ?9",
          rusqlite::params![
            fields.name,
            fields.breed,
            fields.size,
            fields.friendly,
            fields.coat,
            replace_img_url,
            fields.img_url,
            at_str,
            id.get(),
          ],
        )?;
        if changed == 0 {
          return Ok(None);
        }
        Ok(select_cat(conn, id.get())?)
      })
      .await?;

    raw.map(RawCat::into_cat).transpose()
  }

  async fn destroy_cat_cascade(&self, id: CatId) -> Result<CascadeReport> {
    let report = self
      .conn
      .call(move |conn| {
        // Dropping `tx` without committing rolls every statement back.
        let tx = conn.transaction()?;
        let memberships = tx.execute(
          "DELETE FROM cats_in_lists WHERE cat_id = ?1",
          rusqlite::params![id.get()],
        )?;
        let reviews = tx.execute(
          "DELETE FROM reviews WHERE cat_id = ?1",
          rusqlite::params![id.get()],
        )?;
        let cats = tx.execute(
          "DELETE FROM cats WHERE id = ?1",
          rusqlite::params![id.get()],
        )?;
        if cats == 0 {
          return Ok(None);
        }
        tx.commit()?;

        Ok(Some(CascadeReport {
          memberships_removed: memberships as u64,
          reviews_removed:     reviews as u64,
        }))
      })
      .await?;

    report.ok_or(Error::NotFound { entity: Entity::Cat, id: id.get() })
  }

  // ── Reviews ───────────────────────────────────────────────────────────────

  async fn insert_review(&self, input: NewReview) -> Result<Review> {
    let NewReview { cat_id, user_id, fields } = input;
    let now    = Utc::now();
    let at_str = encode_dt(now);
    let body   = fields.body.clone();

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO reviews (cat_id, user_id, body, rating, created_at, updated_at)
           VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
          rusqlite::params![
            cat_id.get(),
            user_id.get(),
            body,
            i64::from(fields.rating),
            at_str,
          ],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(Review {
      id: ReviewId(id),
      cat_id,
      user_id,
      body: fields.body,
      rating: fields.rating,
      created_at: now,
      updated_at: now,
    })
  }

  async fn reviews_for_cat(&self, cat_id: CatId) -> Result<Vec<Review>> {
    let raws: Vec<RawReview> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {REVIEW_COLUMNS} FROM reviews r WHERE r.cat_id = ?1 ORDER BY r.id"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![cat_id.get()], RawReview::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawReview::into_review).collect()
  }

  // ── Lists ─────────────────────────────────────────────────────────────────

  async fn insert_list(&self, input: NewCatList) -> Result<CatList> {
    let NewCatList { name, user_id } = input;
    let now      = Utc::now();
    let at_str   = encode_dt(now);
    let name_str = name.clone();

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO cat_lists (name, user_id, created_at, updated_at)
           VALUES (?1, ?2, ?3, ?3)",
          rusqlite::params![name_str, user_id.get(), at_str],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(CatList { id: ListId(id), name, user_id, created_at: now, updated_at: now })
  }

  async fn get_list(&self, id: ListId) -> Result<Option<CatList>> {
    let raw: Option<RawList> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {LIST_COLUMNS} FROM cat_lists WHERE id = ?1"),
              rusqlite::params![id.get()],
              RawList::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawList::into_list).transpose()
  }

  async fn lists_owned_by(&self, owner: UserId) -> Result<Vec<CatList>> {
    let raws: Vec<RawList> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {LIST_COLUMNS} FROM cat_lists WHERE user_id = ?1 ORDER BY id"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![owner.get()], RawList::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawList::into_list).collect()
  }

  // ── Memberships ───────────────────────────────────────────────────────────

  async fn insert_membership(
    &self,
    cat_id:  CatId,
    user_id: UserId,
  ) -> Result<CatsInList> {
    let at_str = encode_dt(Utc::now());

    let raw = self
      .conn
      .call(move |conn| {
        // The unique pair makes a repeat add a no-op; foreign keys are still
        // enforced because ON CONFLICT does not cover them.
        conn.execute(
          "INSERT INTO cats_in_lists (cat_id, user_id, created_at, updated_at)
           VALUES (?1, ?2, ?3, ?3)
           ON CONFLICT (cat_id, user_id) DO NOTHING",
          rusqlite::params![cat_id.get(), user_id.get(), at_str],
        )?;
        Ok(select_membership(conn, cat_id.get(), user_id.get())?)
      })
      .await?;

    raw.into_membership()
  }

  async fn member_cats(&self, user_id: UserId) -> Result<Vec<Cat>> {
    let raws = self
      .conn
      .call(move |conn| Ok(select_member_cats(conn, user_id.get())?))
      .await?;

    raws.into_iter().map(RawCat::into_cat).collect()
  }

  async fn member_cats_with_reviews(
    &self,
    user_id: UserId,
  ) -> Result<Vec<CatWithReviews>> {
    let (raw_cats, raw_reviews): (Vec<RawCat>, Vec<RawReview>) = self
      .conn
      .call(move |conn| {
        let cats = select_member_cats(conn, user_id.get())?;

        let mut stmt = conn.prepare(&format!(
          "SELECT {REVIEW_COLUMNS}
           FROM reviews r
           JOIN cats_in_lists m ON m.cat_id = r.cat_id
           WHERE m.user_id = ?1
           ORDER BY r.id"
        ))?;
        let reviews = stmt
          .query_map(rusqlite::params![user_id.get()], RawReview::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok((cats, reviews))
      })
      .await?;

    let mut by_cat: HashMap<CatId, Vec<Review>> = HashMap::new();
    for raw in raw_reviews {
      let review = raw.into_review()?;
      by_cat.entry(review.cat_id).or_default().push(review);
    }

    raw_cats
      .into_iter()
      .map(|raw| {
        let cat = raw.into_cat()?;
        let reviews = by_cat.remove(&cat.id).unwrap_or_default();
        Ok(CatWithReviews { cat, reviews })
      })
      .collect()
  }

  async fn remove_memberships_for_cat(&self, cat_id: CatId) -> Result<u64> {
    let removed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM cats_in_lists WHERE cat_id = ?1",
          rusqlite::params![cat_id.get()],
        )?)
      })
      .await?;

    Ok(removed as u64)
  }
}
