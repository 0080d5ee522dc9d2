//! Integration tests for `SqliteStore` and the core managers against an
//! in-memory database.

use catdex_core::{
  Entity, Error as CoreError, Identity,
  cat::{CatFields, CatUpdate, NewCat},
  id::{CatId, ListId, UserId},
  lifecycle::CatManager,
  list::NewCatList,
  membership::ListManager,
  review::{NewReview, ReviewFields},
  store::CatalogStore,
  user::User,
};

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

async fn user(s: &SqliteStore, name: &str) -> User {
  s.create_user(name.into(), "$argon2id$stub".into()).await.unwrap()
}

fn milo_fields() -> CatFields {
  CatFields {
    name:     "Milo".into(),
    breed:    "Tabby".into(),
    size:     "Medium".into(),
    friendly: "yes".into(),
    coat:     "Orange".into(),
    img_url:  None,
  }
}

fn review(body: &str, rating: u8) -> ReviewFields {
  ReviewFields { body: body.into(), rating }
}

/// Rows in `table` whose `cat_id` column matches.
async fn count_for_cat(s: &SqliteStore, table: &'static str, cat_id: CatId) -> i64 {
  s.conn
    .call(move |conn| {
      Ok(conn.query_row(
        &format!("SELECT COUNT(*) FROM {table} WHERE cat_id = ?1"),
        rusqlite::params![cat_id.get()],
        |r| r.get(0),
      )?)
    })
    .await
    .unwrap()
}

// ─── Users ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_find_user() {
  let s = store().await;
  let alice = user(&s, "alice").await;

  let fetched = s.get_user(alice.id).await.unwrap().unwrap();
  assert_eq!(fetched, alice);

  let creds = s.find_credentials("alice".into()).await.unwrap().unwrap();
  assert_eq!(creds.user.id, alice.id);
  assert_eq!(creds.password_hash, "$argon2id$stub");

  assert!(s.find_credentials("bob".into()).await.unwrap().is_none());
}

#[tokio::test]
async fn duplicate_username_is_an_integrity_error() {
  let s = store().await;
  user(&s, "alice").await;

  let err = s
    .create_user("alice".into(), "x".into())
    .await
    .unwrap_err();
  assert!(err.is_constraint_violation());
  assert!(matches!(CoreError::from(err), CoreError::Integrity(_)));
}

// ─── Cats ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn insert_and_get_cat() {
  let s = store().await;
  let alice = user(&s, "alice").await;

  let cat = s
    .insert_cat(NewCat { fields: milo_fields(), user_id: alice.id })
    .await
    .unwrap();
  assert_eq!(cat.user_id, alice.id);

  let fetched = s.get_cat(cat.id).await.unwrap().unwrap();
  assert_eq!(fetched, cat);
}

#[tokio::test]
async fn get_cat_missing_returns_none() {
  let s = store().await;
  assert!(s.get_cat(CatId(42)).await.unwrap().is_none());
}

#[tokio::test]
async fn list_cats_in_id_order() {
  let s = store().await;
  let alice = user(&s, "alice").await;
  for name in ["Milo", "Luna", "Oscar"] {
    let mut fields = milo_fields();
    fields.name = name.into();
    s.insert_cat(NewCat { fields, user_id: alice.id }).await.unwrap();
  }

  let names: Vec<_> = s
    .list_cats()
    .await
    .unwrap()
    .into_iter()
    .map(|c| c.name)
    .collect();
  assert_eq!(names, ["Milo", "Luna", "Oscar"]);
}

#[tokio::test]
async fn cat_with_dangling_owner_is_rejected() {
  let s = store().await;
  let err = s
    .insert_cat(NewCat { fields: milo_fields(), user_id: UserId(999) })
    .await
    .unwrap_err();
  assert!(err.is_constraint_violation());
}

#[tokio::test]
async fn update_cat_rewrites_fields_but_not_owner() {
  let s = store().await;
  let alice = user(&s, "alice").await;
  let cat = s
    .insert_cat(NewCat { fields: milo_fields(), user_id: alice.id })
    .await
    .unwrap();

  let mut fields = milo_fields();
  fields.coat = "Ginger".into();
  fields.img_url = Some("https://example.com/milo.jpg".into());

  let updated = s.update_cat(cat.id, fields.into()).await.unwrap().unwrap();
  assert_eq!(updated.coat, "Ginger");
  assert_eq!(updated.img_url.as_deref(), Some("https://example.com/milo.jpg"));
  assert_eq!(updated.user_id, alice.id);
  assert_eq!(updated.created_at, cat.created_at);
  assert!(updated.updated_at >= cat.updated_at);
}

#[tokio::test]
async fn update_missing_cat_returns_none() {
  let s = store().await;
  assert!(s.update_cat(CatId(7), milo_fields().into()).await.unwrap().is_none());
}

#[tokio::test]
async fn update_without_img_url_keeps_stored_url() {
  let s = store().await;
  let alice = user(&s, "alice").await;
  let mut fields = milo_fields();
  fields.img_url = Some("https://example.com/milo.png".into());
  let cat = s
    .insert_cat(NewCat { fields, user_id: alice.id })
    .await
    .unwrap();

  let mut edit = milo_fields();
  edit.name = "Milo II".into();
  let keep = CatUpdate { fields: edit.clone(), replace_img_url: false };
  let updated = s.update_cat(cat.id, keep).await.unwrap().unwrap();
  assert_eq!(updated.name, "Milo II");
  assert_eq!(updated.img_url.as_deref(), Some("https://example.com/milo.png"));

  let clear = CatUpdate { fields: edit, replace_img_url: true };
  let updated = s.update_cat(cat.id, clear).await.unwrap().unwrap();
  assert_eq!(updated.img_url, None);
}

// ─── Delete cascade ──────────────────────────────────────────────────────────

#[tokio::test]
async fn cascade_removes_reviews_and_memberships() {
  let s = store().await;
  let alice = user(&s, "alice").await;
  let bob = user(&s, "bob").await;
  let cat = s
    .insert_cat(NewCat { fields: milo_fields(), user_id: alice.id })
    .await
    .unwrap();

  for (author, body) in [(alice.id, "Lovely"), (bob.id, "Bitey"), (bob.id, "Fine")] {
    s.insert_review(NewReview {
      cat_id:  cat.id,
      user_id: author,
      fields:  review(body, 3),
    })
    .await
    .unwrap();
  }
  s.insert_membership(cat.id, alice.id).await.unwrap();
  s.insert_membership(cat.id, bob.id).await.unwrap();

  let report = s.destroy_cat_cascade(cat.id).await.unwrap();
  assert_eq!(report.reviews_removed, 3);
  assert_eq!(report.memberships_removed, 2);

  assert!(s.get_cat(cat.id).await.unwrap().is_none());
  assert_eq!(count_for_cat(&s, "reviews", cat.id).await, 0);
  assert_eq!(count_for_cat(&s, "cats_in_lists", cat.id).await, 0);
}

#[tokio::test]
async fn cascade_leaves_other_cats_alone() {
  let s = store().await;
  let alice = user(&s, "alice").await;
  let milo = s
    .insert_cat(NewCat { fields: milo_fields(), user_id: alice.id })
    .await
    .unwrap();
  let luna = s
    .insert_cat(NewCat { fields: milo_fields(), user_id: alice.id })
    .await
    .unwrap();
  s.insert_review(NewReview { cat_id: luna.id, user_id: alice.id, fields: review("Sweet", 5) })
    .await
    .unwrap();
  s.insert_membership(luna.id, alice.id).await.unwrap();

  s.destroy_cat_cascade(milo.id).await.unwrap();

  assert!(s.get_cat(luna.id).await.unwrap().is_some());
  assert_eq!(count_for_cat(&s, "reviews", luna.id).await, 1);
  assert_eq!(count_for_cat(&s, "cats_in_lists", luna.id).await, 1);
}

#[tokio::test]
async fn cascade_on_missing_cat_is_not_found() {
  let s = store().await;
  let err = s.destroy_cat_cascade(CatId(5)).await.unwrap_err();
  assert!(matches!(err, Error::NotFound { entity: Entity::Cat, id: 5 }));
}

#[tokio::test]
async fn cascade_is_all_or_nothing() {
  let s = store().await;
  let alice = user(&s, "alice").await;
  let cat = s
    .insert_cat(NewCat { fields: milo_fields(), user_id: alice.id })
    .await
    .unwrap();
  s.insert_review(NewReview { cat_id: cat.id, user_id: alice.id, fields: review("Lovely", 5) })
    .await
    .unwrap();
  s.insert_membership(cat.id, alice.id).await.unwrap();

  // Make the final step of the cascade fail.
  s.conn
    .call(|conn| {
      conn.execute_batch(
        "CREATE TRIGGER block_cat_delete BEFORE DELETE ON cats
         BEGIN SELECT RAISE(ABORT, 'cat delete blocked'); END;",
      )?;
      Ok(())
    })
    .await
    .unwrap();

  assert!(s.destroy_cat_cascade(cat.id).await.is_err());

  assert!(s.get_cat(cat.id).await.unwrap().is_some());
  assert_eq!(count_for_cat(&s, "reviews", cat.id).await, 1);
  assert_eq!(count_for_cat(&s, "cats_in_lists", cat.id).await, 1);
}

#[tokio::test]
async fn deleted_ids_are_not_reused() {
  let s = store().await;
  let alice = user(&s, "alice").await;
  let first = s
    .insert_cat(NewCat { fields: milo_fields(), user_id: alice.id })
    .await
    .unwrap();
  s.destroy_cat_cascade(first.id).await.unwrap();

  let second = s
    .insert_cat(NewCat { fields: milo_fields(), user_id: alice.id })
    .await
    .unwrap();
  assert_ne!(first.id, second.id);
}

// ─── Reviews ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn reviews_for_cat_oldest_first() {
  let s = store().await;
  let alice = user(&s, "alice").await;
  let cat = s
    .insert_cat(NewCat { fields: milo_fields(), user_id: alice.id })
    .await
    .unwrap();
  s.insert_review(NewReview { cat_id: cat.id, user_id: alice.id, fields: review("First", 4) })
    .await
    .unwrap();
  s.insert_review(NewReview { cat_id: cat.id, user_id: alice.id, fields: review("Second", 2) })
    .await
    .unwrap();

  let reviews = s.reviews_for_cat(cat.id).await.unwrap();
  let bodies: Vec<_> = reviews.iter().map(|r| r.body.as_str()).collect();
  assert_eq!(bodies, ["First", "Second"]);
  assert_eq!(reviews[1].rating, 2);
}

#[tokio::test]
async fn review_for_missing_cat_is_rejected() {
  let s = store().await;
  let alice = user(&s, "alice").await;
  let err = s
    .insert_review(NewReview { cat_id: CatId(3), user_id: alice.id, fields: review("?", 1) })
    .await
    .unwrap_err();
  assert!(err.is_constraint_violation());
}

// ─── Lists and memberships ───────────────────────────────────────────────────

#[tokio::test]
async fn lists_are_scoped_to_owner() {
  let s = store().await;
  let alice = user(&s, "alice").await;
  let bob = user(&s, "bob").await;
  s.insert_list(NewCatList { name: "Favourites".into(), user_id: alice.id })
    .await
    .unwrap();
  s.insert_list(NewCatList { name: "Bob's".into(), user_id: bob.id })
    .await
    .unwrap();

  let lists = s.lists_owned_by(alice.id).await.unwrap();
  assert_eq!(lists.len(), 1);
  assert_eq!(lists[0].name, "Favourites");

  let fetched = s.get_list(lists[0].id).await.unwrap().unwrap();
  assert_eq!(fetched, lists[0]);
  assert!(s.get_list(ListId(99)).await.unwrap().is_none());
}

#[tokio::test]
async fn repeat_membership_returns_existing_row() {
  let s = store().await;
  let alice = user(&s, "alice").await;
  let cat = s
    .insert_cat(NewCat { fields: milo_fields(), user_id: alice.id })
    .await
    .unwrap();

  let first = s.insert_membership(cat.id, alice.id).await.unwrap();
  let second = s.insert_membership(cat.id, alice.id).await.unwrap();
  assert_eq!(first, second);
  assert_eq!(count_for_cat(&s, "cats_in_lists", cat.id).await, 1);
}

#[tokio::test]
async fn membership_with_dangling_user_is_integrity_error() {
  let s = store().await;
  let alice = user(&s, "alice").await;
  let cat = s
    .insert_cat(NewCat { fields: milo_fields(), user_id: alice.id })
    .await
    .unwrap();

  let err = s.insert_membership(cat.id, UserId(404)).await.unwrap_err();
  assert!(matches!(CoreError::from(err), CoreError::Integrity(_)));
}

#[tokio::test]
async fn remove_memberships_twice_is_a_no_op() {
  let s = store().await;
  let alice = user(&s, "alice").await;
  let bob = user(&s, "bob").await;
  let cat = s
    .insert_cat(NewCat { fields: milo_fields(), user_id: alice.id })
    .await
    .unwrap();
  s.insert_membership(cat.id, alice.id).await.unwrap();
  s.insert_membership(cat.id, bob.id).await.unwrap();

  let lists = ListManager::new(&s);
  assert_eq!(lists.remove_memberships_for_cat(cat.id).await.unwrap(), 2);
  assert_eq!(lists.remove_memberships_for_cat(cat.id).await.unwrap(), 0);
  assert!(s.get_cat(cat.id).await.unwrap().is_some());
}

#[tokio::test]
async fn member_cats_with_reviews_groups_by_cat() {
  let s = store().await;
  let alice = user(&s, "alice").await;
  let bob = user(&s, "bob").await;
  let milo = s
    .insert_cat(NewCat { fields: milo_fields(), user_id: bob.id })
    .await
    .unwrap();
  let mut luna_fields = milo_fields();
  luna_fields.name = "Luna".into();
  let luna = s
    .insert_cat(NewCat { fields: luna_fields, user_id: bob.id })
    .await
    .unwrap();
  s.insert_review(NewReview { cat_id: milo.id, user_id: bob.id, fields: review("a", 5) })
    .await
    .unwrap();
  s.insert_review(NewReview { cat_id: milo.id, user_id: alice.id, fields: review("b", 4) })
    .await
    .unwrap();
  s.insert_membership(milo.id, alice.id).await.unwrap();
  s.insert_membership(luna.id, alice.id).await.unwrap();
  // Bob's membership must not show up in Alice's context.
  s.insert_membership(milo.id, bob.id).await.unwrap();

  let members = s.member_cats_with_reviews(alice.id).await.unwrap();
  assert_eq!(members.len(), 2);
  assert_eq!(members[0].cat.id, milo.id);
  assert_eq!(members[0].reviews.len(), 2);
  assert_eq!(members[1].cat.id, luna.id);
  assert!(members[1].reviews.is_empty());
}

// ─── Cat lifecycle manager ───────────────────────────────────────────────────

#[tokio::test]
async fn milo_end_to_end() {
  let s = store().await;
  let owner = user(&s, "owner").await;
  let other = user(&s, "other").await;
  let cats = CatManager::new(&s);

  let cat = cats.create(milo_fields(), owner.id).await.unwrap();
  assert_eq!(cat.user_id, owner.id);
  assert_eq!(cat.name, "Milo");
  assert_eq!(cat.friendly, "yes");

  let mut edit = milo_fields();
  edit.name = "Not Milo".into();
  let err = cats
    .update(cat.id, edit, &Identity::User(other.id))
    .await
    .unwrap_err();
  assert!(matches!(err, CoreError::Forbidden(Entity::Cat)));

  cats
    .add_review(cat.id, review("Great cat", 5), &Identity::User(other.id))
    .await
    .unwrap();
  ListManager::new(&s).add_membership(cat.id, owner.id).await.unwrap();

  let report = cats.delete(cat.id, &Identity::User(owner.id)).await.unwrap();
  assert_eq!(report.reviews_removed, 1);
  assert_eq!(report.memberships_removed, 1);

  assert!(s.get_cat(cat.id).await.unwrap().is_none());
  assert_eq!(count_for_cat(&s, "reviews", cat.id).await, 0);
  assert_eq!(count_for_cat(&s, "cats_in_lists", cat.id).await, 0);
}

#[tokio::test]
async fn non_owner_cannot_change_or_delete() {
  let s = store().await;
  let owner = user(&s, "owner").await;
  let other = user(&s, "other").await;
  let cats = CatManager::new(&s);
  let cat = cats.create(milo_fields(), owner.id).await.unwrap();
  s.insert_review(NewReview { cat_id: cat.id, user_id: owner.id, fields: review("Mine", 5) })
    .await
    .unwrap();

  let mut edit = milo_fields();
  edit.breed = "Siamese".into();
  let err = cats
    .update(cat.id, edit, &Identity::User(other.id))
    .await
    .unwrap_err();
  assert!(matches!(err, CoreError::Forbidden(_)));

  let err = cats.delete(cat.id, &Identity::User(other.id)).await.unwrap_err();
  assert!(matches!(err, CoreError::Forbidden(_)));

  assert_eq!(s.get_cat(cat.id).await.unwrap().unwrap(), cat);
  assert_eq!(count_for_cat(&s, "reviews", cat.id).await, 1);
}

#[tokio::test]
async fn owner_update_applies_fields() {
  let s = store().await;
  let owner = user(&s, "owner").await;
  let cats = CatManager::new(&s);
  let cat = cats.create(milo_fields(), owner.id).await.unwrap();

  let mut edit = milo_fields();
  edit.size = "Large".into();
  let updated = cats
    .update(cat.id, edit, &Identity::User(owner.id))
    .await
    .unwrap();
  assert_eq!(updated.size, "Large");
  assert_eq!(updated.user_id, owner.id);
}

#[tokio::test]
async fn owner_update_without_img_url_keeps_it() {
  let s = store().await;
  let owner = user(&s, "owner").await;
  let cats = CatManager::new(&s);
  let mut fields = milo_fields();
  fields.img_url = Some("https://example.com/milo.png".into());
  let cat = cats.create(fields, owner.id).await.unwrap();

  let mut edit = milo_fields();
  edit.coat = "Ginger".into();
  let update = CatUpdate { fields: edit, replace_img_url: false };
  let updated = cats
    .update(cat.id, update, &Identity::User(owner.id))
    .await
    .unwrap();
  assert_eq!(updated.coat, "Ginger");
  assert_eq!(updated.img_url.as_deref(), Some("https://example.com/milo.png"));
}

#[tokio::test]
async fn anonymous_writes_are_unauthenticated() {
  let s = store().await;
  let owner = user(&s, "owner").await;
  let cats = CatManager::new(&s);
  let cat = cats.create(milo_fields(), owner.id).await.unwrap();

  let err = cats
    .update(cat.id, milo_fields(), &Identity::Anonymous)
    .await
    .unwrap_err();
  assert!(matches!(err, CoreError::Unauthenticated));

  // Identity is checked before existence.
  let err = cats.delete(CatId(999), &Identity::Anonymous).await.unwrap_err();
  assert!(matches!(err, CoreError::Unauthenticated));
}

#[tokio::test]
async fn missing_cat_is_not_found_before_ownership() {
  let s = store().await;
  let owner = user(&s, "owner").await;
  let cats = CatManager::new(&s);

  let err = cats
    .update(CatId(12), milo_fields(), &Identity::User(owner.id))
    .await
    .unwrap_err();
  assert!(matches!(err, CoreError::NotFound { entity: Entity::Cat, id: 12 }));

  let err = cats.delete(CatId(12), &Identity::User(owner.id)).await.unwrap_err();
  assert!(matches!(err, CoreError::NotFound { entity: Entity::Cat, id: 12 }));
}

#[tokio::test]
async fn deleted_cat_is_terminal() {
  let s = store().await;
  let owner = user(&s, "owner").await;
  let me = Identity::User(owner.id);
  let cats = CatManager::new(&s);
  let cat = cats.create(milo_fields(), owner.id).await.unwrap();
  cats.delete(cat.id, &me).await.unwrap();

  assert!(matches!(cats.get(cat.id).await, Err(CoreError::NotFound { .. })));
  assert!(matches!(
    cats.update(cat.id, milo_fields(), &me).await,
    Err(CoreError::NotFound { .. })
  ));
  assert!(matches!(cats.delete(cat.id, &me).await, Err(CoreError::NotFound { .. })));
}

#[tokio::test]
async fn create_rejects_unvalidated_fields() {
  let s = store().await;
  let owner = user(&s, "owner").await;
  let cats = CatManager::new(&s);

  let mut fields = milo_fields();
  fields.name = "M".repeat(51);
  fields.coat = "  ".into();

  let errors = match cats.create(fields, owner.id).await {
    Err(CoreError::Validation(errors)) => errors,
    other => panic!("expected validation error, got {other:?}"),
  };
  let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
  assert_eq!(fields, ["name", "coat"]);
  assert!(errors[0].message.contains("50 characters"));

  assert!(s.list_cats().await.unwrap().is_empty());
}

#[tokio::test]
async fn get_includes_reviews() {
  let s = store().await;
  let owner = user(&s, "owner").await;
  let cats = CatManager::new(&s);
  let cat = cats.create(milo_fields(), owner.id).await.unwrap();
  cats
    .add_review(cat.id, review("Purrs", 4), &Identity::User(owner.id))
    .await
    .unwrap();

  let view = cats.get(cat.id).await.unwrap();
  assert_eq!(view.cat, cat);
  assert_eq!(view.reviews.len(), 1);
  assert_eq!(view.reviews[0].body, "Purrs");
}

#[tokio::test]
async fn review_requires_identity_and_cat() {
  let s = store().await;
  let owner = user(&s, "owner").await;
  let cats = CatManager::new(&s);

  let err = cats
    .add_review(CatId(1), review("x", 1), &Identity::Anonymous)
    .await
    .unwrap_err();
  assert!(matches!(err, CoreError::Unauthenticated));

  let err = cats
    .add_review(CatId(1), review("x", 1), &Identity::User(owner.id))
    .await
    .unwrap_err();
  assert!(matches!(err, CoreError::NotFound { entity: Entity::Cat, .. }));
}

// ─── List membership manager ─────────────────────────────────────────────────

#[tokio::test]
async fn other_users_list_looks_missing() {
  let s = store().await;
  let alice = user(&s, "alice").await;
  let bob = user(&s, "bob").await;
  let lists = ListManager::new(&s);
  let bobs = lists.create("Bob's cats".into(), &Identity::User(bob.id)).await.unwrap();

  let foreign = lists
    .get_detail(bobs.id, &Identity::User(alice.id))
    .await
    .unwrap_err();
  let missing_id = ListId(bobs.id.get() + 100);
  let missing = lists
    .get_detail(missing_id, &Identity::User(alice.id))
    .await
    .unwrap_err();

  assert!(matches!(foreign, CoreError::NotFound { entity: Entity::CatList, .. }));
  assert!(matches!(missing, CoreError::NotFound { entity: Entity::CatList, .. }));
}

#[tokio::test]
async fn list_detail_assembles_cats_and_reviews() {
  let s = store().await;
  let alice = user(&s, "alice").await;
  let me = Identity::User(alice.id);
  let cats = CatManager::new(&s);
  let lists = ListManager::new(&s);

  let list = lists.create("Favourites".into(), &me).await.unwrap();
  let cat = cats.create(milo_fields(), alice.id).await.unwrap();
  cats.add_review(cat.id, review("Best", 5), &me).await.unwrap();
  lists.add_membership(cat.id, alice.id).await.unwrap();

  let detail = lists.get_detail(list.id, &me).await.unwrap();
  assert_eq!(detail.list, list);
  assert_eq!(detail.cats.len(), 1);
  assert_eq!(detail.cats[0].cat.id, cat.id);
  assert_eq!(detail.cats[0].reviews[0].body, "Best");
}

#[tokio::test]
async fn list_detail_requires_identity() {
  let s = store().await;
  let alice = user(&s, "alice").await;
  let lists = ListManager::new(&s);
  let list = lists.create("Mine".into(), &Identity::User(alice.id)).await.unwrap();

  let err = lists.get_detail(list.id, &Identity::Anonymous).await.unwrap_err();
  assert!(matches!(err, CoreError::Unauthenticated));
}

#[tokio::test]
async fn list_owned_by_returns_only_own_lists_with_members() {
  let s = store().await;
  let alice = user(&s, "alice").await;
  let bob = user(&s, "bob").await;
  let cats = CatManager::new(&s);
  let lists = ListManager::new(&s);

  lists.create("A1".into(), &Identity::User(alice.id)).await.unwrap();
  lists.create("A2".into(), &Identity::User(alice.id)).await.unwrap();
  lists.create("B1".into(), &Identity::User(bob.id)).await.unwrap();
  let cat = cats.create(milo_fields(), bob.id).await.unwrap();
  lists.add_membership(cat.id, alice.id).await.unwrap();

  let owned = lists.list_owned_by(alice.id).await.unwrap();
  let names: Vec<_> = owned.iter().map(|l| l.list.name.as_str()).collect();
  assert_eq!(names, ["A1", "A2"]);
  assert!(owned.iter().all(|l| l.list.user_id == alice.id));
  assert!(owned.iter().all(|l| l.cats.len() == 1 && l.cats[0].id == cat.id));

  let bobs = lists.list_owned_by(bob.id).await.unwrap();
  assert_eq!(bobs.len(), 1);
  assert!(bobs[0].cats.is_empty());
}

#[tokio::test]
async fn add_membership_for_missing_cat_is_not_found() {
  let s = store().await;
  let alice = user(&s, "alice").await;
  let err = ListManager::new(&s)
    .add_membership(CatId(77), alice.id)
    .await
    .unwrap_err();
  assert!(matches!(err, CoreError::NotFound { entity: Entity::Cat, id: 77 }));
}
