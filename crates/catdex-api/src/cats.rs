//! Handlers for `/cats` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/cats` | Public |
//! | `POST`   | `/cats` | Body: cat fields; returns 201 |
//! | `GET`    | `/cats/{id}` | Public; includes reviews |
//! | `PUT`    | `/cats/{id}` | Owner only |
//! | `DELETE` | `/cats/{id}` | Owner only; removes reviews and memberships |
//! | `POST`   | `/cats/{id}/reviews` | Body: `{"body":"…","rating":1-5}` |
//! | `POST`   | `/cats/{id}/membership` | Adds the cat to the caller's lists |

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use catdex_core::{
  Error as CoreError,
  cat::{Cat, CatWithReviews},
  id::CatId,
  lifecycle::CatManager,
  membership::ListManager,
  store::CatalogStore,
  validate::{RawCatFields, RawReviewFields, validate_cat, validate_review},
};
use serde_json::json;

use crate::{AppState, JsonBody, auth::Requester, decode_body, error::ApiError};

// ─── Reads ────────────────────────────────────────────────────────────────────

/// `GET /cats`
pub async fn list<S>(
  State(state): State<AppState<S>>,
) -> Result<Json<Vec<Cat>>, ApiError>
where
  S: CatalogStore + Clone + 'static,
{
  let cats = CatManager::new(state.store.as_ref()).list().await?;
  Ok(Json(cats))
}

/// `GET /cats/{id}`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<CatId>,
) -> Result<Json<CatWithReviews>, ApiError>
where
  S: CatalogStore + Clone + 'static,
{
  let cat = CatManager::new(state.store.as_ref()).get(id).await?;
  Ok(Json(cat))
}

// ─── Writes ───────────────────────────────────────────────────────────────────

/// `POST /cats`. The owner is always the authenticated caller.
pub async fn create<S>(
  State(state): State<AppState<S>>,
  Requester(identity): Requester,
  body: JsonBody,
) -> Result<impl IntoResponse, ApiError>
where
  S: CatalogStore + Clone + 'static,
{
  let owner = identity.require()?;
  let raw: RawCatFields = decode_body(body)?;
  let fields = validate_cat(&raw).map_err(CoreError::Validation)?;
  let cat = CatManager::new(state.store.as_ref()).create(fields, owner).await?;
  Ok((StatusCode::CREATED, Json(cat)))
}

/// `PUT /cats/{id}`
///
/// Permission is settled before the body is decoded, so a caller who may
/// not edit the cat never learns anything from body or validation errors.
/// An `imgUrl` left out of the body keeps the stored url.
pub async fn update<S>(
  State(state): State<AppState<S>>,
  Requester(identity): Requester,
  Path(id): Path<CatId>,
  body: JsonBody,
) -> Result<Json<Cat>, ApiError>
where
  S: CatalogStore + Clone + 'static,
{
  let cats = CatManager::new(state.store.as_ref());
  let owned = cats.load_owned(id, &identity).await?;

  let raw: RawCatFields = decode_body(body)?;
  let cat = cats.update_owned(owned, &raw).await?;
  Ok(Json(cat))
}

/// `DELETE /cats/{id}`
pub async fn delete_one<S>(
  State(state): State<AppState<S>>,
  Requester(identity): Requester,
  Path(id): Path<CatId>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CatalogStore + Clone + 'static,
{
  let report = CatManager::new(state.store.as_ref())
    .delete(id, &identity)
    .await?;
  Ok(Json(json!({
    "message": "successful",
    "reviewsRemoved": report.reviews_removed,
    "membershipsRemoved": report.memberships_removed,
  })))
}

/// `POST /cats/{id}/reviews`
pub async fn add_review<S>(
  State(state): State<AppState<S>>,
  Requester(identity): Requester,
  Path(id): Path<CatId>,
  body: JsonBody,
) -> Result<impl IntoResponse, ApiError>
where
  S: CatalogStore + Clone + 'static,
{
  identity.require()?;
  let raw: RawReviewFields = decode_body(body)?;
  let fields = validate_review(&raw).map_err(CoreError::Validation)?;
  let review = CatManager::new(state.store.as_ref())
    .add_review(id, fields, &identity)
    .await?;
  Ok((StatusCode::CREATED, Json(review)))
}

/// `POST /cats/{id}/membership`
pub async fn add_membership<S>(
  State(state): State<AppState<S>>,
  Requester(identity): Requester,
  Path(id): Path<CatId>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CatalogStore + Clone + 'static,
{
  let user_id = identity.require()?;
  let row = ListManager::new(state.store.as_ref())
    .add_membership(id, user_id)
    .await?;
  Ok((StatusCode::CREATED, Json(row)))
}
