//! Handlers for `/lists` endpoints. Every route requires a signed-in caller
//! and only ever shows the caller's own lists.

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use catdex_core::{
  Error as CoreError,
  id::ListId,
  list::{ListDetail, ListWithCats},
  membership::ListManager,
  store::CatalogStore,
  validate::validate_list_name,
};
use serde::Deserialize;

use crate::{AppState, JsonBody, auth::Requester, decode_body, error::ApiError};

/// `GET /lists`
pub async fn list<S>(
  State(state): State<AppState<S>>,
  Requester(identity): Requester,
) -> Result<Json<Vec<ListWithCats>>, ApiError>
where
  S: CatalogStore + Clone + 'static,
{
  let owner = identity.require()?;
  let lists = ListManager::new(state.store.as_ref())
    .list_owned_by(owner)
    .await?;
  Ok(Json(lists))
}

#[derive(Debug, Deserialize)]
pub struct CreateBody {
  #[serde(default)]
  pub name: Option<String>,
}

/// `POST /lists` body: `{"name":"Favourites"}`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  Requester(identity): Requester,
  body: JsonBody,
) -> Result<impl IntoResponse, ApiError>
where
  S: CatalogStore + Clone + 'static,
{
  identity.require()?;
  let body: CreateBody = decode_body(body)?;
  let name = validate_list_name(body.name.as_deref())
    .map_err(CoreError::Validation)?;
  let list = ListManager::new(state.store.as_ref())
    .create(name, &identity)
    .await?;
  Ok((StatusCode::CREATED, Json(list)))
}

/// `GET /lists/{id}`: 404 for lists that are missing *or* not the caller's.
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  Requester(identity): Requester,
  Path(id): Path<ListId>,
) -> Result<Json<ListDetail>, ApiError>
where
  S: CatalogStore + Clone + 'static,
{
  let detail = ListManager::new(state.store.as_ref())
    .get_detail(id, &identity)
    .await?;
  Ok(Json(detail))
}
