//! JSON HTTP API for catdex.
//!
//! Exposes an axum [`Router`] backed by any [`CatalogStore`]. Handlers are
//! thin: they resolve the caller, validate input, and hand over to the core
//! managers. Status codes are decided in [`error::ApiError`] and nowhere else.
//!
//! CSRF protection and session cookies are the deployment's concern; the
//! API authenticates every request with HTTP Basic credentials.

pub mod auth;
pub mod cats;
pub mod error;
pub mod lists;

pub use error::ApiError;

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::{
  Json, Router,
  extract::rejection::JsonRejection,
  routing::{get, post},
};
use catdex_core::store::CatalogStore;
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::Value;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `CATDEX_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
}

impl ServerConfig {
  /// Layer defaults, the optional TOML file at `path`, and the environment.
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .set_default("host", "127.0.0.1")?
      .set_default("port", 3000)?
      .set_default("store_path", "catdex.sqlite3")?
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("CATDEX"))
      .build()?
      .try_deserialize()
  }
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S: CatalogStore> {
  pub store: Arc<S>,
}

// ─── Request bodies ───────────────────────────────────────────────────────────

/// A JSON body whose decoding is deferred until the handler has checked
/// the caller, so identity and ownership errors win over body errors.
pub type JsonBody = Result<Json<Value>, JsonRejection>;

/// Decode a deferred body into the handler's input shape.
pub(crate) fn decode_body<T: DeserializeOwned>(
  body: JsonBody,
) -> Result<T, ApiError> {
  let Json(value) = body?;
  Ok(serde_json::from_value(value)?)
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the catdex API router for `state`.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: CatalogStore + Clone + 'static,
{
  Router::new()
    // Cats
    .route("/cats", get(cats::list::<S>).post(cats::create::<S>))
    .route(
      "/cats/{id}",
      get(cats::get_one::<S>)
        .put(cats::update::<S>)
        .delete(cats::delete_one::<S>),
    )
    .route("/cats/{id}/reviews", post(cats::add_review::<S>))
    .route("/cats/{id}/membership", post(cats::add_membership::<S>))
    // Lists
    .route("/lists", get(lists::list::<S>).post(lists::create::<S>))
    .route("/lists/{id}", get(lists::get_one::<S>))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}
