//! HTTP Basic identity extractor and password hashing.
//!
//! A request without an `Authorization` header is anonymous. A request that
//! carries one must present valid credentials, otherwise it is rejected as
//! unauthenticated rather than silently downgraded.

use argon2::{
  Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
  password_hash::SaltString,
};
use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, header, request::Parts};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as B64;
use catdex_core::{Error as CoreError, Identity, store::CatalogStore};
use rand_core::OsRng;

use crate::{AppState, error::ApiError};

/// The resolved identity of whoever sent the request.
pub struct Requester(pub Identity);

/// Hash a password into an argon2 PHC string for the `users` table.
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
  let salt = SaltString::generate(&mut OsRng);
  Ok(
    Argon2::default()
      .hash_password(password.as_bytes(), &salt)?
      .to_string(),
  )
}

/// Split a `Basic` authorization header into username and password.
fn parse_basic(headers: &HeaderMap) -> Result<Option<(String, String)>, CoreError> {
  let Some(value) = headers.get(header::AUTHORIZATION) else {
    return Ok(None);
  };

  let encoded = value
    .to_str()
    .ok()
    .and_then(|v| v.strip_prefix("Basic "))
    .ok_or(CoreError::Unauthenticated)?;
  let decoded = B64.decode(encoded).map_err(|_| CoreError::Unauthenticated)?;
  let creds = String::from_utf8(decoded).map_err(|_| CoreError::Unauthenticated)?;

  let (user, pass) = creds.split_once(':').ok_or(CoreError::Unauthenticated)?;
  Ok(Some((user.to_owned(), pass.to_owned())))
}

/// Resolve request headers to an [`Identity`] by checking the credentials
/// against the store.
pub async fn resolve_identity<S: CatalogStore>(
  headers: &HeaderMap,
  store: &S,
) -> Result<Identity, ApiError> {
  let Some((username, password)) = parse_basic(headers)? else {
    return Ok(Identity::Anonymous);
  };

  let creds = store
    .find_credentials(username)
    .await
    .map_err(ApiError::store)?
    .ok_or(CoreError::Unauthenticated)?;

  let parsed_hash = PasswordHash::new(&creds.password_hash)
    .map_err(|_| CoreError::Unauthenticated)?;
  Argon2::default()
    .verify_password(password.as_bytes(), &parsed_hash)
    .map_err(|_| CoreError::Unauthenticated)?;

  Ok(Identity::User(creds.user.id))
}

impl<S> FromRequestParts<AppState<S>> for Requester
where
  S: CatalogStore + Clone + 'static,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    resolve_identity(&parts.headers, state.store.as_ref())
      .await
      .map(Requester)
  }
}
