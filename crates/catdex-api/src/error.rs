//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! This is the only place core outcomes are turned into HTTP status codes.

use axum::{
  Json,
  extract::rejection::JsonRejection,
  http::{HeaderValue, StatusCode, header},
  response::{IntoResponse, Response},
};
use catdex_core::Error as CoreError;
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error(transparent)]
  Core(#[from] CoreError),

  /// The body was not JSON at all.
  #[error(transparent)]
  Body(#[from] JsonRejection),

  /// The body was JSON of the wrong shape.
  #[error("invalid request body: {0}")]
  InvalidBody(#[from] serde_json::Error),
}

impl ApiError {
  /// Wrap a backend error, keeping its integrity/not-found classification.
  pub fn store(e: impl Into<CoreError>) -> Self { Self::Core(e.into()) }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let core = match self {
      ApiError::Core(e) => e,
      ApiError::Body(rejection) => return rejection.into_response(),
      ApiError::InvalidBody(e) => {
        return (
          StatusCode::UNPROCESSABLE_ENTITY,
          Json(json!({ "error": e.to_string() })),
        )
          .into_response();
      }
    };

    match &core {
      CoreError::NotFound { .. } => {
        (StatusCode::NOT_FOUND, Json(json!({ "error": core.to_string() })))
          .into_response()
      }
      CoreError::Forbidden(_) => {
        (StatusCode::FORBIDDEN, Json(json!({ "error": core.to_string() })))
          .into_response()
      }
      CoreError::Unauthenticated => {
        let mut res = (
          StatusCode::UNAUTHORIZED,
          Json(json!({ "error": core.to_string() })),
        )
          .into_response();
        res.headers_mut().insert(
          header::WWW_AUTHENTICATE,
          HeaderValue::from_static("Basic realm=\"catdex\""),
        );
        res
      }
      CoreError::Validation(errors) => (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({ "error": "validation failed", "errors": errors })),
      )
        .into_response(),
      CoreError::Integrity(_) | CoreError::Store(_) => {
        tracing::error!(error = %core, "unexpected failure");
        (
          StatusCode::INTERNAL_SERVER_ERROR,
          Json(json!({ "error": "internal error" })),
        )
          .into_response()
      }
    }
  }
}
