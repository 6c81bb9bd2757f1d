//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Every failure leaves the service as `{"error": {"name": ..., "message": ...}}`
//! with a fixed status per variant.

use axum::{
  Json,
  extract::rejection::JsonRejection,
  http::{HeaderValue, StatusCode, header},
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("unauthorized: {0}")]
  Unauthorized(String),

  #[error("forbidden: {0}")]
  Forbidden(String),

  #[error("not found: {0}")]
  NotFound(String),

  #[error("validation failed: {0}")]
  Validation(String),

  #[error("internal error: {0}")]
  Internal(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  /// Box a backend error. Usable directly in `map_err`.
  pub fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    ApiError::Store(Box::new(e))
  }

  pub fn status(&self) -> StatusCode {
    match self {
      ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
      ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
      ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
      ApiError::Internal(_) | ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn name(&self) -> &'static str {
    match self {
      ApiError::BadRequest(_) => "BadRequest",
      ApiError::Unauthorized(_) => "Unauthorized",
      ApiError::Forbidden(_) => "Forbidden",
      ApiError::NotFound(_) => "NotFound",
      ApiError::Validation(_) => "ValidationError",
      ApiError::Internal(_) | ApiError::Store(_) => "ServerError",
    }
  }
}

impl From<roster_core::Error> for ApiError {
  fn from(e: roster_core::Error) -> Self {
    match e {
      roster_core::Error::MissingField(_) => ApiError::Validation(e.to_string()),
      roster_core::Error::NotOwner { .. } => ApiError::Forbidden(e.to_string()),
    }
  }
}

impl From<JsonRejection> for ApiError {
  fn from(rejection: JsonRejection) -> Self {
    match rejection {
      JsonRejection::JsonDataError(e) => ApiError::Validation(e.body_text()),
      other => ApiError::BadRequest(other.body_text()),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    let message = match &self {
      ApiError::BadRequest(m)
      | ApiError::Unauthorized(m)
      | ApiError::Forbidden(m)
      | ApiError::NotFound(m)
      | ApiError::Validation(m)
      | ApiError::Internal(m) => m.clone(),
      ApiError::Store(e) => e.to_string(),
    };

    if status.is_server_error() {
      tracing::error!(error = %self, "request failed");
    }

    let body = Json(json!({ "error": { "name": self.name(), "message": message } }));
    let mut res = (status, body).into_response();
    if status == StatusCode::UNAUTHORIZED {
      res
        .headers_mut()
        .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
    }
    res
  }
}

#[cfg(test)]
mod tests {
  use uuid::Uuid;

  use super::*;

  #[test]
  fn core_errors_map_to_fixed_statuses() {
    let missing: ApiError = roster_core::Error::MissingField("address").into();
    assert_eq!(missing.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let not_owner: ApiError = roster_core::Error::NotOwner {
      requester:      Uuid::new_v4(),
      subordinate_id: Uuid::new_v4(),
    }
    .into();
    assert_eq!(not_owner.status(), StatusCode::FORBIDDEN);
  }

  #[test]
  fn unauthorized_carries_challenge_header() {
    let res = ApiError::Unauthorized("no token".into()).into_response();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(res.headers()[header::WWW_AUTHENTICATE], "Bearer");
  }

  #[test]
  fn store_errors_are_server_errors() {
    let err = ApiError::store(std::io::Error::other("disk on fire"));
    assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(err.name(), "ServerError");
  }
}
