//! Bearer-token extractor and token helpers.
//!
//! Tokens are 128 random bits rendered as hex. The store only ever sees the
//! SHA-256 digest of a token.

use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, header, request::Parts};
use rand_core::{OsRng, RngCore as _};
use roster_core::{store::RosterStore, user::User};
use sha2::{Digest, Sha256};

use crate::error::ApiError;

/// The authenticated caller. Present in a handler means the request carried a
/// valid bearer token.
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

/// Mint a fresh random bearer token.
pub fn generate_token() -> String {
  let mut bytes = [0u8; 16];
  OsRng.fill_bytes(&mut bytes);
  hex::encode(bytes)
}

/// The form in which a token is persisted and looked up.
pub fn token_digest(token: &str) -> String {
  hex::encode(Sha256::digest(token.as_bytes()))
}

/// Pull the raw token out of an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
  let value = headers
    .get(header::AUTHORIZATION)
    .ok_or_else(|| ApiError::Unauthorized("missing bearer token".into()))?
    .to_str()
    .map_err(|_| ApiError::Unauthorized("malformed authorization header".into()))?;

  let token = value
    .strip_prefix("Bearer ")
    .or_else(|| value.strip_prefix("bearer "))
    .map(str::trim)
    .ok_or_else(|| ApiError::Unauthorized("expected a bearer token".into()))?;

  if token.is_empty() {
    return Err(ApiError::Unauthorized("missing bearer token".into()));
  }
  Ok(token)
}

impl<S> FromRequestParts<Arc<S>> for AuthUser
where
  S: RosterStore + 'static,
{
  type Rejection = ApiError;

  async fn from_request_parts(parts: &mut Parts, store: &Arc<S>) -> Result<Self, Self::Rejection> {
    let digest = token_digest(bearer_token(&parts.headers)?);

    let user = store
      .find_user_by_token(&digest)
      .await
      .map_err(ApiError::store)?
      .ok_or_else(|| ApiError::Unauthorized("invalid bearer token".into()))?;

    Ok(AuthUser(user))
  }
}
