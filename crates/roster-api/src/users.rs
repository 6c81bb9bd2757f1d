//! Handlers for account endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `POST`   | `/sign-up` | Body: `{"credentials":{email,password,password_confirmation}}`; returns 201 |
//! | `POST`   | `/sign-in` | Body: `{"credentials":{email,password}}`; returns 201 + a fresh token |
//! | `PATCH`  | `/change-password` | Bearer; body: `{"passwords":{old,new}}`; returns 204 |
//! | `DELETE` | `/sign-out` | Bearer; invalidates the current token; returns 204 |

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use roster_core::{
  store::RosterStore,
  user::{NewUser, User},
};
use serde::{Deserialize, Serialize};

use crate::{
  auth::{AuthUser, generate_token, token_digest},
  error::ApiError,
  extract::ApiJson,
  password::{hash_password, verify_password},
};

#[derive(Debug, Serialize)]
pub struct UserResponse<U> {
  pub user: U,
}

/// A user as returned by sign-in: the account plus its new bearer token.
#[derive(Debug, Serialize)]
pub struct SignedInUser {
  #[serde(flatten)]
  pub user:  User,
  pub token: String,
}

/// Emails are matched case-insensitively; they are stored trimmed and
/// lowercased.
fn normalize_email(raw: &str) -> String { raw.trim().to_lowercase() }

// ─── Sign up ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SignUpBody {
  pub credentials: SignUpCredentials,
}

#[derive(Debug, Deserialize)]
pub struct SignUpCredentials {
  pub email:                 String,
  pub password:              String,
  pub password_confirmation: String,
}

/// `POST /sign-up`
pub async fn sign_up<S>(
  State(store): State<Arc<S>>,
  ApiJson(body): ApiJson<SignUpBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RosterStore,
{
  let creds = body.credentials;
  let email = normalize_email(&creds.email);
  if email.is_empty() {
    return Err(ApiError::Validation("email is required".into()));
  }
  if creds.password.is_empty() {
    return Err(ApiError::Validation("password is required".into()));
  }
  if creds.password != creds.password_confirmation {
    return Err(ApiError::Validation(
      "password and password_confirmation do not match".into(),
    ));
  }

  let user = store
    .add_user(NewUser {
      email,
      password_hash: hash_password(&creds.password)?,
    })
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::Validation("email is already registered".into()))?;

  tracing::info!(user = %user.id, "user signed up");
  Ok((StatusCode::CREATED, Json(UserResponse { user })))
}

// ─── Sign in ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SignInBody {
  pub credentials: SignInCredentials,
}

#[derive(Debug, Deserialize)]
pub struct SignInCredentials {
  pub email:    String,
  pub password: String,
}

/// `POST /sign-in` — issues a new token, replacing any previous one.
pub async fn sign_in<S>(
  State(store): State<Arc<S>>,
  ApiJson(body): ApiJson<SignInBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RosterStore,
{
  let creds = body.credentials;
  let rejected = || ApiError::Unauthorized("invalid email or password".into());

  let stored = store
    .find_user_by_email(&normalize_email(&creds.email))
    .await
    .map_err(ApiError::store)?
    .ok_or_else(rejected)?;

  if !verify_password(&creds.password, &stored.password_hash) {
    return Err(rejected());
  }

  let token = generate_token();
  store
    .set_token(stored.user.id, Some(token_digest(&token)))
    .await
    .map_err(ApiError::store)?;

  tracing::info!(user = %stored.user.id, "user signed in");
  Ok((
    StatusCode::CREATED,
    Json(UserResponse {
      user: SignedInUser {
        user: stored.user,
        token,
      },
    }),
  ))
}

// ─── Change password ──────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ChangePasswordBody {
  pub passwords: Passwords,
}

#[derive(Debug, Deserialize)]
pub struct Passwords {
  pub old: String,
  pub new: String,
}

/// `PATCH /change-password`
pub async fn change_password<S>(
  State(store): State<Arc<S>>,
  AuthUser(user): AuthUser,
  ApiJson(body): ApiJson<ChangePasswordBody>,
) -> Result<StatusCode, ApiError>
where
  S: RosterStore,
{
  let stored = store
    .get_user(user.id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::Unauthorized("account no longer exists".into()))?;

  if !verify_password(&body.passwords.old, &stored.password_hash) {
    return Err(ApiError::Validation("old password is incorrect".into()));
  }
  if body.passwords.new.is_empty() {
    return Err(ApiError::Validation("new password is required".into()));
  }

  store
    .set_password_hash(user.id, hash_password(&body.passwords.new)?)
    .await
    .map_err(ApiError::store)?;

  tracing::info!(user = %user.id, "password changed");
  Ok(StatusCode::NO_CONTENT)
}

// ─── Sign out ─────────────────────────────────────────────────────────────────

/// `DELETE /sign-out`
pub async fn sign_out<S>(
  State(store): State<Arc<S>>,
  AuthUser(user): AuthUser,
) -> Result<StatusCode, ApiError>
where
  S: RosterStore,
{
  store
    .set_token(user.id, None)
    .await
    .map_err(ApiError::store)?;

  tracing::info!(user = %user.id, "user signed out");
  Ok(StatusCode::NO_CONTENT)
}
