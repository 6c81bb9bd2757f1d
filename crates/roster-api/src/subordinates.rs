//! Handlers for `/subordinates` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/subordinates` | Every record, any owner |
//! | `GET`    | `/subordinates/{id}` | 404 if not found |
//! | `POST`   | `/subordinates` | Body: [`SubordinateBody`]; owner is the caller; returns 201 |
//! | `PATCH`  | `/subordinates/{id}` | Owner only; `""` fields are left unchanged; returns 204 |
//! | `DELETE` | `/subordinates/{id}` | Owner only; returns 204 |
//!
//! All routes require a bearer token.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use roster_core::{
  ownership::require_ownership,
  store::RosterStore,
  subordinate::{NewSubordinate, Subordinate, SubordinatePatch},
};
use serde::Serialize;
use uuid::Uuid;

use crate::{
  auth::AuthUser,
  error::ApiError,
  extract::{ApiJson, SubordinateBody},
};

#[derive(Debug, Serialize)]
pub struct SubordinateList {
  pub subordinates: Vec<Subordinate>,
}

#[derive(Debug, Serialize)]
pub struct SubordinateResponse {
  pub subordinate: Subordinate,
}

fn not_found(id: impl std::fmt::Display) -> ApiError {
  ApiError::NotFound(format!("subordinate {id} not found"))
}

/// A path segment that is not a UUID cannot name a record.
fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
  Uuid::parse_str(raw).map_err(|_| not_found(raw))
}

/// Load a record and check that `user` may modify it.
async fn load_owned<S>(store: &S, user: &AuthUser, id: Uuid) -> Result<Subordinate, ApiError>
where
  S: RosterStore,
{
  let record = store
    .get_subordinate(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| not_found(id))?;

  require_ownership(user.0.id, &record).inspect_err(|e| {
    tracing::warn!(%id, requester = %user.0.id, error = %e, "ownership check failed");
  })?;
  Ok(record)
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /subordinates`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  _user: AuthUser,
) -> Result<Json<SubordinateList>, ApiError>
where
  S: RosterStore,
{
  let subordinates = store.list_subordinates().await.map_err(ApiError::store)?;
  Ok(Json(SubordinateList { subordinates }))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /subordinates/{id}`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  _user: AuthUser,
  Path(raw_id): Path<String>,
) -> Result<Json<SubordinateResponse>, ApiError>
where
  S: RosterStore,
{
  let id = parse_id(&raw_id)?;
  let subordinate = store
    .get_subordinate(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| not_found(id))?;
  Ok(Json(SubordinateResponse { subordinate }))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /subordinates` — returns 201 + the stored record.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  AuthUser(user): AuthUser,
  ApiJson(body): ApiJson<SubordinateBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RosterStore,
{
  let input = NewSubordinate::from_fields(user.id, body.into_fields())?;
  let subordinate = store
    .add_subordinate(input)
    .await
    .map_err(ApiError::store)?;

  tracing::info!(id = %subordinate.id, owner = %user.id, "subordinate created");
  Ok((StatusCode::CREATED, Json(SubordinateResponse { subordinate })))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PATCH /subordinates/{id}` — owner only, returns 204.
pub async fn update<S>(
  State(store): State<Arc<S>>,
  user: AuthUser,
  Path(raw_id): Path<String>,
  ApiJson(body): ApiJson<SubordinateBody>,
) -> Result<StatusCode, ApiError>
where
  S: RosterStore,
{
  let id = parse_id(&raw_id)?;
  load_owned(store.as_ref(), &user, id).await?;

  let patch = SubordinatePatch::from(body.into_fields());
  tracing::debug!(%id, ?patch, "updating subordinate");

  store
    .update_subordinate(id, patch)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| not_found(id))?;
  Ok(StatusCode::NO_CONTENT)
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /subordinates/{id}` — owner only, returns 204.
pub async fn destroy<S>(
  State(store): State<Arc<S>>,
  user: AuthUser,
  Path(raw_id): Path<String>,
) -> Result<StatusCode, ApiError>
where
  S: RosterStore,
{
  let id = parse_id(&raw_id)?;
  load_owned(store.as_ref(), &user, id).await?;

  if !store.delete_subordinate(id).await.map_err(ApiError::store)? {
    return Err(not_found(id));
  }

  tracing::info!(%id, owner = %user.0.id, "subordinate deleted");
  Ok(StatusCode::NO_CONTENT)
}
