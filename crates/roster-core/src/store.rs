//! The `RosterStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `roster-store-sqlite`).
//! The HTTP layer depends on this abstraction, not on any concrete backend.

use std::future::Future;

use uuid::Uuid;

use crate::{
  subordinate::{NewSubordinate, Subordinate, SubordinatePatch},
  user::{NewUser, StoredUser, User},
};

/// Abstraction over a Roster storage backend.
///
/// Every method is atomic with respect to a single record. "Missing" is
/// reported through `Option`/`bool` rather than errors so callers can map it
/// to their own not-found handling.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait RosterStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Users ─────────────────────────────────────────────────────────────

  /// Create a user. Returns `None` if the email is already registered.
  fn add_user(
    &self,
    input: NewUser,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + '_;

  fn get_user(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<StoredUser>, Self::Error>> + Send + '_;

  fn find_user_by_email<'a>(
    &'a self,
    email: &'a str,
  ) -> impl Future<Output = Result<Option<StoredUser>, Self::Error>> + Send + 'a;

  /// Resolve a bearer token digest to the user currently holding it.
  fn find_user_by_token<'a>(
    &'a self,
    token_digest: &'a str,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + 'a;

  /// Replace (or with `None`, clear) the user's token digest.
  /// Returns `false` if the user does not exist.
  fn set_token(
    &self,
    user_id: Uuid,
    token_digest: Option<String>,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Returns `false` if the user does not exist.
  fn set_password_hash(
    &self,
    user_id: Uuid,
    password_hash: String,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Subordinates ──────────────────────────────────────────────────────

  /// All subordinates regardless of owner, oldest first.
  fn list_subordinates(
    &self,
  ) -> impl Future<Output = Result<Vec<Subordinate>, Self::Error>> + Send + '_;

  fn get_subordinate(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Subordinate>, Self::Error>> + Send + '_;

  /// Persist a new subordinate. The store assigns `id`, `created_at` and
  /// `updated_at`.
  fn add_subordinate(
    &self,
    input: NewSubordinate,
  ) -> impl Future<Output = Result<Subordinate, Self::Error>> + Send + '_;

  /// Merge `patch` into the stored record. `updated_at` is refreshed only
  /// when a field actually changes.
  ///
  /// The owner is never touched. Returns `None` if the record does not exist.
  fn update_subordinate(
    &self,
    id: Uuid,
    patch: SubordinatePatch,
  ) -> impl Future<Output = Result<Option<Subordinate>, Self::Error>> + Send + '_;

  /// Returns `false` if the record did not exist.
  fn delete_subordinate(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}
