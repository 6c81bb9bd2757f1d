//! JSON REST API for Roster.
//!
//! Exposes an axum [`Router`] backed by any [`roster_core::store::RosterStore`].
//! TLS, request tracing and transport concerns are the caller's
//! responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = roster_api::api_router(Arc::new(store));
//! axum::serve(listener, app).await?;
//! ```

pub mod auth;
pub mod error;
pub mod extract;
pub mod password;
pub mod subordinates;
pub mod users;

use std::sync::Arc;

use axum::{
  Router,
  routing::{delete, get, patch, post},
};
use roster_core::store::RosterStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: RosterStore + 'static,
{
  Router::new()
    // Accounts
    .route("/sign-up", post(users::sign_up::<S>))
    .route("/sign-in", post(users::sign_in::<S>))
    .route("/change-password", patch(users::change_password::<S>))
    .route("/sign-out", delete(users::sign_out::<S>))
    // Subordinates
    .route(
      "/subordinates",
      get(subordinates::list::<S>).post(subordinates::create::<S>),
    )
    .route(
      "/subordinates/{id}",
      get(subordinates::get_one::<S>)
        .patch(subordinates::update::<S>)
        .delete(subordinates::destroy::<S>),
    )
    .with_state(store)
}
