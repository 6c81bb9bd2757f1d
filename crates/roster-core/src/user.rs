//! User — the account that owns subordinates and holds a bearer token.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Public view of an account. Secrets are kept out of this type so it can be
/// serialised straight into responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
  pub id:         Uuid,
  pub email:      String,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

/// A user together with its argon2 PHC password hash.
#[derive(Debug, Clone)]
pub struct StoredUser {
  pub user:          User,
  pub password_hash: String,
}

/// Input to [`RosterStore::add_user`](crate::store::RosterStore::add_user).
#[derive(Debug, Clone)]
pub struct NewUser {
  pub email:         String,
  pub password_hash: String,
}
