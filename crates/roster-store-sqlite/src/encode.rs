//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! All timestamps are stored as RFC 3339 strings. UUIDs are stored as
//! hyphenated lowercase strings.

use chrono::{DateTime, Utc};
use roster_core::{
  subordinate::{Profile, Subordinate},
  user::{StoredUser, User},
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Column list matching [`RawSubordinate::from_row`].
pub const SUBORDINATE_COLUMNS: &str =
  "subordinate_id, first_name, last_name, address, owner, created_at, updated_at";

/// Raw strings read directly from a `subordinates` row.
pub struct RawSubordinate {
  pub subordinate_id: String,
  pub first_name:     String,
  pub last_name:      String,
  pub address:        String,
  pub owner:          String,
  pub created_at:     String,
  pub updated_at:     String,
}

impl RawSubordinate {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      subordinate_id: row.get(0)?,
      first_name:     row.get(1)?,
      last_name:      row.get(2)?,
      address:        row.get(3)?,
      owner:          row.get(4)?,
      created_at:     row.get(5)?,
      updated_at:     row.get(6)?,
    })
  }

  pub fn into_subordinate(self) -> Result<Subordinate> {
    Ok(Subordinate {
      id:         decode_uuid(&self.subordinate_id)?,
      profile:    Profile {
        first_name: self.first_name,
        last_name:  self.last_name,
        address:    self.address,
      },
      owner:      decode_uuid(&self.owner)?,
      created_at: decode_dt(&self.created_at)?,
      updated_at: decode_dt(&self.updated_at)?,
    })
  }
}

/// Column list matching [`RawUser::from_row`].
pub const USER_COLUMNS: &str = "user_id, email, password_hash, created_at, updated_at";

/// Raw strings read directly from a `users` row.
pub struct RawUser {
  pub user_id:       String,
  pub email:         String,
  pub password_hash: String,
  pub created_at:    String,
  pub updated_at:    String,
}

impl RawUser {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      user_id:       row.get(0)?,
      email:         row.get(1)?,
      password_hash: row.get(2)?,
      created_at:    row.get(3)?,
      updated_at:    row.get(4)?,
    })
  }

  pub fn into_stored_user(self) -> Result<StoredUser> {
    Ok(StoredUser {
      user:          User {
        id:         decode_uuid(&self.user_id)?,
        email:      self.email,
        created_at: decode_dt(&self.created_at)?,
        updated_at: decode_dt(&self.updated_at)?,
      },
      password_hash: self.password_hash,
    })
  }
}
