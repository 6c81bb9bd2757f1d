//! Subordinate — the single record type the service manages.
//!
//! A subordinate carries a small [`Profile`] of free-text fields plus the id
//! of the user who created it. The owner is fixed at creation; nothing in this
//! module can change it afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

/// The mutable, user-supplied part of a subordinate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
  pub first_name: String,
  pub last_name:  String,
  pub address:    String,
}

/// A persisted subordinate record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subordinate {
  pub id:         Uuid,
  #[serde(flatten)]
  pub profile:    Profile,
  /// Id of the creating user. Immutable.
  pub owner:      Uuid,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

/// Loosely-typed fields as they arrive from a client.
///
/// There is no `owner` field. Any owner a client sends is dropped during
/// deserialisation and never reaches the store.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubordinateFields {
  pub first_name: Option<String>,
  pub last_name:  Option<String>,
  pub address:    Option<String>,
}

/// A validated subordinate waiting to be inserted.
///
/// `id` and the timestamps are assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubordinate {
  pub owner:   Uuid,
  pub profile: Profile,
}

impl NewSubordinate {
  /// Validate `fields` and attach `owner`.
  ///
  /// Every profile field is required; an empty string counts as missing.
  pub fn from_fields(owner: Uuid, fields: SubordinateFields) -> Result<Self> {
    Ok(Self {
      owner,
      profile: Profile {
        first_name: required("first_name", fields.first_name)?,
        last_name:  required("last_name", fields.last_name)?,
        address:    required("address", fields.address)?,
      },
    })
  }
}

fn required(name: &'static str, value: Option<String>) -> Result<String> {
  value
    .filter(|v| !v.is_empty())
    .ok_or(Error::MissingField(name))
}

/// A partial update. `None` means "leave as is".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubordinatePatch {
  pub first_name: Option<String>,
  pub last_name:  Option<String>,
  pub address:    Option<String>,
}

impl From<SubordinateFields> for SubordinatePatch {
  /// Clients send `""` for fields they do not want to touch, so empty strings
  /// are dropped along with absent fields.
  fn from(fields: SubordinateFields) -> Self {
    fn keep(v: Option<String>) -> Option<String> { v.filter(|s| !s.is_empty()) }

    Self {
      first_name: keep(fields.first_name),
      last_name:  keep(fields.last_name),
      address:    keep(fields.address),
    }
  }
}

impl SubordinatePatch {
  /// Merge this patch into `profile`, returning `true` if any field changed.
  pub fn apply(self, profile: &mut Profile) -> bool {
    let mut changed = false;
    for (slot, value) in [
      (&mut profile.first_name, self.first_name),
      (&mut profile.last_name, self.last_name),
      (&mut profile.address, self.address),
    ] {
      if let Some(v) = value
        && *slot != v
      {
        *slot = v;
        changed = true;
      }
    }
    changed
  }
}
