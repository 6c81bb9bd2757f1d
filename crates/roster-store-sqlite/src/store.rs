//! [`SqliteStore`] — the SQLite implementation of [`RosterStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use roster_core::{
  store::RosterStore,
  subordinate::{NewSubordinate, Profile, Subordinate, SubordinatePatch},
  user::{NewUser, StoredUser, User},
};

use crate::{
  Result,
  encode::{
    RawSubordinate, RawUser, SUBORDINATE_COLUMNS, USER_COLUMNS, encode_dt, encode_uuid,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Roster store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Fetch a single user row matching `column = value`.
  async fn user_where(&self, column: &'static str, value: String) -> Result<Option<StoredUser>> {
    let raw: Option<RawUser> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {USER_COLUMNS} FROM users WHERE {column} = ?1"),
            rusqlite::params![value],
            RawUser::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawUser::into_stored_user).transpose()
  }
}

// ─── RosterStore impl ────────────────────────────────────────────────────────

impl RosterStore for SqliteStore {
  type Error = crate::Error;

  // ── Users ─────────────────────────────────────────────────────────────────

  async fn add_user(&self, input: NewUser) -> Result<Option<User>> {
    let now = Utc::now();
    let user = User {
      id:         Uuid::new_v4(),
      email:      input.email,
      created_at: now,
      updated_at: now,
    };

    let id_str    = encode_uuid(user.id);
    let email     = user.email.clone();
    let hash      = input.password_hash;
    let at_str    = encode_dt(now);

    let inserted = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "INSERT INTO users (user_id, email, password_hash, created_at, updated_at)
           VALUES (?1, ?2, ?3, ?4, ?4)
           ON CONFLICT (email) DO NOTHING",
          rusqlite::params![id_str, email, hash, at_str],
        )?)
      })
      .await?;

    Ok((inserted == 1).then_some(user))
  }

  async fn get_user(&self, id: Uuid) -> Result<Option<StoredUser>> {
    self.user_where("user_id", encode_uuid(id)).await
  }

  async fn find_user_by_email(&self, email: &str) -> Result<Option<StoredUser>> {
    self.user_where("email", email.to_owned()).await
  }

  async fn find_user_by_token(&self, token_digest: &str) -> Result<Option<User>> {
    Ok(
      self
        .user_where("token_digest", token_digest.to_owned())
        .await?
        .map(|stored| stored.user),
    )
  }

  async fn set_token(&self, user_id: Uuid, token_digest: Option<String>) -> Result<bool> {
    let id_str = encode_uuid(user_id);
    let at_str = encode_dt(Utc::now());

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE users SET token_digest = ?2, updated_at = ?3 WHERE user_id = ?1",
          rusqlite::params![id_str, token_digest, at_str],
        )?)
      })
      .await?;

    Ok(changed == 1)
  }

  async fn set_password_hash(&self, user_id: Uuid, password_hash: String) -> Result<bool> {
    let id_str = encode_uuid(user_id);
    let at_str = encode_dt(Utc::now());

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE users SET password_hash = ?2, updated_at = ?3 WHERE user_id = ?1",
          rusqlite::params![id_str, password_hash, at_str],
        )?)
      })
      .await?;

    Ok(changed == 1)
  }

  // ── Subordinates ──────────────────────────────────────────────────────────

  async fn list_subordinates(&self) -> Result<Vec<Subordinate>> {
    let raws: Vec<RawSubordinate> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {SUBORDINATE_COLUMNS} FROM subordinates ORDER BY created_at, rowid"
        ))?;
        let rows = stmt
          .query_map([], RawSubordinate::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawSubordinate::into_subordinate).collect()
  }

  async fn get_subordinate(&self, id: Uuid) -> Result<Option<Subordinate>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawSubordinate> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {SUBORDINATE_COLUMNS} FROM subordinates WHERE subordinate_id = ?1"),
            rusqlite::params![id_str],
            RawSubordinate::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawSubordinate::into_subordinate).transpose()
  }

  async fn add_subordinate(&self, input: NewSubordinate) -> Result<Subordinate> {
    let now = Utc::now();
    let subordinate = Subordinate {
      id:         Uuid::new_v4(),
      profile:    input.profile,
      owner:      input.owner,
      created_at: now,
      updated_at: now,
    };

    let id_str     = encode_uuid(subordinate.id);
    let first_name = subordinate.profile.first_name.clone();
    let last_name  = subordinate.profile.last_name.clone();
    let address    = subordinate.profile.address.clone();
    let owner_str  = encode_uuid(subordinate.owner);
    let at_str     = encode_dt(now);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO subordinates (
             subordinate_id, first_name, last_name, address, owner, created_at, updated_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
          rusqlite::params![id_str, first_name, last_name, address, owner_str, at_str],
        )?;
        Ok(())
      })
      .await?;

    tracing::debug!(id = %subordinate.id, owner = %subordinate.owner, "subordinate inserted");
    Ok(subordinate)
  }

  async fn update_subordinate(
    &self,
    id:    Uuid,
    patch: SubordinatePatch,
  ) -> Result<Option<Subordinate>> {
    let id_str = encode_uuid(id);
    let at_str = encode_dt(Utc::now());

    // Read, merge and write inside one transaction so concurrent updates to
    // the same record cannot interleave.
    let raw: Option<RawSubordinate> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let current: Option<Profile> = tx
          .query_row(
            "SELECT first_name, last_name, address FROM subordinates WHERE subordinate_id = ?1",
            rusqlite::params![id_str],
            |row| {
              Ok(Profile {
                first_name: row.get(0)?,
                last_name:  row.get(1)?,
                address:    row.get(2)?,
              })
            },
          )
          .optional()?;

        let Some(mut profile) = current else {
          return Ok(None);
        };
        if patch.apply(&mut profile) {
          tx.execute(
            "UPDATE subordinates
             SET first_name = ?2, last_name = ?3, address = ?4, updated_at = ?5
             WHERE subordinate_id = ?1",
            rusqlite::params![
              id_str,
              profile.first_name,
              profile.last_name,
              profile.address,
              at_str,
            ],
          )?;
        }

        let raw = tx.query_row(
          &format!("SELECT {SUBORDINATE_COLUMNS} FROM subordinates WHERE subordinate_id = ?1"),
          rusqlite::params![id_str],
          RawSubordinate::from_row,
        )?;

        tx.commit()?;
        Ok(Some(raw))
      })
      .await?;

    raw.map(RawSubordinate::into_subordinate).transpose()
  }

  async fn delete_subordinate(&self, id: Uuid) -> Result<bool> {
    let id_str = encode_uuid(id);

    let deleted = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM subordinates WHERE subordinate_id = ?1",
          rusqlite::params![id_str],
        )?)
      })
      .await?;

    Ok(deleted == 1)
  }
}
