//! SQL schema for the Roster SQLite store.
//!
//! Executed once at connection startup. `PRAGMA user_version` records the
//! schema revision so later migrations can be gated on it.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS users (
    user_id       TEXT PRIMARY KEY,
    email         TEXT NOT NULL UNIQUE COLLATE NOCASE,
    password_hash TEXT NOT NULL,   -- argon2 PHC string
    token_digest  TEXT UNIQUE,     -- hex SHA-256 of the bearer token; NULL when signed out
    created_at    TEXT NOT NULL,
    updated_at    TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS subordinates (
    subordinate_id TEXT PRIMARY KEY,
    first_name     TEXT NOT NULL CHECK (first_name != ''),
    last_name      TEXT NOT NULL CHECK (last_name != ''),
    address        TEXT NOT NULL CHECK (address != ''),
    owner          TEXT NOT NULL REFERENCES users(user_id),
    created_at     TEXT NOT NULL,   -- ISO 8601 UTC; server-assigned
    updated_at     TEXT NOT NULL
);

-- The owner column is write-once.
CREATE TRIGGER IF NOT EXISTS subordinates_owner_immutable
BEFORE UPDATE OF owner ON subordinates
WHEN NEW.owner != OLD.owner
BEGIN
    SELECT RAISE(ABORT, 'subordinate owner is immutable');
END;

CREATE INDEX IF NOT EXISTS subordinates_owner_idx   ON subordinates(owner);
CREATE INDEX IF NOT EXISTS subordinates_created_idx ON subordinates(created_at);

PRAGMA user_version = 1;
";
