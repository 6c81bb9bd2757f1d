//! Error types for `roster-core`.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  /// A required text field was absent or empty.
  #[error("{0} is required")]
  MissingField(&'static str),

  /// The requester tried to mutate a record owned by someone else.
  #[error("user {requester} does not own subordinate {subordinate_id}")]
  NotOwner {
    requester:      Uuid,
    subordinate_id: Uuid,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
