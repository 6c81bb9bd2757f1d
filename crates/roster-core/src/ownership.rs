//! The authorization predicate guarding every write to a subordinate.

use uuid::Uuid;

use crate::{Error, Result, subordinate::Subordinate};

/// Fail with [`Error::NotOwner`] unless `requester` owns `record`.
pub fn require_ownership(requester: Uuid, record: &Subordinate) -> Result<()> {
  if record.owner == requester {
    Ok(())
  } else {
    Err(Error::NotOwner {
      requester,
      subordinate_id: record.id,
    })
  }
}
