use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque, globally unique identity of an entity.
///
/// Assigned once at creation and compared by value. It is the only key used
/// to join aggregates together (question → author, answer → question, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UniqueEntityId(Uuid);

impl UniqueEntityId {
    /// Creates a new random identity.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an identity from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for UniqueEntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for UniqueEntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UniqueEntityId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

impl From<Uuid> for UniqueEntityId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl From<UniqueEntityId> for Uuid {
    fn from(id: UniqueEntityId) -> Self {
        id.0
    }
}
