//! Entity kinds, change kinds, and notification topics.

use serde::{Deserialize, Serialize};

/// The four record collections exposed by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// A registered user.
    User,
    /// A scheduled event.
    Event,
    /// A place an event happens at.
    Location,
    /// A user attending an event.
    Participant,
}

impl EntityKind {
    /// Every kind, in schema order.
    pub const ALL: [Self; 4] = [Self::User, Self::Event, Self::Location, Self::Participant];

    /// The lower camel case name used as a topic prefix (`user`, `event`, ...).
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Event => "event",
            Self::Location => "location",
            Self::Participant => "participant",
        }
    }
}

impl core::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What happened to a record. Bulk clears have no change kind because
/// they are never published.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Change {
    /// The record was appended to its collection.
    Created,
    /// Some fields of the record were overwritten.
    Updated,
    /// The record was removed from its collection.
    Deleted,
}

impl Change {
    /// Every change kind.
    pub const ALL: [Self; 3] = [Self::Created, Self::Updated, Self::Deleted];

    /// The suffix used in topic names.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "Created",
            Self::Updated => "Updated",
            Self::Deleted => "Deleted",
        }
    }
}

/// A named notification channel, e.g. `userCreated`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Topic {
    /// The collection the notification concerns.
    pub kind: EntityKind,
    /// The change that was made.
    pub change: Change,
}

impl Topic {
    /// Build a topic from its parts.
    pub const fn new(kind: EntityKind, change: Change) -> Self {
        Self { kind, change }
    }

    /// All twelve topics.
    pub fn all() -> impl Iterator<Item = Self> {
        EntityKind::ALL
            .into_iter()
            .flat_map(|kind| Change::ALL.into_iter().map(move |change| Self::new(kind, change)))
    }
}

impl core::fmt::Display for Topic {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}{}", self.kind.as_str(), self.change.as_str())
    }
}
