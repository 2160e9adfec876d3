//! Startup seed data.
//!
//! A seed document is YAML with optional `users`, `events`, `locations`,
//! and `participants` lists of complete records, ids included:
//!
//! ```yaml
//! users:
//!   - { id: "1", username: ann, email: a@x.com }
//! events:
//!   - id: "1"
//!     title: Kickoff
//!     desc: First meetup
//!     date: "2024-06-01"
//!     from: "10:00"
//!     to: "12:00"
//!     user_id: "1"
//!     location_id: "1"
//! ```
//!
//! Records are inserted in document order. Seeding bypasses the bus.

use std::path::Path;

use rallypoint_types::{Event, Location, Participant, User};
use serde::Deserialize;
use tracing::info;

use crate::error::StoreError;
use crate::record::Record;
use crate::store::{Store, StoreCounts};

/// Errors that can occur while loading seed data.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    /// Failed to read the seed file from disk.
    #[error("failed to read seed file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse seed YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// A seeded record could not be inserted.
    #[error("failed to insert seed record: {source}")]
    Store {
        /// The underlying store error.
        #[from]
        source: StoreError,
    },
}

impl From<serde_yml::Error> for SeedError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Records to load into an empty store at startup.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SeedData {
    /// Users to insert.
    #[serde(default)]
    pub users: Vec<User>,
    /// Events to insert.
    #[serde(default)]
    pub events: Vec<Event>,
    /// Locations to insert.
    #[serde(default)]
    pub locations: Vec<Location>,
    /// Participants to insert.
    #[serde(default)]
    pub participants: Vec<Participant>,
}

impl SeedData {
    /// Load seed data from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`SeedError::Io`] if the file cannot be read, or
    /// [`SeedError::Yaml`] if the content is not valid.
    pub fn from_file(path: &Path) -> Result<Self, SeedError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse seed data from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`SeedError::Yaml`] if the string is not valid.
    pub fn parse(yaml: &str) -> Result<Self, SeedError> {
        Ok(serde_yml::from_str(yaml)?)
    }

    /// Insert every record into `store` and return the resulting counts.
    ///
    /// # Errors
    ///
    /// Returns [`SeedError::Store`] on the first record whose id is already
    /// present. Records inserted before it are kept.
    pub async fn apply(self, store: &Store) -> Result<StoreCounts, SeedError> {
        insert_all(store, self.users).await?;
        insert_all(store, self.events).await?;
        insert_all(store, self.locations).await?;
        insert_all(store, self.participants).await?;

        let counts = store.counts().await;
        info!(
            users = counts.users,
            events = counts.events,
            locations = counts.locations,
            participants = counts.participants,
            "Seed data loaded"
        );
        Ok(counts)
    }
}

async fn insert_all<R: Record>(store: &Store, records: Vec<R>) -> Result<(), StoreError> {
    for record in records {
        store.insert(record).await?;
    }
    Ok(())
}
