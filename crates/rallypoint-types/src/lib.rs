//! Shared type definitions for the Rallypoint API.
//!
//! This crate is the single source of truth for the records the store
//! keeps and the API exposes. It carries no storage or transport logic.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe string wrappers for all record identifiers
//! - [`enums`] -- Entity kinds, change kinds, and notification topics
//! - [`records`] -- Records, create drafts, and partial patches

pub mod enums;
pub mod ids;
pub mod records;

// Re-export all public types at crate root for convenience.
pub use enums::{Change, EntityKind, Topic};
pub use ids::{EventId, LocationId, ParticipantId, UserId};
pub use records::{
    DeleteCount, Event, EventPatch, Location, LocationPatch, NewEvent, NewLocation,
    NewParticipant, NewUser, Participant, ParticipantPatch, User, UserPatch,
};
