//! GraphQL input types and their conversion into store drafts and patches.
//!
//! Ids arrive as GraphQL `ID`, which accepts both string and integer
//! literals and normalizes them to a string, so `1` and `"1"` address the
//! same record. An explicit `null` in an update input is treated the same
//! as an omitted field.

use async_graphql::{ID, InputObject};
use rallypoint_types::{
    EventId, EventPatch, LocationId, LocationPatch, NewEvent, NewLocation, NewParticipant,
    NewUser, ParticipantPatch, UserId, UserPatch,
};

pub(crate) fn user_id(id: ID) -> UserId {
    UserId::from(id.0)
}

pub(crate) fn event_id(id: ID) -> EventId {
    EventId::from(id.0)
}

pub(crate) fn location_id(id: ID) -> LocationId {
    LocationId::from(id.0)
}

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

/// Fields for `createUser`.
#[derive(Debug, Clone, InputObject)]
pub struct CreateUserInput {
    /// Display name.
    pub username: String,
    /// Contact address.
    pub email: String,
}

/// Fields for `updateUser`. Omitted fields keep their value.
#[derive(Debug, Clone, Default, InputObject)]
pub struct UpdateUserInput {
    /// Replacement display name.
    pub username: Option<String>,
    /// Replacement contact address.
    pub email: Option<String>,
}

impl CreateUserInput {
    /// Convert into a store draft.
    pub fn into_draft(self) -> NewUser {
        NewUser {
            username: self.username,
            email: self.email,
        }
    }
}

impl UpdateUserInput {
    /// Convert into a store patch.
    pub fn into_patch(self) -> UserPatch {
        UserPatch {
            username: self.username,
            email: self.email,
        }
    }
}

// ---------------------------------------------------------------------------
// Participant
// ---------------------------------------------------------------------------

/// Fields for `createParticipant`.
#[derive(Debug, Clone, InputObject)]
pub struct CreateParticipantInput {
    /// Attending user.
    #[graphql(name = "user_id")]
    pub user_id: ID,
    /// Attended event.
    #[graphql(name = "event_id")]
    pub event_id: ID,
}

/// Fields for `updateParticipant`.
#[derive(Debug, Clone, Default, InputObject)]
pub struct UpdateParticipantInput {
    /// Replacement user.
    #[graphql(name = "user_id")]
    pub user_id: Option<ID>,
    /// Replacement event.
    #[graphql(name = "event_id")]
    pub event_id: Option<ID>,
}

impl CreateParticipantInput {
    /// Convert into a store draft.
    pub fn into_draft(self) -> NewParticipant {
        NewParticipant {
            user_id: user_id(self.user_id),
            event_id: event_id(self.event_id),
        }
    }
}

impl UpdateParticipantInput {
    /// Convert into a store patch.
    pub fn into_patch(self) -> ParticipantPatch {
        ParticipantPatch {
            user_id: self.user_id.map(user_id),
            event_id: self.event_id.map(event_id),
        }
    }
}

// ---------------------------------------------------------------------------
// Location
// ---------------------------------------------------------------------------

/// Fields for `createLocation`.
#[derive(Debug, Clone, InputObject)]
pub struct CreateLocationInput {
    /// Display name.
    pub name: String,
    /// Description.
    pub desc: String,
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lng: f64,
    /// Associated event.
    #[graphql(name = "event_id")]
    pub event_id: ID,
}

/// Fields for `updateLocation`.
#[derive(Debug, Clone, Default, InputObject)]
pub struct UpdateLocationInput {
    /// Replacement name.
    pub name: Option<String>,
    /// Replacement description.
    pub desc: Option<String>,
    /// Replacement latitude.
    pub lat: Option<f64>,
    /// Replacement longitude.
    pub lng: Option<f64>,
    /// Replacement event.
    #[graphql(name = "event_id")]
    pub event_id: Option<ID>,
}

impl CreateLocationInput {
    /// Convert into a store draft.
    pub fn into_draft(self) -> NewLocation {
        NewLocation {
            name: self.name,
            desc: self.desc,
            lat: self.lat,
            lng: self.lng,
            event_id: event_id(self.event_id),
        }
    }
}

impl UpdateLocationInput {
    /// Convert into a store patch.
    pub fn into_patch(self) -> LocationPatch {
        LocationPatch {
            name: self.name,
            desc: self.desc,
            lat: self.lat,
            lng: self.lng,
            event_id: self.event_id.map(event_id),
        }
    }
}

// ---------------------------------------------------------------------------
// Event
// ---------------------------------------------------------------------------

/// Fields for `addEvent`.
#[derive(Debug, Clone, InputObject)]
#[graphql(name = "addEventInput")]
pub struct AddEventInput {
    /// Short title.
    pub title: String,
    /// Longer description.
    pub desc: String,
    /// Calendar date.
    pub date: String,
    /// Start time.
    pub from: String,
    /// End time.
    pub to: String,
    /// Venue.
    #[graphql(name = "location_id")]
    pub location_id: ID,
    /// Owning user.
    #[graphql(name = "user_id")]
    pub user_id: ID,
}

/// Fields for `updateEvent`.
#[derive(Debug, Clone, Default, InputObject)]
pub struct UpdateEventInput {
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement description.
    pub desc: Option<String>,
    /// Replacement date.
    pub date: Option<String>,
    /// Replacement start time.
    pub from: Option<String>,
    /// Replacement end time.
    pub to: Option<String>,
    /// Replacement venue.
    #[graphql(name = "location_id")]
    pub location_id: Option<ID>,
    /// Replacement owner.
    #[graphql(name = "user_id")]
    pub user_id: Option<ID>,
}

impl AddEventInput {
    /// Convert into a store draft.
    pub fn into_draft(self) -> NewEvent {
        NewEvent {
            title: self.title,
            desc: self.desc,
            date: self.date,
            from: self.from,
            to: self.to,
            user_id: user_id(self.user_id),
            location_id: location_id(self.location_id),
        }
    }
}

impl UpdateEventInput {
    /// Convert into a store patch.
    pub fn into_patch(self) -> EventPatch {
        EventPatch {
            title: self.title,
            desc: self.desc,
            date: self.date,
            from: self.from,
            to: self.to,
            user_id: self.user_id.map(user_id),
            location_id: self.location_id.map(location_id),
        }
    }
}
