//! Records stored in the four collections, plus the create drafts and
//! partial patches the mutations accept.
//!
//! A patch is a shallow merge: every `Some` field overwrites the record's
//! field, every `None` leaves it untouched.

use serde::{Deserialize, Serialize};

use crate::ids::{EventId, LocationId, ParticipantId, UserId};

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier.
    pub id: UserId,
    /// Display name.
    pub username: String,
    /// Contact address. Never format-checked.
    pub email: String,
}

/// Fields required to create a [`User`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    /// Display name.
    pub username: String,
    /// Contact address.
    pub email: String,
}

/// Partial update for a [`User`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPatch {
    /// Replacement display name.
    pub username: Option<String>,
    /// Replacement contact address.
    pub email: Option<String>,
}

impl NewUser {
    /// Attach an identifier, producing the stored record.
    pub fn into_record(self, id: UserId) -> User {
        User {
            id,
            username: self.username,
            email: self.email,
        }
    }
}

impl User {
    /// Overwrite the fields supplied in `patch`.
    pub fn apply(&mut self, patch: UserPatch) {
        if let Some(username) = patch.username {
            self.username = username;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
    }
}

// ---------------------------------------------------------------------------
// Event
// ---------------------------------------------------------------------------

/// A scheduled event owned by a user and held at a location.
///
/// `date`, `from`, and `to` are free-form strings; nothing parses them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Unique identifier.
    pub id: EventId,
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
    /// Owning user. May dangle.
    pub user_id: UserId,
    /// Venue. May dangle.
    pub location_id: LocationId,
}

/// Fields required to create an [`Event`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEvent {
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
    /// Owning user.
    pub user_id: UserId,
    /// Venue.
    pub location_id: LocationId,
}

/// Partial update for an [`Event`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventPatch {
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
    /// Replacement owner.
    pub user_id: Option<UserId>,
    /// Replacement venue.
    pub location_id: Option<LocationId>,
}

impl NewEvent {
    /// Attach an identifier, producing the stored record.
    pub fn into_record(self, id: EventId) -> Event {
        Event {
            id,
            title: self.title,
            desc: self.desc,
            date: self.date,
            from: self.from,
            to: self.to,
            user_id: self.user_id,
            location_id: self.location_id,
        }
    }
}

impl Event {
    /// Overwrite the fields supplied in `patch`.
    pub fn apply(&mut self, patch: EventPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(desc) = patch.desc {
            self.desc = desc;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(from) = patch.from {
            self.from = from;
        }
        if let Some(to) = patch.to {
            self.to = to;
        }
        if let Some(user_id) = patch.user_id {
            self.user_id = user_id;
        }
        if let Some(location_id) = patch.location_id {
            self.location_id = location_id;
        }
    }
}

// ---------------------------------------------------------------------------
// Location
// ---------------------------------------------------------------------------

/// A place with coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Unique identifier.
    pub id: LocationId,
    /// Display name. Used as the `locationCreated` filter.
    pub name: String,
    /// Description.
    pub desc: String,
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lng: f64,
    /// Event this location was registered for. May dangle.
    pub event_id: EventId,
}

/// Fields required to create a [`Location`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewLocation {
    /// Display name.
    pub name: String,
    /// Description.
    pub desc: String,
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lng: f64,
    /// Associated event.
    pub event_id: EventId,
}

/// Partial update for a [`Location`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationPatch {
    /// Replacement name.
    pub name: Option<String>,
    /// Replacement description.
    pub desc: Option<String>,
    /// Replacement latitude.
    pub lat: Option<f64>,
    /// Replacement longitude.
    pub lng: Option<f64>,
    /// Replacement event.
    pub event_id: Option<EventId>,
}

impl NewLocation {
    /// Attach an identifier, producing the stored record.
    pub fn into_record(self, id: LocationId) -> Location {
        Location {
            id,
            name: self.name,
            desc: self.desc,
            lat: self.lat,
            lng: self.lng,
            event_id: self.event_id,
        }
    }
}

impl Location {
    /// Overwrite the fields supplied in `patch`.
    pub fn apply(&mut self, patch: LocationPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(desc) = patch.desc {
            self.desc = desc;
        }
        if let Some(lat) = patch.lat {
            self.lat = lat;
        }
        if let Some(lng) = patch.lng {
            self.lng = lng;
        }
        if let Some(event_id) = patch.event_id {
            self.event_id = event_id;
        }
    }
}

// ---------------------------------------------------------------------------
// Participant
// ---------------------------------------------------------------------------

/// Join record linking a user to an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Unique identifier.
    pub id: ParticipantId,
    /// Attending user. May dangle.
    pub user_id: UserId,
    /// Attended event. May dangle.
    pub event_id: EventId,
}

/// Fields required to create a [`Participant`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewParticipant {
    /// Attending user.
    pub user_id: UserId,
    /// Attended event.
    pub event_id: EventId,
}

/// Partial update for a [`Participant`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantPatch {
    /// Replacement user.
    pub user_id: Option<UserId>,
    /// Replacement event.
    pub event_id: Option<EventId>,
}

impl NewParticipant {
    /// Attach an identifier, producing the stored record.
    pub fn into_record(self, id: ParticipantId) -> Participant {
        Participant {
            id,
            user_id: self.user_id,
            event_id: self.event_id,
        }
    }
}

impl Participant {
    /// Overwrite the fields supplied in `patch`.
    pub fn apply(&mut self, patch: ParticipantPatch) {
        if let Some(user_id) = patch.user_id {
            self.user_id = user_id;
        }
        if let Some(event_id) = patch.event_id {
            self.event_id = event_id;
        }
    }
}

// ---------------------------------------------------------------------------
// Bulk delete
// ---------------------------------------------------------------------------

/// Result of clearing a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteCount {
    /// Number of records that were removed.
    pub count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_event() -> Event {
        NewEvent {
            title: String::from("Standup"),
            desc: String::from("daily"),
            date: String::from("2024-05-01"),
            from: String::from("09:00"),
            to: String::from("09:15"),
            user_id: UserId::from("u1"),
            location_id: LocationId::from("l1"),
        }
        .into_record(EventId::from("e1"))
    }

    #[test]
    fn user_patch_overwrites_only_supplied_fields() {
        let mut user = NewUser {
            username: String::from("ann"),
            email: String::from("a@x.com"),
        }
        .into_record(UserId::from("u1"));

        user.apply(UserPatch {
            username: None,
            email: Some(String::from("ann@y.org")),
        });

        assert_eq!(user.id.as_str(), "u1");
        assert_eq!(user.username, "ann");
        assert_eq!(user.email, "ann@y.org");
    }

    #[test]
    fn empty_patch_is_a_no_op() {
        let mut event = sample_event();
        let before = event.clone();
        event.apply(EventPatch::default());
        assert_eq!(event, before);
    }

    #[test]
    fn event_patch_can_move_foreign_keys() {
        let mut event = sample_event();
        event.apply(EventPatch {
            user_id: Some(UserId::from("u2")),
            to: Some(String::from("10:00")),
            ..EventPatch::default()
        });
        assert_eq!(event.user_id.as_str(), "u2");
        assert_eq!(event.to, "10:00");
        assert_eq!(event.location_id.as_str(), "l1");
        assert_eq!(event.title, "Standup");
    }

    #[test]
    fn location_patch_updates_coordinates() {
        let mut location = NewLocation {
            name: String::from("HQ"),
            desc: String::from("d"),
            lat: 1.0,
            lng: 2.0,
            event_id: EventId::from("e1"),
        }
        .into_record(LocationId::from("l1"));

        location.apply(LocationPatch {
            lat: Some(10.5),
            ..LocationPatch::default()
        });

        assert!((location.lat - 10.5).abs() < f64::EPSILON);
        assert!((location.lng - 2.0).abs() < f64::EPSILON);
        assert_eq!(location.name, "HQ");
    }

    #[test]
    fn participant_patch_overwrites_event() {
        let mut participant = NewParticipant {
            user_id: UserId::from("u1"),
            event_id: EventId::from("e1"),
        }
        .into_record(ParticipantId::from("p1"));

        participant.apply(ParticipantPatch {
            user_id: None,
            event_id: Some(EventId::from("e9")),
        });

        assert_eq!(participant.user_id.as_str(), "u1");
        assert_eq!(participant.event_id.as_str(), "e9");
    }
}
