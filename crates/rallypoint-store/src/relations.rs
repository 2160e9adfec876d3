//! Read-time relationship resolution.
//!
//! Associations are never stored. Each one is computed from the current
//! contents of the related collection when it is asked for. Foreign keys
//! are not validated on write, so a dangling key resolves to `None` or an
//! empty list.

use rallypoint_types::{Event, EventId, Location, Participant, User, UserId};

use crate::store::Store;

impl Store {
    /// Events whose `user_id` is `user_id`, in event insertion order.
    pub async fn events_for_user(&self, user_id: &UserId) -> Vec<Event> {
        self.events
            .read()
            .await
            .iter()
            .filter(|event| &event.user_id == user_id)
            .cloned()
            .collect()
    }

    /// The user that owns `event`.
    pub async fn user_for_event(&self, event: &Event) -> Option<User> {
        self.get::<User>(&event.user_id).await
    }

    /// The location `event` is held at.
    pub async fn location_for_event(&self, event: &Event) -> Option<Location> {
        self.get::<Location>(&event.location_id).await
    }

    /// Participants whose `event_id` is `event_id`, in insertion order.
    pub async fn participants_for_event(&self, event_id: &EventId) -> Vec<Participant> {
        self.participants
            .read()
            .await
            .iter()
            .filter(|participant| &participant.event_id == event_id)
            .cloned()
            .collect()
    }
}
