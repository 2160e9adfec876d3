//! GraphQL output types.
//!
//! Each object wraps a stored record and resolves its association fields
//! against the [`Service`] in the request context when the response is
//! serialized. Nothing is cached between requests.

use async_graphql::{Context, ID, Object, Result, SimpleObject};
use rallypoint_store::Service;
use rallypoint_types::{DeleteCount, Event, Location, Participant, User};

/// Render a record id as a GraphQL `ID`.
pub(crate) fn to_id(id: impl core::fmt::Display) -> ID {
    ID(id.to_string())
}

/// A user, with the events they own.
#[derive(Debug, Clone)]
pub struct UserObject(pub User);

#[Object(name = "User")]
impl UserObject {
    async fn id(&self) -> ID {
        to_id(&self.0.id)
    }

    async fn username(&self) -> &str {
        &self.0.username
    }

    async fn email(&self) -> &str {
        &self.0.email
    }

    /// Events whose `user_id` is this user.
    async fn events(&self, ctx: &Context<'_>) -> Result<Vec<EventObject>> {
        let service = ctx.data::<Service>()?;
        let events = service.store().events_for_user(&self.0.id).await;
        Ok(events.into_iter().map(EventObject).collect())
    }
}

/// An event, with its owner, venue, and participants.
#[derive(Debug, Clone)]
pub struct EventObject(pub Event);

#[Object(name = "Event")]
impl EventObject {
    async fn id(&self) -> ID {
        to_id(&self.0.id)
    }

    async fn title(&self) -> &str {
        &self.0.title
    }

    async fn desc(&self) -> &str {
        &self.0.desc
    }

    async fn date(&self) -> &str {
        &self.0.date
    }

    #[graphql(name = "from")]
    async fn starts(&self) -> &str {
        &self.0.from
    }

    #[graphql(name = "to")]
    async fn ends(&self) -> &str {
        &self.0.to
    }

    #[graphql(name = "user_id")]
    async fn user_id(&self) -> ID {
        to_id(&self.0.user_id)
    }

    /// The owning user, or `null` if `user_id` dangles.
    async fn user(&self, ctx: &Context<'_>) -> Result<Option<UserObject>> {
        let service = ctx.data::<Service>()?;
        Ok(service.store().user_for_event(&self.0).await.map(UserObject))
    }

    #[graphql(name = "location_id")]
    async fn location_id(&self) -> ID {
        to_id(&self.0.location_id)
    }

    /// The venue, or `null` if `location_id` dangles.
    async fn location(&self, ctx: &Context<'_>) -> Result<Option<LocationObject>> {
        let service = ctx.data::<Service>()?;
        Ok(service
            .store()
            .location_for_event(&self.0)
            .await
            .map(LocationObject))
    }

    /// Participants whose `event_id` is this event.
    async fn participant(&self, ctx: &Context<'_>) -> Result<Vec<ParticipantObject>> {
        let service = ctx.data::<Service>()?;
        let participants = service.store().participants_for_event(&self.0.id).await;
        Ok(participants.into_iter().map(ParticipantObject).collect())
    }
}

/// A location.
#[derive(Debug, Clone)]
pub struct LocationObject(pub Location);

#[Object(name = "Location")]
impl LocationObject {
    async fn id(&self) -> ID {
        to_id(&self.0.id)
    }

    async fn name(&self) -> &str {
        &self.0.name
    }

    async fn desc(&self) -> &str {
        &self.0.desc
    }

    async fn lat(&self) -> f64 {
        self.0.lat
    }

    async fn lng(&self) -> f64 {
        self.0.lng
    }

    #[graphql(name = "event_id")]
    async fn event_id(&self) -> ID {
        to_id(&self.0.event_id)
    }
}

/// A user attending an event.
#[derive(Debug, Clone)]
pub struct ParticipantObject(pub Participant);

#[Object(name = "Participant")]
impl ParticipantObject {
    async fn id(&self) -> ID {
        to_id(&self.0.id)
    }

    #[graphql(name = "user_id")]
    async fn user_id(&self) -> ID {
        to_id(&self.0.user_id)
    }

    #[graphql(name = "event_id")]
    async fn event_id(&self) -> ID {
        to_id(&self.0.event_id)
    }
}

/// Result of a `deleteAll*` mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, SimpleObject)]
pub struct DeleteAllOutput {
    /// Number of records removed.
    pub count: i32,
}

impl From<DeleteCount> for DeleteAllOutput {
    fn from(deleted: DeleteCount) -> Self {
        Self {
            count: i32::try_from(deleted.count).unwrap_or(i32::MAX),
        }
    }
}
