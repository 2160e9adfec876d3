//! The GraphQL schema: queries, mutations, and subscriptions.
//!
//! Resolvers are thin. Each one converts its arguments, calls the
//! [`Service`] from the schema data, and wraps the result in an output
//! object. Store errors become GraphQL errors carrying the store message
//! (`"user not found: <id>"`).

use async_graphql::{Context, ID, Object, Result, Schema, Subscription};
use futures::{Stream, StreamExt};
use rallypoint_store::Service;
use rallypoint_types::{Change, Event, Location, Participant, ParticipantId, User};

use crate::inputs::{
    AddEventInput, CreateLocationInput, CreateParticipantInput, CreateUserInput,
    UpdateEventInput, UpdateLocationInput, UpdateParticipantInput, UpdateUserInput, event_id,
    location_id, user_id,
};
use crate::objects::{DeleteAllOutput, EventObject, LocationObject, ParticipantObject, UserObject};

/// The complete Rallypoint schema type.
pub type AppSchema = Schema<QueryRoot, MutationRoot, SubscriptionRoot>;

/// Build the schema with `service` available to every resolver.
pub fn build_schema(service: Service) -> AppSchema {
    Schema::build(QueryRoot, MutationRoot, SubscriptionRoot)
        .data(service)
        .finish()
}

fn participant_id(id: ID) -> ParticipantId {
    ParticipantId::from(id.0)
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Read-only entry points.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryRoot;

#[Object]
impl QueryRoot {
    async fn users(&self, ctx: &Context<'_>) -> Result<Vec<UserObject>> {
        let service = ctx.data::<Service>()?;
        Ok(service.list::<User>().await.into_iter().map(UserObject).collect())
    }

    async fn user(&self, ctx: &Context<'_>, id: ID) -> Result<UserObject> {
        let service = ctx.data::<Service>()?;
        Ok(UserObject(service.get::<User>(&user_id(id)).await?))
    }

    async fn events(&self, ctx: &Context<'_>) -> Result<Vec<EventObject>> {
        let service = ctx.data::<Service>()?;
        Ok(service.list::<Event>().await.into_iter().map(EventObject).collect())
    }

    async fn event(&self, ctx: &Context<'_>, id: ID) -> Result<EventObject> {
        let service = ctx.data::<Service>()?;
        Ok(EventObject(service.get::<Event>(&event_id(id)).await?))
    }

    async fn locations(&self, ctx: &Context<'_>) -> Result<Vec<LocationObject>> {
        let service = ctx.data::<Service>()?;
        Ok(service
            .list::<Location>()
            .await
            .into_iter()
            .map(LocationObject)
            .collect())
    }

    async fn location(&self, ctx: &Context<'_>, id: ID) -> Result<LocationObject> {
        let service = ctx.data::<Service>()?;
        Ok(LocationObject(
            service.get::<Location>(&location_id(id)).await?,
        ))
    }

    async fn participants(&self, ctx: &Context<'_>) -> Result<Vec<ParticipantObject>> {
        let service = ctx.data::<Service>()?;
        Ok(service
            .list::<Participant>()
            .await
            .into_iter()
            .map(ParticipantObject)
            .collect())
    }

    async fn participant(&self, ctx: &Context<'_>, id: ID) -> Result<ParticipantObject> {
        let service = ctx.data::<Service>()?;
        Ok(ParticipantObject(
            service.get::<Participant>(&participant_id(id)).await?,
        ))
    }
}

// ---------------------------------------------------------------------------
// Mutations
// ---------------------------------------------------------------------------

/// Write entry points. Every single-record mutation publishes a
/// notification; `deleteAll*` mutations do not.
#[derive(Debug, Clone, Copy, Default)]
pub struct MutationRoot;

#[Object]
impl MutationRoot {
    // --- User ---

    async fn create_user(&self, ctx: &Context<'_>, data: CreateUserInput) -> Result<UserObject> {
        let service = ctx.data::<Service>()?;
        Ok(UserObject(service.create::<User>(data.into_draft()).await))
    }

    async fn update_user(
        &self,
        ctx: &Context<'_>,
        id: ID,
        data: Option<UpdateUserInput>,
    ) -> Result<UserObject> {
        let service = ctx.data::<Service>()?;
        let patch = data.unwrap_or_default().into_patch();
        Ok(UserObject(service.update::<User>(&user_id(id), patch).await?))
    }

    async fn delete_user(&self, ctx: &Context<'_>, id: ID) -> Result<UserObject> {
        let service = ctx.data::<Service>()?;
        Ok(UserObject(service.delete::<User>(&user_id(id)).await?))
    }

    async fn delete_all_users(&self, ctx: &Context<'_>) -> Result<DeleteAllOutput> {
        let service = ctx.data::<Service>()?;
        Ok(service.delete_all::<User>().await.into())
    }

    // --- Participant ---

    async fn create_participant(
        &self,
        ctx: &Context<'_>,
        data: CreateParticipantInput,
    ) -> Result<ParticipantObject> {
        let service = ctx.data::<Service>()?;
        Ok(ParticipantObject(
            service.create::<Participant>(data.into_draft()).await,
        ))
    }

    async fn update_participant(
        &self,
        ctx: &Context<'_>,
        id: ID,
        data: Option<UpdateParticipantInput>,
    ) -> Result<ParticipantObject> {
        let service = ctx.data::<Service>()?;
        let patch = data.unwrap_or_default().into_patch();
        Ok(ParticipantObject(
            service
                .update::<Participant>(&participant_id(id), patch)
                .await?,
        ))
    }

    async fn delete_participant(&self, ctx: &Context<'_>, id: ID) -> Result<ParticipantObject> {
        let service = ctx.data::<Service>()?;
        Ok(ParticipantObject(
            service.delete::<Participant>(&participant_id(id)).await?,
        ))
    }

    async fn delete_all_participants(&self, ctx: &Context<'_>) -> Result<DeleteAllOutput> {
        let service = ctx.data::<Service>()?;
        Ok(service.delete_all::<Participant>().await.into())
    }

    // --- Location ---

    async fn create_location(
        &self,
        ctx: &Context<'_>,
        data: CreateLocationInput,
    ) -> Result<LocationObject> {
        let service = ctx.data::<Service>()?;
        Ok(LocationObject(
            service.create::<Location>(data.into_draft()).await,
        ))
    }

    async fn update_location(
        &self,
        ctx: &Context<'_>,
        id: ID,
        data: Option<UpdateLocationInput>,
    ) -> Result<LocationObject> {
        let service = ctx.data::<Service>()?;
        let patch = data.unwrap_or_default().into_patch();
        Ok(LocationObject(
            service.update::<Location>(&location_id(id), patch).await?,
        ))
    }

    async fn delete_location(&self, ctx: &Context<'_>, id: ID) -> Result<LocationObject> {
        let service = ctx.data::<Service>()?;
        Ok(LocationObject(
            service.delete::<Location>(&location_id(id)).await?,
        ))
    }

    async fn delete_all_locations(&self, ctx: &Context<'_>) -> Result<DeleteAllOutput> {
        let service = ctx.data::<Service>()?;
        Ok(service.delete_all::<Location>().await.into())
    }

    // --- Event ---

    async fn add_event(&self, ctx: &Context<'_>, data: AddEventInput) -> Result<EventObject> {
        let service = ctx.data::<Service>()?;
        Ok(EventObject(service.create::<Event>(data.into_draft()).await))
    }

    async fn update_event(
        &self,
        ctx: &Context<'_>,
        id: ID,
        data: Option<UpdateEventInput>,
    ) -> Result<EventObject> {
        let service = ctx.data::<Service>()?;
        let patch = data.unwrap_or_default().into_patch();
        Ok(EventObject(service.update::<Event>(&event_id(id), patch).await?))
    }

    async fn delete_event(&self, ctx: &Context<'_>, id: ID) -> Result<EventObject> {
        let service = ctx.data::<Service>()?;
        Ok(EventObject(service.delete::<Event>(&event_id(id)).await?))
    }

    async fn delete_all_events(&self, ctx: &Context<'_>) -> Result<DeleteAllOutput> {
        let service = ctx.data::<Service>()?;
        Ok(service.delete_all::<Event>().await.into())
    }
}

// ---------------------------------------------------------------------------
// Subscriptions
// ---------------------------------------------------------------------------

/// Live change feeds. `*Created` feeds take an optional filter; the
/// others deliver every change of their kind.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubscriptionRoot;

#[Subscription]
impl SubscriptionRoot {
    // --- User ---

    /// New users, or only the user with `id` when given.
    async fn user_created(
        &self,
        ctx: &Context<'_>,
        id: Option<ID>,
    ) -> Result<impl Stream<Item = UserObject>> {
        let service = ctx.data::<Service>()?;
        let stream = match id.map(user_id) {
            Some(id) => service.subscribe_filtered(Change::Created, move |u: &User| u.id == id),
            None => service.subscribe::<User>(Change::Created),
        };
        Ok(stream.map(UserObject))
    }

    async fn user_updated(&self, ctx: &Context<'_>) -> Result<impl Stream<Item = UserObject>> {
        let service = ctx.data::<Service>()?;
        Ok(service.subscribe::<User>(Change::Updated).map(UserObject))
    }

    async fn user_deleted(&self, ctx: &Context<'_>) -> Result<impl Stream<Item = UserObject>> {
        let service = ctx.data::<Service>()?;
        Ok(service.subscribe::<User>(Change::Deleted).map(UserObject))
    }

    // --- Location ---

    /// New locations, or only those called `name` when given.
    async fn location_created(
        &self,
        ctx: &Context<'_>,
        name: Option<String>,
    ) -> Result<impl Stream<Item = LocationObject>> {
        let service = ctx.data::<Service>()?;
        let stream = match name {
            Some(name) => {
                service.subscribe_filtered(Change::Created, move |l: &Location| l.name == name)
            }
            None => service.subscribe::<Location>(Change::Created),
        };
        Ok(stream.map(LocationObject))
    }

    async fn location_updated(
        &self,
        ctx: &Context<'_>,
    ) -> Result<impl Stream<Item = LocationObject>> {
        let service = ctx.data::<Service>()?;
        Ok(service
            .subscribe::<Location>(Change::Updated)
            .map(LocationObject))
    }

    async fn location_deleted(
        &self,
        ctx: &Context<'_>,
    ) -> Result<impl Stream<Item = LocationObject>> {
        let service = ctx.data::<Service>()?;
        Ok(service
            .subscribe::<Location>(Change::Deleted)
            .map(LocationObject))
    }

    // --- Event ---

    /// New events, or only the event with `id` when given.
    async fn event_created(
        &self,
        ctx: &Context<'_>,
        id: Option<ID>,
    ) -> Result<impl Stream<Item = EventObject>> {
        let service = ctx.data::<Service>()?;
        let stream = match id.map(event_id) {
            Some(id) => service.subscribe_filtered(Change::Created, move |e: &Event| e.id == id),
            None => service.subscribe::<Event>(Change::Created),
        };
        Ok(stream.map(EventObject))
    }

    async fn event_updated(&self, ctx: &Context<'_>) -> Result<impl Stream<Item = EventObject>> {
        let service = ctx.data::<Service>()?;
        Ok(service.subscribe::<Event>(Change::Updated).map(EventObject))
    }

    async fn event_deleted(&self, ctx: &Context<'_>) -> Result<impl Stream<Item = EventObject>> {
        let service = ctx.data::<Service>()?;
        Ok(service.subscribe::<Event>(Change::Deleted).map(EventObject))
    }

    // --- Participant ---

    /// New participants, or only the participant with `id` when given.
    async fn participant_created(
        &self,
        ctx: &Context<'_>,
        id: Option<ID>,
    ) -> Result<impl Stream<Item = ParticipantObject>> {
        let service = ctx.data::<Service>()?;
        let stream = match id.map(participant_id) {
            Some(id) => {
                service.subscribe_filtered(Change::Created, move |p: &Participant| p.id == id)
            }
            None => service.subscribe::<Participant>(Change::Created),
        };
        Ok(stream.map(ParticipantObject))
    }

    async fn participant_updated(
        &self,
        ctx: &Context<'_>,
    ) -> Result<impl Stream<Item = ParticipantObject>> {
        let service = ctx.data::<Service>()?;
        Ok(service
            .subscribe::<Participant>(Change::Updated)
            .map(ParticipantObject))
    }

    async fn participant_deleted(
        &self,
        ctx: &Context<'_>,
    ) -> Result<impl Stream<Item = ParticipantObject>> {
        let service = ctx.data::<Service>()?;
        Ok(service
            .subscribe::<Participant>(Change::Deleted)
            .map(ParticipantObject))
    }
}
