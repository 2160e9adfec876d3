//! The [`Record`] trait ties each record type to its collection, its
//! draft and patch types, and its notification payload variant.
//!
//! Everything generic in the store, the bus, and the service is written
//! once against this trait.

use core::fmt::Display;
use core::hash::Hash;

use rallypoint_types::{
    EntityKind, Event, EventId, EventPatch, Location, LocationId, LocationPatch, NewEvent,
    NewLocation, NewParticipant, NewUser, Participant, ParticipantId, ParticipantPatch, User,
    UserId, UserPatch,
};
use tokio::sync::RwLock;

use crate::collection::Collection;
use crate::store::Store;

/// A notification payload: one record of any kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// A user record.
    User(User),
    /// An event record.
    Event(Event),
    /// A location record.
    Location(Location),
    /// A participant record.
    Participant(Participant),
}

impl Payload {
    /// The collection the payload belongs to.
    pub const fn kind(&self) -> EntityKind {
        match self {
            Self::User(_) => EntityKind::User,
            Self::Event(_) => EntityKind::Event,
            Self::Location(_) => EntityKind::Location,
            Self::Participant(_) => EntityKind::Participant,
        }
    }
}

/// A record type stored in one of the four collections.
pub trait Record: Clone + Send + Sync + 'static {
    /// Identifier type.
    type Id: Clone + Eq + Hash + Display + Send + Sync + 'static;
    /// Fields supplied on create.
    type Draft: Send;
    /// Fields supplied on update.
    type Patch: Send;

    /// Which collection this record lives in.
    const KIND: EntityKind;

    /// The record's identifier.
    fn id(&self) -> &Self::Id;

    /// Generate a fresh identifier.
    fn new_id() -> Self::Id;

    /// Build a record from a draft and an identifier.
    fn from_draft(id: Self::Id, draft: Self::Draft) -> Self;

    /// Shallow-merge a patch into the record.
    fn merge(&mut self, patch: Self::Patch);

    /// The collection in `store` holding records of this type.
    fn collection(store: &Store) -> &RwLock<Collection<Self>>;

    /// Wrap the record as a bus payload.
    fn into_payload(self) -> Payload;

    /// Unwrap a bus payload of this type.
    fn from_payload(payload: Payload) -> Option<Self>;
}

macro_rules! impl_record {
    (
        $record:ident, $id:ident, $draft:ident, $patch:ident,
        $kind:ident, $field:ident
    ) => {
        impl Record for $record {
            type Id = $id;
            type Draft = $draft;
            type Patch = $patch;

            const KIND: EntityKind = EntityKind::$kind;

            fn id(&self) -> &$id {
                &self.id
            }

            fn new_id() -> $id {
                $id::new()
            }

            fn from_draft(id: $id, draft: $draft) -> Self {
                draft.into_record(id)
            }

            fn merge(&mut self, patch: $patch) {
                self.apply(patch);
            }

            fn collection(store: &Store) -> &RwLock<Collection<Self>> {
                &store.$field
            }

            fn into_payload(self) -> Payload {
                Payload::$kind(self)
            }

            fn from_payload(payload: Payload) -> Option<Self> {
                match payload {
                    Payload::$kind(record) => Some(record),
                    _ => None,
                }
            }
        }
    };
}

impl_record!(User, UserId, NewUser, UserPatch, User, users);
impl_record!(Event, EventId, NewEvent, EventPatch, Event, events);
impl_record!(Location, LocationId, NewLocation, LocationPatch, Location, locations);
impl_record!(Participant, ParticipantId, NewParticipant, ParticipantPatch, Participant, participants);
