//! In-memory storage and change notification for the Rallypoint API.
//!
//! # Architecture
//!
//! The [`Store`] owns four ordered collections (users, events, locations,
//! participants) with process lifetime. Nothing is persisted; a restart
//! starts empty or from [`SeedData`]. Foreign keys are plain ids that are
//! never validated, and associations are resolved on read.
//!
//! The [`Service`] wraps the store together with the [`EventBus`]. Every
//! create, update, and delete publishes a notification; bulk deletes do
//! not. Subscribers get a stream of typed records per topic, optionally
//! filtered.
//!
//! # Modules
//!
//! - [`record`] -- The trait that makes store, bus, and service generic
//! - [`collection`] -- Ordered storage with an id index
//! - [`store`] -- The four collections and their CRUD operations
//! - [`relations`] -- Read-time association lookups
//! - [`bus`] -- Broadcast-based publish/subscribe
//! - [`service`] -- Query and mutation handlers
//! - [`seed`] -- YAML seed data loaded at startup

pub mod bus;
pub mod collection;
pub mod error;
pub mod record;
pub mod relations;
pub mod seed;
pub mod service;
pub mod store;

pub use bus::{EventBus, Notification, Subscription};
pub use collection::Collection;
pub use error::StoreError;
pub use record::{Payload, Record};
pub use seed::{SeedData, SeedError};
pub use service::Service;
pub use store::{Store, StoreCounts};
