//! Query and mutation handlers.
//!
//! [`Service`] pairs the [`Store`] with the [`EventBus`] so every
//! single-record mutation publishes its notification. Bulk deletes are the
//! one mutation that stays silent.

use std::sync::Arc;

use rallypoint_types::{Change, DeleteCount};
use tracing::debug;

use crate::bus::{EventBus, Subscription};
use crate::error::StoreError;
use crate::record::Record;
use crate::store::Store;

/// Handlers for every query and mutation, shared by all requests.
#[derive(Clone, Default)]
pub struct Service {
    store: Arc<Store>,
    bus: EventBus,
}

impl Service {
    /// Wrap a store and a bus.
    pub const fn new(store: Arc<Store>, bus: EventBus) -> Self {
        Self { store, bus }
    }

    /// The underlying store, for read-only resolution.
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// The notification bus.
    pub const fn bus(&self) -> &EventBus {
        &self.bus
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Every record of type `R`.
    pub async fn list<R: Record>(&self) -> Vec<R> {
        self.store.list::<R>().await
    }

    /// One record by id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the id is unknown.
    pub async fn get<R: Record>(&self, id: &R::Id) -> Result<R, StoreError> {
        self.store
            .get::<R>(id)
            .await
            .ok_or_else(|| StoreError::not_found(R::KIND, id))
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Create a record and publish it on the `Created` topic.
    pub async fn create<R: Record>(&self, draft: R::Draft) -> R {
        let record = self.store.create::<R>(draft).await;
        let delivered = self.bus.publish(Change::Created, record.clone());
        debug!(entity = %R::KIND, id = %record.id(), delivered, "record created");
        record
    }

    /// Merge a patch into a record and publish the result on the
    /// `Updated` topic.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the id is unknown. Nothing is
    /// published in that case.
    pub async fn update<R: Record>(&self, id: &R::Id, patch: R::Patch) -> Result<R, StoreError> {
        let record = self.store.update::<R>(id, patch).await?;
        let delivered = self.bus.publish(Change::Updated, record.clone());
        debug!(entity = %R::KIND, %id, delivered, "record updated");
        Ok(record)
    }

    /// Remove a record and publish its last state on the `Deleted` topic.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the id is unknown.
    pub async fn delete<R: Record>(&self, id: &R::Id) -> Result<R, StoreError> {
        let record = self.store.delete::<R>(id).await?;
        let delivered = self.bus.publish(Change::Deleted, record.clone());
        debug!(entity = %R::KIND, %id, delivered, "record deleted");
        Ok(record)
    }

    /// Clear the collection of `R`. Publishes nothing.
    pub async fn delete_all<R: Record>(&self) -> DeleteCount {
        let count = self.store.delete_all::<R>().await;
        debug!(entity = %R::KIND, count, "collection cleared");
        DeleteCount { count }
    }

    // -----------------------------------------------------------------------
    // Subscriptions
    // -----------------------------------------------------------------------

    /// Stream records of type `R` published with `change`.
    pub fn subscribe<R: Record>(&self, change: Change) -> Subscription<R> {
        self.bus.subscribe::<R>(change)
    }

    /// Stream records of type `R` published with `change` that satisfy
    /// `filter`.
    pub fn subscribe_filtered<R, F>(&self, change: Change, filter: F) -> Subscription<R>
    where
        R: Record,
        F: Fn(&R) -> bool + Send + 'static,
    {
        self.bus.subscribe_filtered(change, filter)
    }
}

#[cfg(test)]
mod tests {
    use futures::{FutureExt, StreamExt};
    use rallypoint_types::{
        NewParticipant, NewUser, Participant, User, UserId, UserPatch,
    };

    use super::*;

    fn ann() -> NewUser {
        NewUser {
            username: String::from("ann"),
            email: String::from("a@x.com"),
        }
    }

    fn participant(user: &str) -> NewParticipant {
        NewParticipant {
            user_id: user.into(),
            event_id: "e1".into(),
        }
    }

    #[tokio::test]
    async fn create_publishes_exact_record_once() {
        let service = Service::default();
        let mut created = service.subscribe::<User>(Change::Created);

        let user: User = service.create(ann()).await;
        assert_eq!(user.username, "ann");
        assert_eq!(user.email, "a@x.com");

        assert_eq!(created.next().await, Some(user.clone()));
        assert!(created.next().now_or_never().is_none());
        assert_eq!(service.list::<User>().await, vec![user]);
    }

    #[tokio::test]
    async fn created_filter_by_id_skips_other_records() {
        let service = Service::default();
        let mut only_x =
            service.subscribe_filtered::<User, _>(Change::Created, |u| u.id.as_str() == "X");

        let _: User = service.create(ann()).await;
        assert!(only_x.next().now_or_never().is_none());
    }

    #[tokio::test]
    async fn update_publishes_merged_record() {
        let service = Service::default();
        let user: User = service.create(ann()).await;
        let mut updated = service.subscribe::<User>(Change::Updated);

        let merged = service
            .update::<User>(
                &user.id,
                UserPatch {
                    username: None,
                    email: Some(String::from("ann@new.org")),
                },
            )
            .await
            .unwrap();

        assert_eq!(merged.username, "ann");
        assert_eq!(merged.email, "ann@new.org");
        assert_eq!(updated.next().await, Some(merged));
    }

    #[tokio::test]
    async fn update_unknown_id_fails_without_publishing() {
        let service = Service::default();
        let mut updated = service.subscribe::<User>(Change::Updated);

        let err = service
            .update::<User>(&UserId::from("ghost"), UserPatch::default())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
        assert!(updated.next().now_or_never().is_none());
    }

    #[tokio::test]
    async fn delete_first_record_returns_prior_values() {
        let service = Service::default();
        let first: User = service.create(ann()).await;
        let second: User = service.create(ann()).await;
        let mut deleted = service.subscribe::<User>(Change::Deleted);

        let removed = service.delete::<User>(&first.id).await.unwrap();
        assert_eq!(removed, first);
        assert_eq!(service.list::<User>().await, vec![second]);
        assert_eq!(deleted.next().await, Some(first.clone()));

        let err = service.get::<User>(&first.id).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn delete_all_is_silent() {
        let service = Service::default();
        for user in ["u1", "u2", "u3"] {
            let _: Participant = service.create(participant(user)).await;
        }
        let mut deleted = service.subscribe::<Participant>(Change::Deleted);

        let result = service.delete_all::<Participant>().await;
        assert_eq!(result, DeleteCount { count: 3 });
        assert!(service.list::<Participant>().await.is_empty());
        assert!(deleted.next().now_or_never().is_none());
    }
}
