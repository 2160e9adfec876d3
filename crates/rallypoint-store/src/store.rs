//! The process-local record store.
//!
//! [`Store`] owns the four collections. Each collection sits behind its own
//! [`RwLock`], held only for the duration of a single operation, so an
//! update's read-merge-write happens under one write guard. There are no
//! transactions spanning collections.

use rallypoint_types::{Event, Location, Participant, User};
use serde::Serialize;
use tokio::sync::RwLock;

use crate::collection::Collection;
use crate::error::StoreError;
use crate::record::Record;

/// Record counts per collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StoreCounts {
    /// Number of users.
    pub users: usize,
    /// Number of events.
    pub events: usize,
    /// Number of locations.
    pub locations: usize,
    /// Number of participants.
    pub participants: usize,
}

/// Four independently addressable ordered collections.
#[derive(Default)]
pub struct Store {
    pub(crate) users: RwLock<Collection<User>>,
    pub(crate) events: RwLock<Collection<Event>>,
    pub(crate) locations: RwLock<Collection<Location>>,
    pub(crate) participants: RwLock<Collection<Participant>>,
}

impl Store {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every record of type `R` in insertion order.
    pub async fn list<R: Record>(&self) -> Vec<R> {
        R::collection(self).read().await.iter().cloned().collect()
    }

    /// The record of type `R` with `id`, if any.
    pub async fn get<R: Record>(&self, id: &R::Id) -> Option<R> {
        R::collection(self).read().await.get(id).cloned()
    }

    /// Assign a fresh id to `draft`, append it, and return the new record.
    pub async fn create<R: Record>(&self, draft: R::Draft) -> R {
        let mut collection = R::collection(self).write().await;
        let mut id = R::new_id();
        while collection.contains(&id) {
            id = R::new_id();
        }
        let record = R::from_draft(id, draft);
        // The id was checked above under the same guard.
        let _ = collection.insert(record.clone());
        record
    }

    /// Append a record that already carries its id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Duplicate`] if the id is taken.
    pub async fn insert<R: Record>(&self, record: R) -> Result<(), StoreError> {
        R::collection(self)
            .write()
            .await
            .insert(record)
            .map_err(|rejected| StoreError::Duplicate {
                kind: R::KIND,
                id: rejected.id().to_string(),
            })
    }

    /// Merge `patch` into the record with `id` and return the merged record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no record has that id.
    pub async fn update<R: Record>(&self, id: &R::Id, patch: R::Patch) -> Result<R, StoreError> {
        R::collection(self)
            .write()
            .await
            .update(id, patch)
            .ok_or_else(|| StoreError::not_found(R::KIND, id))
    }

    /// Remove the record with `id` and return it.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no record has that id.
    pub async fn delete<R: Record>(&self, id: &R::Id) -> Result<R, StoreError> {
        R::collection(self)
            .write()
            .await
            .remove(id)
            .ok_or_else(|| StoreError::not_found(R::KIND, id))
    }

    /// Empty the collection of `R`, returning how many records it held.
    pub async fn delete_all<R: Record>(&self) -> usize {
        R::collection(self).write().await.clear()
    }

    /// Current size of every collection.
    pub async fn counts(&self) -> StoreCounts {
        StoreCounts {
            users: self.users.read().await.len(),
            events: self.events.read().await.len(),
            locations: self.locations.read().await.len(),
            participants: self.participants.read().await.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use rallypoint_types::{NewUser, UserId, UserPatch};

    use super::*;

    fn ann() -> NewUser {
        NewUser {
            username: String::from("ann"),
            email: String::from("a@x.com"),
        }
    }

    #[tokio::test]
    async fn create_appends_with_fresh_id() {
        let store = Store::new();
        let first: User = store.create(ann()).await;
        let second: User = store.create(ann()).await;

        assert_ne!(first.id, second.id);
        let users = store.list::<User>().await;
        assert_eq!(users, vec![first, second.clone()]);
        assert_eq!(users.last(), Some(&second));
    }

    #[tokio::test]
    async fn get_unknown_id_is_none() {
        let store = Store::new();
        assert!(store.get::<User>(&UserId::from("nope")).await.is_none());
    }

    #[tokio::test]
    async fn update_and_delete_work_on_first_record() {
        let store = Store::new();
        let first: User = store.create(ann()).await;
        let _second: User = store.create(ann()).await;

        let updated = store
            .update::<User>(
                &first.id,
                UserPatch {
                    username: Some(String::from("anna")),
                    email: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.username, "anna");
        assert_eq!(updated.email, "a@x.com");

        let deleted = store.delete::<User>(&first.id).await.unwrap();
        assert_eq!(deleted, updated);
        assert_eq!(store.list::<User>().await.len(), 1);
    }

    #[tokio::test]
    async fn update_missing_is_not_found() {
        let store = Store::new();
        let err = store
            .update::<User>(&UserId::from("ghost"), UserPatch::default())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "user not found: ghost");
    }

    #[tokio::test]
    async fn insert_rejects_duplicate_ids() {
        let store = Store::new();
        let user = ann().into_record(UserId::from("u1"));
        store.insert(user.clone()).await.unwrap();
        let err = store.insert(user).await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicate { .. }));
    }

    #[tokio::test]
    async fn counts_reflect_collections() {
        let store = Store::new();
        let _: User = store.create(ann()).await;
        let _: User = store.create(ann()).await;
        let counts = store.counts().await;
        assert_eq!(counts.users, 2);
        assert_eq!(counts.events, 0);
        assert_eq!(store.delete_all::<User>().await, 2);
        assert_eq!(store.counts().await, StoreCounts::default());
    }
}
