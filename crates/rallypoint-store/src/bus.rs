//! In-process publish/subscribe for record changes.
//!
//! [`EventBus`] keeps one [`broadcast`] channel of [`Notification`]s per
//! topic, so traffic on one topic never pushes another topic's
//! subscribers behind. Publishing never blocks and never fails: with no
//! subscribers the notification is dropped. A subscription is a stream of
//! typed records for one topic, optionally narrowed by a predicate.
//! Subscribers only see notifications published after they subscribed.
//!
//! If a subscriber falls more than the channel capacity behind on its own
//! topic, the missed notifications are skipped and the stream resumes from
//! the oldest one still buffered.

use std::collections::HashMap;
use std::sync::Arc;

use futures::stream::{BoxStream, StreamExt};
use rallypoint_types::{Change, Topic};
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tracing::warn;

use crate::record::{Payload, Record};

/// Default capacity of each topic's notification channel.
pub const DEFAULT_CAPACITY: usize = 256;

/// A record change as seen by subscribers.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    /// What happened to the record.
    pub change: Change,
    /// The record after creation or update, or before deletion.
    pub payload: Payload,
}

impl Notification {
    /// The topic this notification is delivered on.
    pub const fn topic(&self) -> Topic {
        Topic::new(self.payload.kind(), self.change)
    }
}

/// A live stream of records published on one topic.
pub type Subscription<R> = BoxStream<'static, R>;

/// Fan-out channels shared by every mutation handler, one per topic.
#[derive(Debug, Clone)]
pub struct EventBus {
    channels: Arc<HashMap<Topic, broadcast::Sender<Notification>>>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl EventBus {
    /// Create a bus whose subscribers may lag up to `capacity` notifications
    /// on their own topic.
    pub fn new(capacity: usize) -> Self {
        let channels = Topic::all()
            .map(|topic| (topic, broadcast::channel(capacity.max(1)).0))
            .collect();
        Self {
            channels: Arc::new(channels),
        }
    }

    /// Publish `record` on the `change` topic of its kind.
    ///
    /// Returns the number of subscribers of that topic the notification was
    /// handed to. Returns 0 if nobody is listening (this is not an error).
    pub fn publish<R: Record>(&self, change: Change, record: R) -> usize {
        let Some(tx) = self.channels.get(&Topic::new(R::KIND, change)) else {
            return 0;
        };
        let notification = Notification {
            change,
            payload: record.into_payload(),
        };
        // send returns Err only when there are zero receivers.
        tx.send(notification).unwrap_or(0)
    }

    /// Subscribe to every record of type `R` published with `change`.
    pub fn subscribe<R: Record>(&self, change: Change) -> Subscription<R> {
        self.subscribe_filtered(change, |_: &R| true)
    }

    /// Subscribe to records of type `R` published with `change` for which
    /// `filter` returns `true`.
    ///
    /// The receiver is registered before this returns, so anything
    /// published afterwards is observed even if the stream is polled later.
    pub fn subscribe_filtered<R, F>(&self, change: Change, filter: F) -> Subscription<R>
    where
        R: Record,
        F: Fn(&R) -> bool + Send + 'static,
    {
        let topic = Topic::new(R::KIND, change);
        let Some(tx) = self.channels.get(&topic) else {
            return futures::stream::empty().boxed();
        };
        BroadcastStream::new(tx.subscribe())
            .filter_map(move |item| {
                let record = match item {
                    Ok(notification) => {
                        R::from_payload(notification.payload).filter(|record| filter(record))
                    }
                    Err(BroadcastStreamRecvError::Lagged(skipped)) => {
                        warn!(%topic, skipped, "subscriber lagged, skipping ahead");
                        None
                    }
                };
                futures::future::ready(record)
            })
            .boxed()
    }

    /// Number of live subscriptions on `topic`.
    pub fn topic_subscriber_count(&self, topic: Topic) -> usize {
        self.channels
            .get(&topic)
            .map_or(0, broadcast::Sender::receiver_count)
    }

    /// Number of live subscriptions across all topics.
    pub fn subscriber_count(&self) -> usize {
        self.channels
            .values()
            .map(broadcast::Sender::receiver_count)
            .sum()
    }
}
