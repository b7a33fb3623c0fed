//! In-process publish/subscribe registry for domain events.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use dashmap::DashMap;
use tokio::sync::mpsc;
use tracing::debug;

use super::DomainEvent;

type Subscribers = DashMap<u64, mpsc::UnboundedSender<DomainEvent>>;

/// Registry of live subscribers.
///
/// Cloning the bus is cheap; all clones share the same subscriber set.
/// A subscriber is removed when it calls [`Subscription::unsubscribe`],
/// when its [`Subscription`] is dropped, or lazily on the next publish
/// once its receiver is gone.
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    inner: Arc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    subscribers: Subscribers,
    next_id: AtomicU64,
}

impl EventBus {
    /// Creates an empty bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new subscriber.
    pub fn subscribe(&self) -> Subscription {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = mpsc::unbounded_channel();
        self.inner.subscribers.insert(id, tx);
        debug!(subscription_id = id, "Event bus subscriber added");

        Subscription {
            id,
            receiver: rx,
            bus: Arc::downgrade(&self.inner),
        }
    }

    /// Delivers an event to every live subscriber. Returns how many
    /// subscribers received it.
    pub fn publish(&self, event: DomainEvent) -> usize {
        let mut delivered = 0;
        let mut closed = Vec::new();

        for entry in self.inner.subscribers.iter() {
            if entry.value().send(event.clone()).is_ok() {
                delivered += 1;
            } else {
                closed.push(*entry.key());
            }
        }

        for id in closed {
            self.inner.subscribers.remove(&id);
        }

        delivered
    }

    /// Number of registered subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.len()
    }
}

/// A handle to one subscription on an [`EventBus`].
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    receiver: mpsc::UnboundedReceiver<DomainEvent>,
    bus: Weak<Inner>,
}

impl Subscription {
    /// The subscription ID.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Waits for the next event. Returns `None` once unsubscribed.
    pub async fn recv(&mut self) -> Option<DomainEvent> {
        self.receiver.recv().await
    }

    /// Returns an already-delivered event without waiting.
    pub fn try_recv(&mut self) -> Option<DomainEvent> {
        self.receiver.try_recv().ok()
    }

    /// Removes this subscriber from the bus. Events already delivered can
    /// still be drained with [`Subscription::recv`].
    pub fn unsubscribe(&mut self) {
        if let Some(inner) = self.bus.upgrade() {
            if inner.subscribers.remove(&self.id).is_some() {
                debug!(subscription_id = self.id, "Event bus subscriber removed");
            }
        }
        self.bus = Weak::new();
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}
