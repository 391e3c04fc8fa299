//! # Change notification
//!
//! A synchronous observer registry. Presentation layers subscribe here instead
//! of being called from inside core mutations.

use serde::{Deserialize, Serialize};

/// Handle returned by [`EventBus::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriptionId(u64);

type Observer<E> = Box<dyn FnMut(&E) + Send>;

pub struct EventBus<E> {
    next_id: u64,
    observers: Vec<(SubscriptionId, Observer<E>)>,
}

impl<E> EventBus<E> {
    pub fn new() -> Self {
        Self { next_id: 0, observers: Vec::new() }
    }

    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&E) + Send + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Returns `false` if the id was unknown (already unsubscribed).
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        self.observers.len() != before
    }

    /// Delivers `event` to every observer in subscription order.
    pub fn publish(&mut self, event: &E) {
        for (_, observer) in self.observers.iter_mut() {
            observer(event);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.observers.len()
    }

    pub fn clear(&mut self) {
        self.observers.clear();
    }
}

impl<E> Default for EventBus<E> {
    fn default() -> Self {
        Self::new()
    }
}
