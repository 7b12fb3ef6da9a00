//! Subscription management for result synchronizers.
//!
//! Subscribers are called synchronously, on the caller's thread, in the
//! order they subscribed.

use crate::change_set::ChangeSet;
use alloc::boxed::Box;
use alloc::vec::Vec;

/// Unique identifier for a subscription. Ids start at 1 and are never reused.
pub type SubscriptionId = u64;

/// Callback type for change notifications.
pub type ChangeCallback = Box<dyn Fn(&ChangeSet)>;

/// A subscription to result changes.
pub struct Subscription {
    id: SubscriptionId,
    callback: ChangeCallback,
}

impl Subscription {
    /// Creates a new subscription.
    pub fn new<F>(id: SubscriptionId, callback: F) -> Self
    where
        F: Fn(&ChangeSet) + 'static,
    {
        Self {
            id,
            callback: Box::new(callback),
        }
    }

    #[inline]
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Delivers a change set to this subscription.
    pub fn notify(&self, changes: &ChangeSet) {
        (self.callback)(changes);
    }
}

/// Ordered set of subscriptions owned by one synchronizer.
pub struct SubscriptionManager {
    subscriptions: Vec<Subscription>,
    next_id: SubscriptionId,
}

impl Default for SubscriptionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl SubscriptionManager {
    pub fn new() -> Self {
        Self {
            subscriptions: Vec::new(),
            next_id: 1,
        }
    }

    /// Subscribes to changes with the given callback.
    ///
    /// Returns the subscription ID that can be used to unsubscribe.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: Fn(&ChangeSet) + 'static,
    {
        let id = self.next_id;
        self.next_id += 1;
        self.subscriptions.push(Subscription::new(id, callback));
        id
    }

    /// Unsubscribes by ID.
    ///
    /// Returns true if the subscription was found and removed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let len_before = self.subscriptions.len();
        self.subscriptions.retain(|sub| sub.id() != id);
        self.subscriptions.len() < len_before
    }

    /// Notifies every subscription, in subscription order.
    pub fn notify_all(&self, changes: &ChangeSet) {
        for sub in &self.subscriptions {
            sub.notify(changes);
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    pub fn clear(&mut self) {
        self.subscriptions.clear();
    }
}
