use std::fmt;

use crate::collision::manifold::CollisionEvent;

/// Token returned by [`CollisionObservers::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback = Box<dyn FnMut(&CollisionEvent) + Send>;

/// Callbacks notified when the owning collider takes part in a collision.
///
/// Subscriptions live until explicitly removed or the list is dropped.
#[derive(Default)]
pub struct CollisionObservers {
    next_id: u64,
    callbacks: Vec<(SubscriptionId, Callback)>,
}

impl fmt::Debug for CollisionObservers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CollisionObservers({} subscribers)", self.callbacks.len())
    }
}

impl CollisionObservers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&CollisionEvent) + Send + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.callbacks.push((id, Box::new(callback)));
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.callbacks.len();
        self.callbacks.retain(|(existing, _)| *existing != id);
        self.callbacks.len() != before
    }

    /// Calls every subscriber in subscription order.
    pub fn notify(&mut self, event: &CollisionEvent) {
        for (_, callback) in &mut self.callbacks {
            callback(event);
        }
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}
