use parking_lot::RwLock;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Callback invoked with the event arguments
pub type EventHandler<A> = Arc<dyn Fn(&A) + Send + Sync>;

/// Token returned by [`EventHandlers::add`], used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

/// Multi-subscriber callback registry
///
/// Handlers are invoked in subscription order on the raising thread. The
/// handler list is snapshotted before invocation, so a handler may add or
/// remove subscriptions (including its own) without deadlocking; such changes
/// take effect from the next raise.
pub struct EventHandlers<A> {
    next_id: AtomicU64,
    handlers: RwLock<Vec<(SubscriptionId, EventHandler<A>)>>,
}

impl<A> EventHandlers<A> {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            handlers: RwLock::new(Vec::new()),
        }
    }

    pub fn add<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&A) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.handlers.write().push((id, Arc::new(handler)));
        id
    }

    /// Returns `false` if the subscription was not registered
    pub fn remove(&self, id: SubscriptionId) -> bool {
        let mut handlers = self.handlers.write();
        let before = handlers.len();
        handlers.retain(|(existing, _)| *existing != id);
        handlers.len() != before
    }

    pub fn len(&self) -> usize {
        self.handlers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.read().is_empty()
    }

    pub fn raise(&self, args: &A) {
        let snapshot: Vec<EventHandler<A>> = self
            .handlers
            .read()
            .iter()
            .map(|(_, handler)| Arc::clone(handler))
            .collect();

        for handler in snapshot {
            handler(args);
        }
    }
}

impl<A> Default for EventHandlers<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> fmt::Debug for EventHandlers<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventHandlers")
            .field("subscribers", &self.len())
            .finish()
    }
}
