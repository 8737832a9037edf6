//! In-process invalidation bus.
//!
//! [`EventBus`] keeps an ordered registry of subscribers keyed by
//! [`EntityKind`]. It is created once at the composition root and shared
//! via `Arc<EventBus>`; there is no global instance.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use cwcrm_core::EntityKind;
use tokio::sync::mpsc;

use crate::event::CrmEvent;

/// Subscriber callback. Runs synchronously inside [`EventBus::broadcast`].
pub type Callback = Arc<dyn Fn(&CrmEvent) + Send + Sync>;

struct Subscriber {
    id: u64,
    kind: EntityKind,
    callback: Callback,
}

/// Proof of a live subscription. Pass it to [`EventBus::destroy`] to
/// stop receiving events.
#[derive(Debug, PartialEq, Eq)]
pub struct SubscriptionHandle {
    id: u64,
    kind: EntityKind,
}

impl SubscriptionHandle {
    /// The entity kind this subscription listens to.
    pub fn kind(&self) -> EntityKind {
        self.kind
    }
}

/// Publish/subscribe registry for [`CrmEvent`]s.
///
/// # Usage
///
/// ```rust
/// use cwcrm_core::EntityKind;
/// use cwcrm_events::{ChangeKind, CrmEvent, EventBus, Modification};
///
/// let bus = EventBus::new();
/// let handle = bus.subscribe(EntityKind::Waiver, |event| {
///     println!("reload after {}", event.modification().content);
/// });
///
/// bus.broadcast(&CrmEvent::new(
///     EntityKind::Waiver,
///     Modification::new(EntityKind::Waiver, ChangeKind::Created, 1),
/// ));
/// bus.destroy(&handle);
/// ```
pub struct EventBus {
    subscribers: Mutex<Vec<Subscriber>>,
    next_id: AtomicU64,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            subscribers: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Register `callback` for events of `kind`.
    ///
    /// Callbacks for the same kind run in registration order.
    pub fn subscribe<F>(&self, kind: EntityKind, callback: F) -> SubscriptionHandle
    where
        F: Fn(&CrmEvent) + Send + Sync + 'static,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.lock().push(Subscriber {
            id,
            kind,
            callback: Arc::new(callback),
        });
        tracing::debug!(
            subscription = id,
            entity = %kind,
            event_name = kind.event_name(),
            "Subscribed"
        );
        SubscriptionHandle { id, kind }
    }

    /// Register a subscriber that forwards every event of `kind` into a
    /// channel.
    ///
    /// Delivery into the channel is still synchronous and ordered; the
    /// receiver drains it whenever it is ready to react.
    pub fn subscribe_channel(
        &self,
        kind: EntityKind,
    ) -> (SubscriptionHandle, mpsc::UnboundedReceiver<CrmEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = self.subscribe(kind, move |event| {
            // A dropped receiver only means the listener is gone.
            let _ = tx.send(event.clone());
        });
        (handle, rx)
    }

    /// Remove a subscription. Returns `false` if it was already removed.
    pub fn destroy(&self, handle: &SubscriptionHandle) -> bool {
        let mut subscribers = self.lock();
        let before = subscribers.len();
        subscribers.retain(|s| s.id != handle.id);
        let removed = subscribers.len() != before;
        if removed {
            tracing::debug!(subscription = handle.id, entity = %handle.kind, "Unsubscribed");
        }
        removed
    }

    /// Deliver `event` to every current subscriber of its entity kind.
    ///
    /// Callbacks run on the caller's thread, in subscription order, after
    /// the registry lock is released. Returns the number of callbacks run;
    /// zero subscribers is not an error.
    pub fn broadcast(&self, event: &CrmEvent) -> usize {
        let kind = event.kind();
        let targets: Vec<Callback> = self
            .lock()
            .iter()
            .filter(|s| s.kind == kind)
            .map(|s| Arc::clone(&s.callback))
            .collect();

        tracing::debug!(
            event_name = event.event_name(),
            id = event.modification().id,
            subscribers = targets.len(),
            "Broadcasting invalidation"
        );

        for callback in &targets {
            callback(event);
        }
        targets.len()
    }

    /// Number of live subscriptions for `kind`.
    pub fn subscriber_count(&self, kind: EntityKind) -> usize {
        self.lock().iter().filter(|s| s.kind == kind).count()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Subscriber>> {
        // The registry stays consistent even if a holder panicked.
        self.subscribers.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
