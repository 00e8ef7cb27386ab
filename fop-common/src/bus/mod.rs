//! Shared view-state bus
//!
//! Fragments mounted independently on one page cannot hold references to
//! each other, yet their search boxes and filter pills must agree. Each
//! fragment instead talks to one named, process-wide slot:
//!
//! - [`ViewStateBus::read`] returns the slot merged over [`ViewState`] defaults
//! - [`ViewStateBus::write`] merges a [`ViewStatePatch`] (last write wins per
//!   key), stores it, then synchronously notifies every subscriber
//! - [`ViewStateBus::subscribe`] / [`ViewStateBus::unsubscribe`] register
//!   callbacks; unmounting a fragment is just `unsubscribe`
//!
//! Notifications carry no state. Subscribers always re-`read()`, so a
//! reordered or nested notification can never hand them a stale snapshot.
//!
//! # Delivery guarantees
//!
//! - Synchronous, within the writing call, in registration order
//! - A panicking subscriber is isolated and logged; the remaining subscribers
//!   are still notified
//! - No lock is held while callbacks run, so callbacks may read, write,
//!   subscribe or unsubscribe. A subscriber added during a broadcast is first
//!   notified by the next broadcast; one removed during a broadcast is not
//!   called again, including later in the same broadcast.
//!
//! # Examples
//!
//! ```
//! use fop_common::bus::{ViewStateBus, ViewStatePatch};
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//!
//! let bus = Arc::new(ViewStateBus::new("example.viewState"));
//! let seen = Arc::new(AtomicUsize::new(0));
//!
//! let reader = Arc::clone(&bus);
//! let counter = Arc::clone(&seen);
//! bus.subscribe(move |_notice| {
//!     if reader.read().query == "pump" {
//!         counter.fetch_add(1, Ordering::SeqCst);
//!     }
//! });
//!
//! bus.write(&ViewStatePatch::query("pump"));
//! assert_eq!(seen.load(Ordering::SeqCst), 1);
//! ```

mod state;

pub use state::{is_filter_all, ViewMode, ViewState, ViewStatePatch, FILTER_ALL};

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use tracing::{debug, warn};

/// Slot key shared by every portal fragment on a page
pub const VIEW_STATE_SLOT_KEY: &str = "fieldops.viewState";

/// Broadcast name for [`VIEW_STATE_SLOT_KEY`]
pub const VIEW_STATE_EVENT: &str = "fieldops.viewState:changed";

/// Broadcast name derived from a slot key
///
/// Fragments never spell event names themselves; deriving them from the key
/// keeps every fragment on a page listening to the channel its writers use.
pub fn event_name_for(key: &str) -> String {
    format!("{}:changed", key)
}

/// Payload-free notification delivered to subscribers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusNotice<'a> {
    pub key: &'a str,
    pub event_name: &'a str,
}

/// Handle returned by [`ViewStateBus::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

/// Outcome of one broadcast
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Delivery {
    /// Subscribers invoked
    pub notified: usize,
    /// Subscribers that panicked (included in `notified`)
    pub panicked: usize,
}

type Callback = Arc<dyn Fn(&BusNotice<'_>) + Send + Sync>;

/// One named view-state slot plus its subscriber list
pub struct ViewStateBus {
    key: String,
    event_name: String,
    slot: RwLock<ViewStatePatch>,
    subscribers: Mutex<Vec<(Subscription, Callback)>>,
    next_id: AtomicU64,
}

static REGISTRY: Lazy<Mutex<HashMap<String, Arc<ViewStateBus>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

impl ViewStateBus {
    /// Create a standalone bus (not registered process-wide)
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            event_name: event_name_for(&key),
            key,
            slot: RwLock::new(ViewStatePatch::default()),
            subscribers: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Process-wide bus for `key`, created lazily on first access
    ///
    /// Every call with the same key returns the same bus.
    pub fn named(key: &str) -> Arc<ViewStateBus> {
        let mut registry = REGISTRY.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(
            registry
                .entry(key.to_string())
                .or_insert_with(|| {
                    debug!("Creating view-state slot '{}'", key);
                    Arc::new(ViewStateBus::new(key))
                }),
        )
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn event_name(&self) -> &str {
        &self.event_name
    }

    /// Current slot contents merged over defaults
    pub fn read(&self) -> ViewState {
        let slot = self.slot.read().unwrap_or_else(PoisonError::into_inner);
        ViewState::default().with(&slot)
    }

    /// Raw slot contents (only the keys written so far)
    pub fn snapshot(&self) -> ViewStatePatch {
        self.slot.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Merge `patch` into the slot and broadcast
    pub fn write(&self, patch: &ViewStatePatch) -> Delivery {
        {
            let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
            slot.merge(patch);
        }
        debug!(key = %self.key, ?patch, "View state written");
        self.broadcast()
    }

    /// Register a callback fired on every broadcast
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&BusNotice<'_>) + Send + Sync + 'static,
    {
        let id = Subscription(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, Arc::new(callback)));
        id
    }

    /// Remove a callback; returns false if it was not registered
    pub fn unsubscribe(&self, subscription: Subscription) -> bool {
        let mut subscribers = self.subscribers.lock().unwrap_or_else(PoisonError::into_inner);
        let before = subscribers.len();
        subscribers.retain(|(id, _)| *id != subscription);
        subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Drop all state and subscribers, as on a fresh page load
    pub fn reset(&self) {
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = ViewStatePatch::default();
        self.subscribers.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }

    fn is_subscribed(&self, subscription: Subscription) -> bool {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .any(|(id, _)| *id == subscription)
    }

    fn broadcast(&self) -> Delivery {
        let snapshot: Vec<(Subscription, Callback)> = self
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        let notice = BusNotice {
            key: &self.key,
            event_name: &self.event_name,
        };
        let mut delivery = Delivery::default();

        for (id, callback) in snapshot {
            // Unsubscribed by an earlier callback in this broadcast
            if !self.is_subscribed(id) {
                continue;
            }
            delivery.notified += 1;
            if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| callback(&notice))) {
                delivery.panicked += 1;
                warn!(
                    "Subscriber {:?} on '{}' panicked during broadcast: {}",
                    id,
                    self.event_name,
                    panic_message(payload.as_ref())
                );
            }
        }

        delivery
    }
}

impl std::fmt::Debug for ViewStateBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewStateBus")
            .field("key", &self.key)
            .field("event_name", &self.event_name)
            .field("state", &self.read())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

// ========================================
// Portal-wide slot
// ========================================

/// The portal's page-wide bus ([`VIEW_STATE_SLOT_KEY`])
pub fn shared() -> Arc<ViewStateBus> {
    ViewStateBus::named(VIEW_STATE_SLOT_KEY)
}

/// Read the portal-wide view state
pub fn read() -> ViewState {
    shared().read()
}

/// Write to the portal-wide view state and broadcast
pub fn write(patch: &ViewStatePatch) -> Delivery {
    shared().write(patch)
}

/// Subscribe to the portal-wide view state
pub fn subscribe<F>(callback: F) -> Subscription
where
    F: Fn(&BusNotice<'_>) + Send + Sync + 'static,
{
    shared().subscribe(callback)
}

/// Unsubscribe from the portal-wide view state
pub fn unsubscribe(subscription: Subscription) -> bool {
    shared().unsubscribe(subscription)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_read_before_write_returns_defaults() {
        let bus = ViewStateBus::new("test.defaults");
        assert_eq!(bus.read(), ViewState::default());
        assert!(bus.snapshot().is_empty());
    }

    #[test]
    fn test_write_merges_with_previous_keys() {
        let bus = ViewStateBus::new("test.merge");
        bus.write(&ViewStatePatch::status("Closed"));
        bus.write(&ViewStatePatch::query("x"));

        let state = bus.read();
        assert_eq!(state.query, "x");
        assert_eq!(state.status_filter, "Closed");
    }

    #[test]
    fn test_every_subscriber_reads_merged_state() {
        let bus = Arc::new(ViewStateBus::new("test.fanout"));
        bus.write(&ViewStatePatch::view_mode(ViewMode::Mine));

        let seen: Arc<Mutex<Vec<ViewState>>> = Arc::new(Mutex::new(Vec::new()));
        for _ in 0..3 {
            let reader = Arc::clone(&bus);
            let seen = Arc::clone(&seen);
            bus.subscribe(move |_| seen.lock().unwrap().push(reader.read()));
        }

        let delivery = bus.write(&ViewStatePatch::query("x"));
        assert_eq!(
            delivery,
            Delivery {
                notified: 3,
                panicked: 0
            }
        );

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 3);
        for state in seen.iter() {
            assert_eq!(state.query, "x");
            assert_eq!(state.view_mode, ViewMode::Mine);
        }
    }

    #[test]
    fn test_panicking_subscriber_is_isolated() {
        let bus = ViewStateBus::new("test.isolation");
        let calls = Arc::new(AtomicUsize::new(0));

        let first = Arc::clone(&calls);
        bus.subscribe(move |_| {
            first.fetch_add(1, Ordering::SeqCst);
        });
        bus.subscribe(|_| panic!("fragment render failed"));
        let third = Arc::clone(&calls);
        bus.subscribe(move |_| {
            third.fetch_add(1, Ordering::SeqCst);
        });

        let delivery = bus.write(&ViewStatePatch::query("pump"));
        assert_eq!(delivery.notified, 3);
        assert_eq!(delivery.panicked, 1);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(bus.read().query, "pump");
    }

    #[test]
    fn test_delivery_follows_registration_order() {
        let bus = ViewStateBus::new("test.order");
        let order: Arc<Mutex<Vec<u8>>> = Arc::new(Mutex::new(Vec::new()));
        for n in 1..=4u8 {
            let order = Arc::clone(&order);
            bus.subscribe(move |_| order.lock().unwrap().push(n));
        }
        bus.write(&ViewStatePatch::default());
        assert_eq!(*order.lock().unwrap(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let bus = ViewStateBus::new("test.unsubscribe");
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let sub = bus.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        bus.write(&ViewStatePatch::query("a"));
        assert!(bus.unsubscribe(sub));
        assert!(!bus.unsubscribe(sub));
        bus.write(&ViewStatePatch::query("b"));

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn test_notice_carries_key_and_event_name_only() {
        let bus = ViewStateBus::new("test.notice");
        let names: Arc<Mutex<Vec<(String, String)>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&names);
        bus.subscribe(move |notice| {
            sink.lock()
                .unwrap()
                .push((notice.key.to_string(), notice.event_name.to_string()));
        });
        bus.write(&ViewStatePatch::query("q"));
        assert_eq!(
            names.lock().unwrap()[0],
            ("test.notice".to_string(), "test.notice:changed".to_string())
        );
    }

    #[test]
    fn test_callback_may_write_and_unsubscribe_reentrantly() {
        let bus = Arc::new(ViewStateBus::new("test.reentrant"));
        let inner = Arc::clone(&bus);
        let sub_slot: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));
        let slot = Arc::clone(&sub_slot);
        let sub = bus.subscribe(move |_| {
            if inner.read().status_filter != "Open" {
                inner.write(&ViewStatePatch::status("Open"));
            }
            if let Some(me) = *slot.lock().unwrap() {
                inner.unsubscribe(me);
            }
        });
        *sub_slot.lock().unwrap() = Some(sub);

        bus.write(&ViewStatePatch::query("x"));
        let state = bus.read();
        assert_eq!(state.query, "x");
        assert_eq!(state.status_filter, "Open");
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn test_sibling_removed_mid_broadcast_is_skipped() {
        let bus = Arc::new(ViewStateBus::new("test.unmount-sibling"));
        let sibling_calls = Arc::new(AtomicUsize::new(0));
        let late_calls = Arc::new(AtomicUsize::new(0));
        let sibling_slot: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));

        let inner = Arc::clone(&bus);
        let slot = Arc::clone(&sibling_slot);
        bus.subscribe(move |_| {
            if let Some(sibling) = slot.lock().unwrap().take() {
                assert!(inner.unsubscribe(sibling));
            }
        });
        let counter = Arc::clone(&sibling_calls);
        let sibling = bus.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        *sibling_slot.lock().unwrap() = Some(sibling);

        // Added mid-broadcast: first notified by the next write
        let adder = Arc::clone(&bus);
        let late = Arc::clone(&late_calls);
        let added = Arc::new(AtomicUsize::new(0));
        let added_flag = Arc::clone(&added);
        bus.subscribe(move |_| {
            if added_flag.fetch_add(1, Ordering::SeqCst) == 0 {
                let late = Arc::clone(&late);
                adder.subscribe(move |_| {
                    late.fetch_add(1, Ordering::SeqCst);
                });
            }
        });

        let delivery = bus.write(&ViewStatePatch::query("x"));
        assert_eq!(delivery.notified, 2);
        assert_eq!(sibling_calls.load(Ordering::SeqCst), 0);
        assert_eq!(late_calls.load(Ordering::SeqCst), 0);

        bus.write(&ViewStatePatch::query("y"));
        assert_eq!(sibling_calls.load(Ordering::SeqCst), 0);
        assert_eq!(late_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_portal_event_name_derives_from_slot_key() {
        assert_eq!(event_name_for(VIEW_STATE_SLOT_KEY), VIEW_STATE_EVENT);
    }
}
