//! Event Bus
//!
//! Synchronous publish/subscribe fan-out. `publish` snapshots the current
//! subscriber list and invokes each callback in registration order on the
//! publishing task. Callbacks may subscribe or unsubscribe while a publish is
//! in flight; such changes apply from the next publish onwards.

use crate::model::SimulationEvent;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::debug;

/// Subscriber callback
pub type Subscriber = Arc<dyn Fn(&SimulationEvent) + Send + Sync>;

/// Handle returned by [`EventBus::subscribe`], used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct Subscription {
    id: SubscriptionId,
    callback: Subscriber,
}

#[derive(Default)]
pub struct EventBus {
    subscriptions: Mutex<Vec<Subscription>>,
    next_id: AtomicU64,
    published: AtomicU64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback for every subsequently published event
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&SimulationEvent) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.lock().push(Subscription {
            id,
            callback: Arc::new(callback),
        });
        debug!(subscription = id.0, "subscriber registered");
        id
    }

    /// Remove a subscription. Returns false if it was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subs = self.lock();
        let before = subs.len();
        subs.retain(|s| s.id != id);
        let removed = subs.len() != before;
        if removed {
            debug!(subscription = id.0, "subscriber removed");
        }
        removed
    }

    /// Deliver an event to every current subscriber. Returns the number of
    /// callbacks invoked.
    pub fn publish(&self, event: &SimulationEvent) -> usize {
        let snapshot: Vec<Subscriber> = self.lock().iter().map(|s| s.callback.clone()).collect();
        self.published.fetch_add(1, Ordering::Relaxed);

        debug!(
            kind = %event.kind(),
            subscribers = snapshot.len(),
            "event published"
        );

        for callback in &snapshot {
            callback(event);
        }
        snapshot.len()
    }

    pub fn subscriber_count(&self) -> usize {
        self.lock().len()
    }

    /// Total events published since construction
    pub fn published_count(&self) -> u64 {
        self.published.load(Ordering::Relaxed)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Subscription>> {
        self.subscriptions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{TrendCounts, TrendSample};
    use chrono::Utc;

    fn trend() -> SimulationEvent {
        SimulationEvent::Trend(TrendSample {
            time: "12:00".to_string(),
            timestamp: Utc::now(),
            counts: TrendCounts::default(),
        })
    }

    fn counter(bus: &EventBus) -> (SubscriptionId, Arc<AtomicU64>) {
        let hits = Arc::new(AtomicU64::new(0));
        let seen = hits.clone();
        let id = bus.subscribe(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });
        (id, hits)
    }

    #[test]
    fn test_all_subscribers_receive() {
        let bus = EventBus::new();
        let (_, a) = counter(&bus);
        let (_, b) = counter(&bus);

        assert_eq!(bus.publish(&trend()), 2);
        assert_eq!(a.load(Ordering::SeqCst), 1);
        assert_eq!(b.load(Ordering::SeqCst), 1);
        assert_eq!(bus.published_count(), 1);
    }

    #[test]
    fn test_unsubscribe_isolates_other_subscribers() {
        let bus = EventBus::new();
        let (id_a, a) = counter(&bus);
        let (_, b) = counter(&bus);

        bus.publish(&trend());
        assert!(bus.unsubscribe(id_a));
        bus.publish(&trend());
        bus.publish(&trend());

        assert_eq!(a.load(Ordering::SeqCst), 1);
        assert_eq!(b.load(Ordering::SeqCst), 3);
        assert!(!bus.unsubscribe(id_a));
    }

    #[test]
    fn test_delivery_in_registration_order() {
        let bus = EventBus::new();
        let order = Arc::new(Mutex::new(Vec::new()));
        for tag in 0..4 {
            let order = order.clone();
            bus.subscribe(move |_| order.lock().unwrap().push(tag));
        }

        bus.publish(&trend());
        assert_eq!(*order.lock().unwrap(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_unsubscribe_during_dispatch() {
        let bus = Arc::new(EventBus::new());
        let slot: Arc<Mutex<Option<SubscriptionId>>> = Arc::new(Mutex::new(None));
        let hits = Arc::new(AtomicU64::new(0));

        let bus_ref = Arc::downgrade(&bus);
        let slot_ref = slot.clone();
        let hits_ref = hits.clone();
        let id = bus.subscribe(move |_| {
            hits_ref.fetch_add(1, Ordering::SeqCst);
            if let (Some(bus), Some(id)) = (bus_ref.upgrade(), *slot_ref.lock().unwrap()) {
                bus.unsubscribe(id);
            }
        });
        *slot.lock().unwrap() = Some(id);
        let (_, other) = counter(&bus);

        // Self-removal mid-dispatch does not deadlock or skip later subscribers
        assert_eq!(bus.publish(&trend()), 2);
        assert_eq!(bus.publish(&trend()), 1);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(other.load(Ordering::SeqCst), 2);
    }
}
