//! Activity tracking against the shared store.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};

use printdesk_core::store::{SessionStore, keys};

/// Minimum gap between two activity writes to the shared store. Bounds
/// write volume under pointer movement and scrolling; not a security
/// boundary.
pub const ACTIVITY_WRITE_THROTTLE_MS: i64 = 30 * 1000;

/// Gap under which interaction events are dropped before they even reach
/// the tracker.
pub const EVENT_DEBOUNCE_MS: i64 = 1_000;

/// Read the shared activity timestamp.
///
/// Unparseable or non-positive values count as absent, the same as a
/// missing key.
pub fn read_last_activity(store: &dyn SessionStore) -> Option<i64> {
    store
        .get(keys::LAST_ACTIVITY_AT)?
        .parse::<i64>()
        .ok()
        .filter(|ms| *ms > 0)
}

/// Records "last active" timestamps in the shared store, throttled.
#[derive(Clone)]
pub struct ActivityTracker {
    store: Arc<dyn SessionStore>,
}

impl ActivityTracker {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Record user activity now.
    pub fn touch(&self, force: bool) {
        self.touch_at(force, Utc::now());
    }

    /// Record user activity at `now`.
    ///
    /// No-op without a token: an anonymous view never creates an activity
    /// record. Otherwise the timestamp is overwritten when forced, when no
    /// prior value exists, or when the throttle window has elapsed.
    pub fn touch_at(&self, force: bool, now: DateTime<Utc>) {
        if self.store.get(keys::TOKEN).is_none() {
            return;
        }

        let now_ms = now.timestamp_millis();
        let stale = match read_last_activity(&*self.store) {
            None => true,
            Some(last) => now_ms - last >= ACTIVITY_WRITE_THROTTLE_MS,
        };

        if force || stale {
            self.store.set(keys::LAST_ACTIVITY_AT, &now_ms.to_string());
        }
    }
}

/// Interaction events forwarded from the view layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityEvent {
    PointerDown,
    PointerMove,
    KeyDown,
    Scroll,
    TouchStart,
    Click,
    Focus,
    /// The view became visible again (tab switch, window restore).
    ViewVisible,
}

/// Debounces high-frequency interaction events in front of the tracker.
///
/// None of these events reset any timeout state themselves; they only feed
/// the shared timestamp the monitor reads.
pub struct ActivityListener {
    tracker: ActivityTracker,
    last_handled_ms: Mutex<i64>,
}

impl ActivityListener {
    pub fn new(tracker: ActivityTracker) -> Self {
        Self {
            tracker,
            last_handled_ms: Mutex::new(0),
        }
    }

    pub fn on_event(&self, event: ActivityEvent) {
        self.on_event_at(event, Utc::now());
    }

    pub fn on_event_at(&self, event: ActivityEvent, now: DateTime<Utc>) {
        // Becoming visible again skips the debounce: the user may have been
        // away longer than the window and the timestamp should refresh at
        // the first opportunity.
        if event == ActivityEvent::ViewVisible {
            self.tracker.touch_at(false, now);
            return;
        }

        let now_ms = now.timestamp_millis();
        let Ok(mut last) = self.last_handled_ms.lock() else {
            return;
        };
        if now_ms - *last < EVENT_DEBOUNCE_MS {
            return;
        }
        *last = now_ms;
        drop(last);

        self.tracker.touch_at(false, now);
    }
}
