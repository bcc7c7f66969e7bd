//! In-memory session store for tests/dev.

use std::collections::HashMap;
use std::sync::Mutex;

use tokio::sync::broadcast;

use crate::store::{SessionStore, StoreChange};

const CHANGE_CHANNEL_CAPACITY: usize = 64;

/// In-memory key-value store with broadcast change notifications.
///
/// - No IO / no async on the read/write path
/// - Best-effort fan-out (slow subscribers may observe a lag and must
///   re-read the store)
#[derive(Debug)]
pub struct InMemorySessionStore {
    values: Mutex<HashMap<String, String>>,
    changes: broadcast::Sender<StoreChange>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            values: Mutex::new(HashMap::new()),
            changes,
        }
    }
}

impl InMemorySessionStore {
    fn notify(&self, key: &str, new_value: Option<&str>) {
        // Send fails when no subscriber is listening; that is fine.
        let _ = self.changes.send(StoreChange {
            key: key.to_string(),
            new_value: new_value.map(str::to_string),
        });
    }
}

impl SessionStore for InMemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        let values = self.values.lock().ok()?;
        values.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let Ok(mut values) = self.values.lock() else {
            return;
        };
        let previous = values.insert(key.to_string(), value.to_string());
        drop(values);

        if previous.as_deref() != Some(value) {
            self.notify(key, Some(value));
        }
    }

    fn remove(&self, key: &str) {
        let Ok(mut values) = self.values.lock() else {
            return;
        };
        let removed = values.remove(key);
        drop(values);

        if removed.is_some() {
            self.notify(key, None);
        }
    }

    fn changes(&self) -> broadcast::Receiver<StoreChange> {
        self.changes.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_get_round_trips() {
        let store = InMemorySessionStore::new();

        store.set("token", "abc");

        assert_eq!(store.get("token").as_deref(), Some("abc"));
        assert_eq!(store.get("missing"), None);
    }

    #[test]
    fn remove_notifies_with_absent_value() {
        let store = InMemorySessionStore::new();
        store.set("token", "abc");

        let mut changes = store.changes();
        store.remove("token");

        let change = changes.try_recv().expect("a change notification");
        assert_eq!(change.key, "token");
        assert_eq!(change.new_value, None);
    }

    #[test]
    fn overwriting_with_the_same_value_does_not_notify() {
        let store = InMemorySessionStore::new();
        store.set("token", "abc");

        let mut changes = store.changes();
        store.set("token", "abc");

        assert!(changes.try_recv().is_err());
    }

    #[test]
    fn removing_an_absent_key_does_not_notify() {
        let store = InMemorySessionStore::new();

        let mut changes = store.changes();
        store.remove("token");

        assert!(changes.try_recv().is_err());
    }

    #[test]
    fn every_subscriber_observes_every_mutation() {
        let store = InMemorySessionStore::new();

        let mut first = store.changes();
        let mut second = store.changes();
        store.set("token", "abc");

        assert_eq!(first.try_recv().unwrap().key, "token");
        assert_eq!(second.try_recv().unwrap().key, "token");
    }
}
