//! Recording view-layer doubles for tests/dev.

use std::sync::Mutex;

use crate::view::{Navigator, UserNotices};

/// Navigator that records every replacement instead of rendering.
#[derive(Debug)]
pub struct RecordingNavigator {
    current: Mutex<String>,
    replaced: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn starting_at(route: &str) -> Self {
        Self {
            current: Mutex::new(route.to_string()),
            replaced: Mutex::new(Vec::new()),
        }
    }

    /// Every route passed to `replace`, in order.
    pub fn replacements(&self) -> Vec<String> {
        self.replaced.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

impl Navigator for RecordingNavigator {
    fn current_route(&self) -> String {
        self.current.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn replace(&self, route: &str) {
        if let Ok(mut current) = self.current.lock() {
            *current = route.to_string();
        }
        if let Ok(mut replaced) = self.replaced.lock() {
            replaced.push(route.to_string());
        }
    }
}

/// Notice sink that records every message.
#[derive(Debug, Default)]
pub struct RecordingNotices {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotices {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().map(|m| m.clone()).unwrap_or_default()
    }
}

impl UserNotices for RecordingNotices {
    fn notify(&self, message: &str) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(message.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_navigator_tracks_current_route() {
        let navigator = RecordingNavigator::starting_at("orders");

        navigator.replace("login");

        assert_eq!(navigator.current_route(), "login");
        assert_eq!(navigator.replacements(), vec!["login".to_string()]);
    }

    #[test]
    fn recording_notices_keeps_messages_in_order() {
        let notices = RecordingNotices::new();

        notices.notify("first");
        notices.notify("second");

        assert_eq!(
            notices.messages(),
            vec!["first".to_string(), "second".to_string()]
        );
    }
}
