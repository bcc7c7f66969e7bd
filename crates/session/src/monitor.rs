//! Session timeout monitoring and cross-view logout propagation.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::Notify;
use tokio::sync::broadcast::error::RecvError;

use printdesk_core::store::{SessionStore, StoreChange, clear_session, keys};
use printdesk_core::view::{LOGIN_ROUTE, Navigator};

use crate::activity::{ACTIVITY_WRITE_THROTTLE_MS, ActivityTracker, read_last_activity};

/// Inactivity window after which a session is forcibly ended.
pub const SESSION_TIMEOUT_MS: i64 = 24 * 60 * 60 * 1000;

/// How often the monitor re-reads the shared token and timestamp.
pub const CHECK_INTERVAL: Duration = Duration::from_secs(60);

/// Lifecycle phase of the monitored session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Unauthenticated,
    Active,
    IdleButValid,
    Expired,
}

/// What a single periodic check did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    /// No token; nothing to enforce.
    NoSession,
    /// Token without a timestamp; a fresh timestamp was written.
    Bootstrapped,
    /// Token and timestamp present, deadline not reached.
    StillValid,
    /// Deadline reached; session state cleared and the view sent to login.
    Expired,
}

/// Recurring enforcement of the inactivity deadline, one instance per
/// mounted view.
///
/// The monitor has no visible UI; its only outputs are store mutations and
/// replace-navigations. It reacts to out-of-process invalidation (another
/// view clearing the token) through the store's change notifications.
pub struct SessionMonitor {
    store: Arc<dyn SessionStore>,
    navigator: Arc<dyn Navigator>,
    tracker: ActivityTracker,
    shutdown: Arc<Notify>,
}

impl SessionMonitor {
    pub fn new(store: Arc<dyn SessionStore>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            tracker: ActivityTracker::new(store.clone()),
            store,
            navigator,
            shutdown: Arc::new(Notify::new()),
        }
    }

    /// Current phase as of `now`. Observational only; no side effects.
    pub fn phase_at(&self, now: DateTime<Utc>) -> SessionPhase {
        if self.store.get(keys::TOKEN).is_none() {
            return SessionPhase::Unauthenticated;
        }
        let Some(last) = read_last_activity(&*self.store) else {
            // A token without a timestamp is a session that predates
            // activity tracking; it bootstraps on the next check.
            return SessionPhase::Active;
        };

        let elapsed = now.timestamp_millis() - last;
        if elapsed >= SESSION_TIMEOUT_MS {
            SessionPhase::Expired
        } else if elapsed >= ACTIVITY_WRITE_THROTTLE_MS {
            SessionPhase::IdleButValid
        } else {
            SessionPhase::Active
        }
    }

    /// One periodic check against the shared store.
    pub fn check_at(&self, now: DateTime<Utc>) -> CheckOutcome {
        if self.store.get(keys::TOKEN).is_none() {
            return CheckOutcome::NoSession;
        }

        let Some(last) = read_last_activity(&*self.store) else {
            // Tolerate a session that lost its timestamp without losing its
            // token: write one instead of expiring it.
            self.tracker.touch_at(true, now);
            return CheckOutcome::Bootstrapped;
        };

        if now.timestamp_millis() - last < SESSION_TIMEOUT_MS {
            return CheckOutcome::StillValid;
        }

        tracing::info!("session exceeded the inactivity limit, signing out");
        clear_session(&*self.store);
        self.redirect_to_login();
        CheckOutcome::Expired
    }

    /// React to a store mutation observed from any view, including this one.
    ///
    /// A token transitioning to absent is an authoritative logout and takes
    /// effect immediately, regardless of the interval phase.
    pub fn on_store_change(&self, change: &StoreChange) {
        if change.key == keys::TOKEN && change.new_value.is_none() {
            self.redirect_to_login();
        }
    }

    fn redirect_to_login(&self) {
        if self.navigator.current_route() != LOGIN_ROUTE {
            self.navigator.replace(LOGIN_ROUTE);
        }
    }

    /// Request the running worker to stop.
    pub fn shutdown(&self) {
        self.shutdown.notify_one();
    }

    /// Spawn the monitoring worker.
    ///
    /// The first interval tick completes immediately, which doubles as the
    /// mount-time bootstrap of a missing timestamp. Missed ticks are
    /// skipped, not replayed. The worker releases its store subscription
    /// and timer when it stops; `shutdown()` stops it.
    pub fn start(self: Arc<Self>) -> tokio::task::JoinHandle<()> {
        let monitor = self;

        tokio::spawn(async move {
            tracing::debug!("session monitor started");

            let mut changes = monitor.store.changes();
            let mut interval = tokio::time::interval(CHECK_INTERVAL);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = monitor.shutdown.notified() => {
                        break;
                    }
                    _ = interval.tick() => {
                        monitor.check_at(Utc::now());
                    }
                    change = changes.recv() => match change {
                        Ok(change) => monitor.on_store_change(&change),
                        Err(RecvError::Lagged(skipped)) => {
                            tracing::warn!(skipped, "store notifications lagged, re-reading store");
                            // A lag may have swallowed the logout signal.
                            if monitor.store.get(keys::TOKEN).is_none() {
                                monitor.redirect_to_login();
                            }
                        }
                        Err(RecvError::Closed) => {
                            break;
                        }
                    }
                }
            }

            tracing::debug!("session monitor stopped");
        })
    }
}
