use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;

/// Per-sender cooldown filter suppressing repeated alarm dispatch
/// within a rolling window.
///
/// The stored timestamp is written only when a call is allowed through:
/// a suppressed call leaves it untouched, so the window always slides
/// from the last delivered notification. Entries idle for several
/// windows can no longer suppress anything and are evicted, keeping
/// the map bounded by recently active senders.
pub struct FloodingChecker {
    window: Duration,
    last_notified: HashMap<String, DateTime<Utc>>,
}

/// Idle entries are dropped after this many windows.
const EVICT_AFTER_WINDOWS: i32 = 3;

impl FloodingChecker {
    pub const DEFAULT_WINDOW_MINUTES: i64 = 60;

    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_notified: HashMap::new(),
        }
    }

    pub fn with_default_window() -> Self {
        Self::new(Duration::minutes(Self::DEFAULT_WINDOW_MINUTES))
    }

    /// Returns true when a notification for `sender` was delivered less
    /// than one window before `now`. A first-seen sender is never
    /// flooding. On false, the cooldown clock for the sender resets to
    /// `now`; delivery at exactly one window is allowed.
    pub fn is_flooding(&mut self, now: DateTime<Utc>, sender: &str) -> bool {
        self.evict(now);

        let flooding = self
            .last_notified
            .get(sender)
            .is_some_and(|last| now - *last < self.window);

        if !flooding {
            self.last_notified.insert(sender.to_string(), now);
        }
        flooding
    }

    fn evict(&mut self, now: DateTime<Utc>) {
        let cutoff = now - self.window * EVICT_AFTER_WINDOWS;
        self.last_notified.retain(|_, last| *last >= cutoff);
    }

    /// Drops all accumulated cooldown state.
    pub fn reset(&mut self) {
        self.last_notified.clear();
    }

    pub fn tracked_senders(&self) -> usize {
        self.last_notified.len()
    }
}
