use std::sync::Mutex;

use chrono::{DateTime, Utc};

/// Coarse process status reported over the liveness HTTP surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BotStatus {
    Starting,
    Initializing,
    Running,
    ErrorHandled,
    Error,
}

impl BotStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            BotStatus::Starting => "starting",
            BotStatus::Initializing => "initializing",
            BotStatus::Running => "running",
            BotStatus::ErrorHandled => "error_handled",
            BotStatus::Error => "error",
        }
    }
}

#[derive(Clone, Debug)]
struct Inner {
    status: BotStatus,
    started_at: DateTime<Utc>,
    last_update: DateTime<Utc>,
    user_count: usize,
    message_count: usize,
}

/// Point-in-time copy of the liveness state, safe to hand to HTTP readers.
#[derive(Clone, Debug)]
pub struct LivenessSnapshot {
    pub status: BotStatus,
    pub started_at: DateTime<Utc>,
    pub last_update: DateTime<Utc>,
    pub user_count: usize,
    pub message_count: usize,
    pub uptime_seconds: i64,
}

/// Process-wide liveness state.
///
/// Three writers touch this (handlers, the heartbeat task, fatal-error
/// paths) and HTTP readers snapshot it concurrently; every access goes
/// through the mutex so a reader never observes a torn update. No await
/// points are taken under the guard.
#[derive(Debug)]
pub struct Liveness {
    inner: Mutex<Inner>,
}

impl Default for Liveness {
    fn default() -> Self {
        Self::new()
    }
}

impl Liveness {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            inner: Mutex::new(Inner {
                status: BotStatus::Starting,
                started_at: now,
                last_update: now,
                user_count: 0,
                message_count: 0,
            }),
        }
    }

    pub fn set_status(&self, status: BotStatus) {
        let mut inner = self.inner.lock().expect("liveness lock poisoned");
        inner.status = status;
        inner.last_update = Utc::now();
    }

    /// Refresh the registry/log counters after a handler mutated them.
    pub fn record_counts(&self, user_count: usize, message_count: usize) {
        let mut inner = self.inner.lock().expect("liveness lock poisoned");
        inner.user_count = user_count;
        inner.message_count = message_count;
        inner.last_update = Utc::now();
    }

    /// Heartbeat tick: bumps `last_update` only.
    pub fn touch(&self) {
        let mut inner = self.inner.lock().expect("liveness lock poisoned");
        inner.last_update = Utc::now();
    }

    pub fn snapshot(&self) -> LivenessSnapshot {
        let inner = self.inner.lock().expect("liveness lock poisoned");
        LivenessSnapshot {
            status: inner.status,
            started_at: inner.started_at,
            last_update: inner.last_update,
            user_count: inner.user_count,
            message_count: inner.message_count,
            uptime_seconds: (Utc::now() - inner.started_at).num_seconds().max(0),
        }
    }
}

/// `3725` → `"1h 2m 5s"`.
pub fn format_uptime(seconds: i64) -> String {
    let seconds = seconds.max(0);
    let hours = seconds / 3600;
    let mins = (seconds % 3600) / 60;
    let secs = seconds % 60;
    if hours > 0 {
        return format!("{hours}h {mins}m {secs}s");
    }
    if mins > 0 {
        return format!("{mins}m {secs}s");
    }
    format!("{secs}s")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_reflect_latest_record() {
        let liveness = Liveness::new();
        liveness.record_counts(3, 10);
        liveness.record_counts(4, 11);

        let snap = liveness.snapshot();
        assert_eq!(snap.user_count, 4);
        assert_eq!(snap.message_count, 11);
    }

    #[test]
    fn status_transitions_are_visible() {
        let liveness = Liveness::new();
        assert_eq!(liveness.snapshot().status, BotStatus::Starting);

        liveness.set_status(BotStatus::Running);
        assert_eq!(liveness.snapshot().status, BotStatus::Running);
        assert_eq!(liveness.snapshot().status.as_str(), "running");
    }

    #[test]
    fn touch_advances_last_update() {
        let liveness = Liveness::new();
        let before = liveness.snapshot().last_update;
        liveness.touch();
        assert!(liveness.snapshot().last_update >= before);
    }

    #[test]
    fn uptime_formatting() {
        assert_eq!(format_uptime(0), "0s");
        assert_eq!(format_uptime(59), "59s");
        assert_eq!(format_uptime(61), "1m 1s");
        assert_eq!(format_uptime(3725), "1h 2m 5s");
        assert_eq!(format_uptime(-5), "0s");
    }
}
