//! Additive toast queue with fixed-duration expiry.
//!
//! Toasts are appended, never replaced; each one times out independently
//! 3 seconds after it was pushed. Expiry runs off the injected [`Clock`], so
//! the queue is testable without sleeping.

use std::collections::VecDeque;

use chrono::Duration;

use crate::reconcile::Clock;

/// Visual flavor of a toast. Drives color only, not behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Warning,
    Info,
}

/// One toast with its own expiry instant.
#[derive(Debug, Clone)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
    expires_at: chrono::DateTime<chrono::Utc>,
}

/// FIFO queue of live toasts.
#[derive(Debug)]
pub struct ToastQueue {
    toasts: VecDeque<Toast>,
    ttl: Duration,
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new(Duration::seconds(3))
    }
}

impl ToastQueue {
    pub fn new(ttl: Duration) -> Self {
        Self { toasts: VecDeque::new(), ttl }
    }

    /// Appends a toast expiring `ttl` after now. Existing toasts keep their
    /// own timers.
    pub fn push(&mut self, kind: ToastKind, message: impl Into<String>, clock: &dyn Clock) {
        self.toasts.push_back(Toast {
            kind,
            message: message.into(),
            expires_at: clock.now() + self.ttl,
        });
    }

    /// Drops every toast whose timer has run out. Called from the tick arm.
    pub fn prune(&mut self, clock: &dyn Clock) {
        let now = clock.now();
        self.toasts.retain(|t| t.expires_at > now);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    struct FixedClock(DateTime<Utc>);

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    #[test]
    fn toasts_coexist_and_expire_independently() {
        let t0 = Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).unwrap();
        let mut q = ToastQueue::default();

        q.push(ToastKind::Success, "first", &FixedClock(t0));
        q.push(ToastKind::Error, "second", &FixedClock(t0 + Duration::seconds(2)));
        assert_eq!(q.len(), 2);

        // t0+3s: the first expires, the second (pushed at t0+2s) survives.
        q.prune(&FixedClock(t0 + Duration::seconds(3)));
        assert_eq!(q.len(), 1);
        assert_eq!(q.iter().next().unwrap().message, "second");

        q.prune(&FixedClock(t0 + Duration::seconds(5)));
        assert!(q.is_empty());
    }
}
