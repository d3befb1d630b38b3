//! Poll reconciliation: arrival detection, out-of-order protection, and the
//! optimistic-removal window.
//!
//! The reconciler compares each poll's id set against the previous poll's set
//! (not the initial load) to find arrivals. The first poll after a reset seeds
//! the baseline silently so switching tabs never produces a notification
//! storm. Time and notification are injected through the [`Clock`] and
//! [`NotificationSink`] traits so the diff logic runs in tests with no real
//! interval timer or notifier.
//!
//! Two rules keep a poll and a user mutation from fighting over one id:
//! - every fetch carries a monotonic sequence number and stale responses
//!   (an earlier fetch arriving after a later one) are discarded whole;
//! - an optimistic removal leaves a tombstone that is subtracted from the
//!   next applied poll, then cleared — a confirmed decision can be shadowed
//!   by server lag for at most one poll interval.

use std::collections::BTreeSet;

use chrono::{DateTime, Duration, Utc};

use crate::types::ReviewItem;

/// Time source abstraction. Production uses [`SystemClock`]; tests pin time.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock implementation of [`Clock`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Attention channel for high-risk arrivals. The console raises at most one
/// notification per poll cycle, never one per item.
pub trait NotificationSink {
    fn notify(&mut self, summary: &str, body: &str);
}

/// Sink that drops every notification. Useful for non-pending tabs and tests
/// that do not assert on notifications.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl NotificationSink for NullSink {
    fn notify(&mut self, _summary: &str, _body: &str) {}
}

/// What one applied poll changed.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct PollOutcome {
    /// Ids present in this poll but absent from the previous one. Empty on
    /// the seeding poll.
    pub new_ids: Vec<String>,
    /// True when a notification was raised for this cycle.
    pub alerted: bool,
}

/// Interval gate for the poll loop, driven by an injected [`Clock`] rather
/// than a real timer so scheduling logic is testable.
#[derive(Debug)]
pub struct PollTimer {
    every: Duration,
    last: Option<DateTime<Utc>>,
}

impl PollTimer {
    pub fn new(every: Duration) -> Self {
        Self { every, last: None }
    }

    /// True when a poll should fire now. The first call after construction or
    /// [`Self::reset`] is always due, so a fresh tab fetches immediately.
    pub fn due(&self, clock: &dyn Clock) -> bool {
        match self.last {
            None => true,
            Some(last) => clock.now() - last >= self.every,
        }
    }

    /// Marks a poll as dispatched at the current time.
    pub fn mark(&mut self, clock: &dyn Clock) {
        self.last = Some(clock.now());
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}

/// Diff-and-reconcile state for the pending list.
#[derive(Debug, Default)]
pub struct Reconciler {
    /// Id set from the last applied poll. `None` until the baseline seeds.
    last_ids: Option<BTreeSet<String>>,
    /// Optimistically removed ids, hidden until the next applied poll.
    tombstones: BTreeSet<String>,
    /// Sequence handed to the next fetch.
    next_seq: u64,
    /// Highest sequence applied so far; lower sequences are stale.
    applied_seq: u64,
}

impl Reconciler {
    /// Tags an outgoing fetch with the next sequence number.
    pub fn begin_poll(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }

    /// Records an optimistic removal so the id stays hidden even if an
    /// in-flight poll (issued before the decision landed) still carries it.
    pub fn tombstone(&mut self, id: &str) {
        self.tombstones.insert(id.to_owned());
    }

    /// Applies a completed fetch. Returns `None` when the response is stale
    /// (an older fetch arriving after a newer one was applied); otherwise the
    /// reconciled item list plus the arrival outcome.
    ///
    /// Arrival policy: the first applied poll after a reset seeds the baseline
    /// with no arrivals. Afterwards any id absent from the previous poll
    /// counts as new; if any new item carries an alerting risk level, `sink`
    /// receives exactly one notification for the whole cycle.
    pub fn apply_poll(
        &mut self,
        seq: u64,
        items: Vec<ReviewItem>,
        sink: &mut dyn NotificationSink,
    ) -> Option<(Vec<ReviewItem>, PollOutcome)> {
        if seq <= self.applied_seq {
            log::debug!("discarding stale poll response seq={seq} applied={}", self.applied_seq);
            return None;
        }
        self.applied_seq = seq;

        let items: Vec<ReviewItem> = items
            .into_iter()
            .filter(|i| !self.tombstones.contains(&i.id))
            .collect();
        // Tombstones only bridge the gap to the next authoritative list.
        self.tombstones.clear();

        let incoming: BTreeSet<String> = items.iter().map(|i| i.id.clone()).collect();
        let mut outcome = PollOutcome::default();

        if let Some(previous) = &self.last_ids {
            outcome.new_ids = incoming.difference(previous).cloned().collect();
            let alerting: Vec<&ReviewItem> = items
                .iter()
                .filter(|i| outcome.new_ids.contains(&i.id) && i.risk_level.is_alerting())
                .collect();
            if let Some(first) = alerting.first() {
                let body = if alerting.len() == 1 {
                    format!("{} needs review", first.workflow_label())
                } else {
                    format!("{} and {} more need review", first.workflow_label(), alerting.len() - 1)
                };
                sink.notify("High-risk review pending", &body);
                outcome.alerted = true;
            }
        }
        self.last_ids = Some(incoming);

        Some((items, outcome))
    }

    /// Forgets the baseline and any tombstones, e.g. on tab switch. The next
    /// applied poll seeds silently. Sequence counters stay monotonic so a
    /// response from before the reset still reads as stale.
    pub fn reset(&mut self) {
        self.last_ids = None;
        self.tombstones.clear();
        self.applied_seq = self.next_seq;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ReviewContext, ReviewStatus, RiskLevel};
    use chrono::TimeZone;

    /// Sink that records every notification for assertions.
    #[derive(Default)]
    struct RecordingSink {
        raised: Vec<(String, String)>,
    }

    impl NotificationSink for RecordingSink {
        fn notify(&mut self, summary: &str, body: &str) {
            self.raised.push((summary.to_owned(), body.to_owned()));
        }
    }

    /// Clock pinned to a settable instant.
    struct FixedClock(DateTime<Utc>);

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    fn item(id: &str, risk: RiskLevel) -> ReviewItem {
        ReviewItem {
            id: id.to_owned(),
            status: ReviewStatus::Pending,
            workflow_slug: Some("trip-planner".to_owned()),
            workflow_name: Some("Trip Planner".to_owned()),
            risk_level: risk,
            review_context: ReviewContext::default(),
            notified_channels: Vec::new(),
            feedback_round: 1,
            created_at: Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn first_poll_seeds_silently() {
        let mut r = Reconciler::default();
        let mut sink = RecordingSink::default();
        let seq = r.begin_poll();
        let (items, outcome) = r
            .apply_poll(seq, vec![item("a", RiskLevel::Critical), item("b", RiskLevel::Low)], &mut sink)
            .unwrap();
        assert_eq!(items.len(), 2);
        assert!(outcome.new_ids.is_empty());
        assert!(!outcome.alerted);
        assert!(sink.raised.is_empty());
    }

    #[test]
    fn arrival_after_baseline_is_flagged() {
        let mut r = Reconciler::default();
        let mut sink = RecordingSink::default();
        let seq = r.begin_poll();
        r.apply_poll(seq, vec![item("a", RiskLevel::Low), item("b", RiskLevel::Low)], &mut sink)
            .unwrap();

        let seq = r.begin_poll();
        let (_, outcome) = r
            .apply_poll(
                seq,
                vec![item("a", RiskLevel::Low), item("b", RiskLevel::Low), item("c", RiskLevel::Low)],
                &mut sink,
            )
            .unwrap();
        assert_eq!(outcome.new_ids, vec!["c".to_owned()]);
        // Low risk: counted and highlighted, but no notification.
        assert!(!outcome.alerted);
        assert!(sink.raised.is_empty());
    }

    #[test]
    fn one_notification_per_cycle_for_alerting_arrivals() {
        let mut r = Reconciler::default();
        let mut sink = RecordingSink::default();
        let seq = r.begin_poll();
        r.apply_poll(seq, vec![item("a", RiskLevel::Low)], &mut sink).unwrap();

        let seq = r.begin_poll();
        let (_, outcome) = r
            .apply_poll(
                seq,
                vec![
                    item("a", RiskLevel::Low),
                    item("b", RiskLevel::High),
                    item("c", RiskLevel::Critical),
                ],
                &mut sink,
            )
            .unwrap();
        assert_eq!(outcome.new_ids.len(), 2);
        assert!(outcome.alerted);
        assert_eq!(sink.raised.len(), 1, "two alerting arrivals, one notification");
        assert!(sink.raised[0].1.contains("1 more"));
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut r = Reconciler::default();
        let mut sink = RecordingSink::default();
        let old_seq = r.begin_poll();
        let new_seq = r.begin_poll();

        r.apply_poll(new_seq, vec![item("a", RiskLevel::Low)], &mut sink).unwrap();
        // The older fetch finishes late and must not overwrite newer state.
        assert!(r
            .apply_poll(old_seq, vec![item("a", RiskLevel::Low), item("zombie", RiskLevel::Low)], &mut sink)
            .is_none());
    }

    #[test]
    fn tombstone_hides_id_until_next_applied_poll() {
        let mut r = Reconciler::default();
        let mut sink = RecordingSink::default();
        let seq = r.begin_poll();
        r.apply_poll(seq, vec![item("a", RiskLevel::Low), item("b", RiskLevel::Low)], &mut sink)
            .unwrap();

        // Operator approves "a"; the next poll was issued before the server
        // caught up and still carries it.
        r.tombstone("a");
        let seq = r.begin_poll();
        let (items, outcome) = r
            .apply_poll(seq, vec![item("a", RiskLevel::Low), item("b", RiskLevel::Low)], &mut sink)
            .unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "b");
        assert!(outcome.new_ids.is_empty());

        // Tombstone cleared: if the server really does resurface it later it
        // is treated as a (new) authoritative arrival.
        let seq = r.begin_poll();
        let (items, outcome) = r
            .apply_poll(seq, vec![item("a", RiskLevel::Low), item("b", RiskLevel::Low)], &mut sink)
            .unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(outcome.new_ids, vec!["a".to_owned()]);
    }

    #[test]
    fn reset_reseeds_silently_and_stales_in_flight_fetches() {
        let mut r = Reconciler::default();
        let mut sink = RecordingSink::default();
        let seq = r.begin_poll();
        r.apply_poll(seq, vec![item("a", RiskLevel::Critical)], &mut sink).unwrap();

        let in_flight = r.begin_poll();
        r.reset();
        // The fetch that was in flight across the reset is stale.
        assert!(r.apply_poll(in_flight, vec![item("a", RiskLevel::Critical)], &mut sink).is_none());

        // And the first poll of the new tab seeds without arrivals.
        let seq = r.begin_poll();
        let (_, outcome) = r
            .apply_poll(seq, vec![item("z", RiskLevel::Critical)], &mut sink)
            .unwrap();
        assert!(outcome.new_ids.is_empty());
        assert!(sink.raised.is_empty());
    }

    #[test]
    fn poll_timer_fires_immediately_then_on_interval() {
        let mut timer = PollTimer::new(Duration::seconds(15));
        let t0 = Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).unwrap();

        let clock = FixedClock(t0);
        assert!(timer.due(&clock));
        timer.mark(&clock);
        assert!(!timer.due(&clock));

        let clock = FixedClock(t0 + Duration::seconds(14));
        assert!(!timer.due(&clock));
        let clock = FixedClock(t0 + Duration::seconds(15));
        assert!(timer.due(&clock));

        timer.reset();
        assert!(timer.due(&FixedClock(t0)));
    }
}
