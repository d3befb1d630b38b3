//! Integration test driving filter, session, and reconciler together through
//! a realistic operator session: seed poll, arrivals, selection, an optimistic
//! removal, and a poll that takes an id out from under the session.

use std::collections::BTreeSet;

use c2cmd_core::filter::{self, ReviewFilter};
use c2cmd_core::reconcile::{NotificationSink, Reconciler};
use c2cmd_core::session::SessionState;
use c2cmd_core::types::{ReviewContext, ReviewItem, ReviewStatus, RiskLevel};
use chrono::{TimeZone, Utc};

#[derive(Default)]
struct RecordingSink {
    raised: Vec<String>,
}

impl NotificationSink for RecordingSink {
    fn notify(&mut self, summary: &str, _body: &str) {
        self.raised.push(summary.to_owned());
    }
}

fn item(id: &str, slug: &str, risk: RiskLevel, minute: u32) -> ReviewItem {
    ReviewItem {
        id: id.to_owned(),
        status: ReviewStatus::Pending,
        workflow_slug: Some(slug.to_owned()),
        workflow_name: None,
        risk_level: risk,
        review_context: ReviewContext::default(),
        notified_channels: Vec::new(),
        feedback_round: 1,
        created_at: Utc.with_ymd_and_hms(2026, 8, 1, 12, minute, 0).unwrap(),
    }
}

fn ids(items: &[ReviewItem]) -> BTreeSet<String> {
    items.iter().map(|i| i.id.clone()).collect()
}

#[test]
fn full_queue_lifecycle() {
    let mut reconciler = Reconciler::default();
    let mut session = SessionState::default();
    let mut sink = RecordingSink::default();
    let filter = ReviewFilter::default();

    // Poll 1: [A, B] — baseline, no arrivals, no notification.
    let seq = reconciler.begin_poll();
    let (items, outcome) = reconciler
        .apply_poll(
            seq,
            vec![
                item("A", "trip", RiskLevel::Low, 0),
                item("B", "trip", RiskLevel::Medium, 1),
            ],
            &mut sink,
        )
        .unwrap();
    assert!(outcome.new_ids.is_empty());
    session.record_new(outcome.new_ids.clone());
    assert_eq!(session.new_count, 0);

    // Operator selects both and expands A.
    session.select_all_toggle(items.iter().map(|i| i.id.clone()));
    session.toggle_expanded("A");
    assert_eq!(session.selected.len(), 2);

    // Poll 2: [A, B, C] with C critical — one arrival, one notification.
    let seq = reconciler.begin_poll();
    let (items, outcome) = reconciler
        .apply_poll(
            seq,
            vec![
                item("A", "trip", RiskLevel::Low, 0),
                item("B", "trip", RiskLevel::Medium, 1),
                item("C", "billing", RiskLevel::Critical, 2),
            ],
            &mut sink,
        )
        .unwrap();
    assert_eq!(outcome.new_ids, vec!["C".to_owned()]);
    assert!(outcome.alerted);
    assert_eq!(sink.raised.len(), 1);
    session.record_new(outcome.new_ids.clone());
    assert_eq!(session.new_count, 1);
    assert!(session.is_new("C"));

    // Selection survives the poll: the arrival changed nothing it covers.
    session.purge_missing(&ids(&items));
    assert_eq!(session.selected.len(), 2);
    assert!(session.is_expanded("A"));

    // The critical arrival sorts to the top of the visible list.
    let view = filter::visible(&items, &filter);
    assert_eq!(view[0].id, "C");

    // Operator approves B optimistically; it vanishes before the next poll.
    reconciler.tombstone("B");
    session.selected.remove("B");

    // Poll 3 was issued before the server registered the approval.
    let seq = reconciler.begin_poll();
    let (items, _) = reconciler
        .apply_poll(
            seq,
            vec![
                item("A", "trip", RiskLevel::Low, 0),
                item("B", "trip", RiskLevel::Medium, 1),
                item("C", "billing", RiskLevel::Critical, 2),
            ],
            &mut sink,
        )
        .unwrap();
    assert!(!ids(&items).contains("B"), "tombstoned id must stay hidden");

    // Poll 4: another operator resolved C; its id vanishes and every piece of
    // session state referencing it must go too.
    session.toggle_expanded("C");
    session.press_reject("C");
    let seq = reconciler.begin_poll();
    let (items, _) = reconciler
        .apply_poll(seq, vec![item("A", "trip", RiskLevel::Low, 0)], &mut sink)
        .unwrap();
    session.purge_missing(&ids(&items));
    session.clamp_focus(filter::visible(&items, &filter).len());

    assert!(!session.is_expanded("C"));
    assert!(!session.is_new("C"));
    assert_eq!(session.selected, BTreeSet::from(["A".to_owned()]));
    assert_eq!(session.focused_index, 0);
}
