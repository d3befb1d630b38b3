//! Central application state for c2cmd.
//!
//! This module owns all mutable state on the main loop: the active tab, the
//! canonical item list for that tab, the session (focus / selection /
//! per-item modes), the reconciler, the poll gate, and the toast queue. No
//! rendering logic lives here — `app.rs` is state that is read by the render
//! module and mutated by the keybinding dispatcher and by completed network
//! calls.
//!
//! Every mutation that needs the network returns `Vec<ApiRequest>` instead of
//! performing I/O, so the whole dispatch cycle is testable with a pinned
//! clock and a recording notification sink.

use std::collections::BTreeSet;

use chrono::{DateTime, Duration, Utc};
use ratatui::widgets::ListState;

use c2cmd_core::filter::{self, ReviewFilter};
use c2cmd_core::reconcile::{Clock, NotificationSink, PollTimer, Reconciler};
use c2cmd_core::session::{RejectPress, SessionState};
use c2cmd_core::toast::{ToastKind, ToastQueue};
use c2cmd_core::types::{
    Decision, LearningDecision, LearningProposal, MetricsSnapshot, ReviewItem, StatusFilter,
};

use crate::net::types::{ApiEvent, ApiRequest};

/// Top-level view the console is showing.
///
/// The four review tabs share the queue renderer; `Learning` shows the
/// parallel proposal flow. Only `Pending` is actionable and only `Pending`
/// polls — the other tabs fetch once on entry.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Pending,
    Approved,
    Rejected,
    Feedback,
    Learning,
}

impl Tab {
    pub fn next(self) -> Self {
        match self {
            Tab::Pending => Tab::Approved,
            Tab::Approved => Tab::Rejected,
            Tab::Rejected => Tab::Feedback,
            Tab::Feedback => Tab::Learning,
            Tab::Learning => Tab::Pending,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Tab::Pending => "Pending",
            Tab::Approved => "Approved",
            Tab::Rejected => "Rejected",
            Tab::Feedback => "Feedback",
            Tab::Learning => "Learning",
        }
    }

    /// Status facet this tab fetches, `None` for the learning tab.
    pub fn review_status(self) -> Option<StatusFilter> {
        match self {
            Tab::Pending => Some(StatusFilter::Pending),
            Tab::Approved => Some(StatusFilter::Approved),
            Tab::Rejected => Some(StatusFilter::Rejected),
            Tab::Feedback => Some(StatusFilter::Feedback),
            Tab::Learning => None,
        }
    }

    pub const ALL: [Tab; 5] =
        [Tab::Pending, Tab::Approved, Tab::Rejected, Tab::Feedback, Tab::Learning];
}

/// Which keybinding set is active. The feedback composer is not a `Mode`
/// variant — it is derived from `SessionState::composing_id` so the composer
/// state can never disagree with the per-item mode it belongs to.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Normal,
    /// Full-screen help overlay is shown above everything.
    HelpOverlay,
    /// Quit-confirmation dialog shown when decisions are still in flight.
    ConfirmQuit,
}

/// All mutable state passed through every render cycle.
pub struct AppState {
    pub tab: Tab,
    pub mode: Mode,
    /// Canonical item list for the current review tab, server-sourced and
    /// replaced wholesale by each applied poll.
    pub items: Vec<ReviewItem>,
    pub proposals: Vec<LearningProposal>,
    pub metrics: Option<MetricsSnapshot>,
    pub filter: ReviewFilter,
    pub session: SessionState,
    pub reconciler: Reconciler,
    pub poll_timer: PollTimer,
    pub toasts: ToastQueue,
    /// True while the last poll failed at the transport level. Cleared
    /// silently by the next successful fetch.
    pub connection_lost: bool,
    /// Decisions currently in flight, for the quit guard.
    pub inflight: usize,
    /// Wall-clock instant refreshed each tick; drives relative age labels so
    /// they stay current between polls without fetching.
    pub now: DateTime<Utc>,
    /// Stateful list widget backing the queue panel.
    pub list_state: ListState,
    /// Vertical scroll offset for the help overlay.
    pub help_scroll: u16,
}

impl AppState {
    pub fn new(poll_interval_secs: u64, clock: &dyn Clock) -> Self {
        Self {
            tab: Tab::default(),
            mode: Mode::default(),
            items: Vec::new(),
            proposals: Vec::new(),
            metrics: None,
            filter: ReviewFilter::default(),
            session: SessionState::default(),
            reconciler: Reconciler::default(),
            poll_timer: PollTimer::new(Duration::seconds(poll_interval_secs as i64)),
            toasts: ToastQueue::default(),
            connection_lost: false,
            inflight: 0,
            now: clock.now(),
            list_state: ListState::default(),
            help_scroll: 0,
        }
    }

    // -- derived views --------------------------------------------------------

    /// Ids of the filtered, ordered list — the basis for keyboard indices.
    pub fn visible_ids(&self) -> Vec<String> {
        filter::visible(&self.items, &self.filter)
            .iter()
            .map(|i| i.id.clone())
            .collect()
    }

    /// Length of the list the focus index runs over for the current tab.
    pub fn visible_len(&self) -> usize {
        match self.tab {
            Tab::Learning => self.proposals.len(),
            _ => filter::visible(&self.items, &self.filter).len(),
        }
    }

    /// Id of the focused review item, if any.
    pub fn focused_id(&self) -> Option<String> {
        self.visible_ids().get(self.session.focused_index).cloned()
    }

    fn live_ids(&self) -> BTreeSet<String> {
        self.items.iter().map(|i| i.id.clone()).collect()
    }

    fn workflow_label_of(&self, id: &str) -> String {
        self.items
            .iter()
            .find(|i| i.id == id)
            .map(|i| i.workflow_label().to_owned())
            .unwrap_or_else(|| "review".to_owned())
    }

    // -- scheduling -----------------------------------------------------------

    /// Per-tick housekeeping: refresh the cached clock, expire toasts, and
    /// fire a poll when one is due.
    pub fn tick(&mut self, clock: &dyn Clock) -> Vec<ApiRequest> {
        self.now = clock.now();
        self.toasts.prune(clock);
        self.maybe_poll(clock)
    }

    /// Issues the periodic poll. Active on the Pending tab only; the other
    /// tabs live with the snapshot they fetched on entry.
    fn maybe_poll(&mut self, clock: &dyn Clock) -> Vec<ApiRequest> {
        if self.tab != Tab::Pending || !self.poll_timer.due(clock) {
            return Vec::new();
        }
        self.poll_timer.mark(clock);
        vec![
            ApiRequest::FetchReviews {
                seq: self.reconciler.begin_poll(),
                status: StatusFilter::Pending,
            },
            ApiRequest::FetchMetrics,
        ]
    }

    /// Fetches for the current tab: the entry fetch on startup and after
    /// every tab switch, and the forced refetch after feedback or batch.
    pub fn refresh_tab(&mut self, clock: &dyn Clock) -> Vec<ApiRequest> {
        match self.tab.review_status() {
            Some(status) => {
                self.poll_timer.mark(clock);
                vec![
                    ApiRequest::FetchReviews { seq: self.reconciler.begin_poll(), status },
                    ApiRequest::FetchMetrics,
                ]
            }
            None => vec![ApiRequest::FetchProposals, ApiRequest::FetchMetrics],
        }
    }

    /// Advances to the next tab. Session state resets whole, the reconciler
    /// forgets its baseline (so the entry fetch seeds silently and any fetch
    /// still in flight goes stale), and the filter clears.
    pub fn switch_tab(&mut self, clock: &dyn Clock) -> Vec<ApiRequest> {
        self.tab = self.tab.next();
        self.session.reset();
        self.reconciler.reset();
        self.poll_timer.reset();
        self.filter = ReviewFilter::default();
        self.items.clear();
        self.connection_lost = false;
        log::debug!("switched to tab {}", self.tab.title());
        self.refresh_tab(clock)
    }

    // -- filters --------------------------------------------------------------

    pub fn cycle_workflow_filter(&mut self) {
        let facets = filter::workflow_facets(&self.items);
        self.filter.cycle_workflow(&facets);
        self.session.clamp_focus(self.visible_len());
    }

    pub fn cycle_risk_filter(&mut self) {
        self.filter.cycle_risk();
        self.session.clamp_focus(self.visible_len());
    }

    // -- operator intents -----------------------------------------------------

    /// `a` on the pending tab: dispatches an approve for the focused item
    /// unless one is already in flight for it.
    pub fn approve_focused(&mut self) -> Vec<ApiRequest> {
        if self.tab != Tab::Pending {
            return Vec::new();
        }
        let Some(id) = self.focused_id() else {
            return Vec::new();
        };
        if self.session.is_acting(&id) {
            return Vec::new();
        }
        self.session.begin_acting(&id);
        self.inflight += 1;
        vec![ApiRequest::Decide { id, decision: Decision::Approved, message: None }]
    }

    /// `r` on the pending tab: first press arms, second press on the same
    /// item dispatches the rejection.
    pub fn press_reject_focused(&mut self) -> Vec<ApiRequest> {
        if self.tab != Tab::Pending {
            return Vec::new();
        }
        let Some(id) = self.focused_id() else {
            return Vec::new();
        };
        if self.session.is_acting(&id) {
            return Vec::new();
        }
        match self.session.press_reject(&id) {
            RejectPress::Armed => Vec::new(),
            RejectPress::Confirmed => {
                self.session.begin_acting(&id);
                self.inflight += 1;
                vec![ApiRequest::Decide { id, decision: Decision::Rejected, message: None }]
            }
        }
    }

    /// `f` on the pending tab: opens the composer for the focused item.
    pub fn open_feedback_focused(&mut self) {
        if self.tab != Tab::Pending {
            return;
        }
        if let Some(id) = self.focused_id() {
            if !self.session.is_acting(&id) {
                self.session.open_feedback(&id);
            }
        }
    }

    /// Enter inside the composer. Refused client-side while the trimmed
    /// draft is empty; the composer stays open until the server confirms.
    pub fn submit_feedback(&mut self) -> Vec<ApiRequest> {
        let Some(id) = self.session.composing_id() else {
            return Vec::new();
        };
        if self.session.is_acting(&id) {
            return Vec::new();
        }
        let Some(message) = self.session.submittable_feedback(&id) else {
            return Vec::new();
        };
        self.session.begin_acting(&id);
        self.inflight += 1;
        vec![ApiRequest::Decide { id, decision: Decision::Feedback, message: Some(message) }]
    }

    /// `x`: selection toggle on the focused pending item.
    pub fn toggle_select_focused(&mut self) {
        if self.tab != Tab::Pending {
            return;
        }
        if let Some(id) = self.focused_id() {
            self.session.toggle_selected(&id);
        }
    }

    /// `*`: select-all toggle over the currently visible pending ids.
    pub fn select_all_visible(&mut self) {
        if self.tab != Tab::Pending {
            return;
        }
        let ids = self.visible_ids();
        self.session.select_all_toggle(ids);
    }

    /// `A`: one batch request approving the whole selection.
    pub fn batch_approve(&mut self) -> Vec<ApiRequest> {
        if self.tab != Tab::Pending || self.session.selected.is_empty() {
            return Vec::new();
        }
        let ids: Vec<String> = self.session.selected.iter().cloned().collect();
        self.inflight += 1;
        vec![ApiRequest::BatchApprove { ids }]
    }

    /// `a` / `r` on the learning tab.
    pub fn decide_learning(&mut self, decision: LearningDecision) -> Vec<ApiRequest> {
        if self.tab != Tab::Learning {
            return Vec::new();
        }
        let Some(proposal) = self.proposals.get(self.session.focused_index) else {
            return Vec::new();
        };
        let session_id = proposal.session_id.clone();
        if self.session.is_acting(&session_id) {
            return Vec::new();
        }
        self.session.begin_acting(&session_id);
        self.inflight += 1;
        vec![ApiRequest::DecideLearning { session_id, decision }]
    }

    // -- network results ------------------------------------------------------

    /// Folds one completed network call into state. Returns any follow-up
    /// requests (metrics refresh, forced refetch) for the caller to dispatch.
    pub fn apply_api_event(
        &mut self,
        event: ApiEvent,
        clock: &dyn Clock,
        sink: &mut dyn NotificationSink,
    ) -> Vec<ApiRequest> {
        match event {
            ApiEvent::Reviews { seq, status, result } => {
                self.apply_reviews(seq, status, result, clock, sink)
            }
            ApiEvent::Metrics(result) => {
                match result {
                    Ok(metrics) => self.metrics = Some(metrics),
                    // Metrics are advisory; a failed fetch degrades nothing.
                    Err(e) => log::debug!("metrics fetch failed: {e}"),
                }
                Vec::new()
            }
            ApiEvent::Proposals(result) => {
                match result {
                    Ok(proposals) => {
                        self.proposals = proposals;
                        self.session.clamp_focus(self.visible_len());
                    }
                    Err(e) => self.toasts.push(ToastKind::Error, e.toast_message(), clock),
                }
                Vec::new()
            }
            ApiEvent::Decided { id, decision, result } => {
                self.apply_decided(id, decision, result, clock)
            }
            ApiEvent::Batched(result) => {
                self.inflight = self.inflight.saturating_sub(1);
                match result {
                    Ok(outcome) => {
                        self.session.selected.clear();
                        let kind = if outcome.complete() {
                            ToastKind::Success
                        } else {
                            ToastKind::Warning
                        };
                        self.toasts.push(
                            kind,
                            format!(
                                "Batch approved {}/{} reviews",
                                outcome.success_count, outcome.total_count
                            ),
                            clock,
                        );
                        self.refresh_tab(clock)
                    }
                    Err(e) => {
                        self.toasts.push(ToastKind::Error, e.toast_message(), clock);
                        Vec::new()
                    }
                }
            }
            ApiEvent::LearningDecided { session_id, result } => {
                self.inflight = self.inflight.saturating_sub(1);
                self.session.end_acting(&session_id);
                match result {
                    Ok(()) => {
                        let label = self
                            .proposals
                            .iter()
                            .find(|p| p.session_id == session_id)
                            .map(|p| p.label().to_owned())
                            .unwrap_or_else(|| "proposal".to_owned());
                        self.proposals.retain(|p| p.session_id != session_id);
                        self.session.clamp_focus(self.visible_len());
                        self.toasts.push(
                            ToastKind::Success,
                            format!("Decision recorded — {label}"),
                            clock,
                        );
                    }
                    Err(e) => self.toasts.push(ToastKind::Error, e.toast_message(), clock),
                }
                Vec::new()
            }
        }
    }

    fn apply_reviews(
        &mut self,
        seq: u64,
        status: StatusFilter,
        result: Result<Vec<ReviewItem>, c2cmd_api::ApiError>,
        clock: &dyn Clock,
        sink: &mut dyn NotificationSink,
    ) -> Vec<ApiRequest> {
        // A response for a tab the user has already left is dropped whole.
        if Some(status) != self.tab.review_status() {
            return Vec::new();
        }
        match result {
            Ok(items) => {
                self.connection_lost = false;
                if let Some((items, outcome)) = self.reconciler.apply_poll(seq, items, sink) {
                    self.items = items;
                    if self.tab == Tab::Pending {
                        self.session.record_new(outcome.new_ids);
                    }
                    let live = self.live_ids();
                    self.session.purge_missing(&live);
                    self.session.clamp_focus(self.visible_len());
                }
            }
            Err(e) => {
                log::warn!("review fetch failed: {e}");
                if e.is_network() {
                    self.connection_lost = true;
                } else {
                    self.toasts.push(ToastKind::Error, e.toast_message(), clock);
                }
            }
        }
        Vec::new()
    }

    fn apply_decided(
        &mut self,
        id: String,
        decision: Decision,
        result: Result<(), c2cmd_api::ApiError>,
        clock: &dyn Clock,
    ) -> Vec<ApiRequest> {
        self.inflight = self.inflight.saturating_sub(1);
        self.session.end_acting(&id);
        match result {
            Ok(()) => {
                let label = self.workflow_label_of(&id);
                match decision {
                    Decision::Approved | Decision::Rejected => {
                        // Optimistic removal: hide now, tombstone bridges any
                        // poll that was already in flight.
                        self.reconciler.tombstone(&id);
                        self.items.retain(|i| i.id != id);
                        let live = self.live_ids();
                        self.session.purge_missing(&live);
                        self.session.clamp_focus(self.visible_len());
                        let verb = if decision == Decision::Approved {
                            "Approved"
                        } else {
                            "Rejected"
                        };
                        self.toasts.push(
                            ToastKind::Success,
                            format!("{verb} — {label}"),
                            clock,
                        );
                        vec![ApiRequest::FetchMetrics]
                    }
                    Decision::Feedback => {
                        self.session.close_feedback(&id);
                        self.toasts.push(
                            ToastKind::Success,
                            format!("Feedback requested — {label}"),
                            clock,
                        );
                        // Feedback re-enters the pending pool with a bumped
                        // round, so the whole list is refetched.
                        self.refresh_tab(clock)
                    }
                }
            }
            Err(e) => {
                // Item stays; the composer (if any) keeps its draft.
                self.toasts.push(ToastKind::Error, e.toast_message(), clock);
                Vec::new()
            }
        }
    }
}
