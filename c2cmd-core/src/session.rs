//! Selection, focus, and per-item transient modes for one console session.
//!
//! This module owns all UI-only state keyed by review item id: the focused
//! index into the filtered list, the multi-select set, expanded detail panels,
//! and each item's transient mode (idle / confirming-reject /
//! composing-feedback). None of it is persisted; it is created at startup,
//! reset on tab switch, and must tolerate any id disappearing from the
//! canonical list at any poll — see [`SessionState::purge_missing`].
//!
//! Per-item modes are an explicit tagged variant rather than nullable ids so
//! that arming reject-confirm on one item can never be confirmed from another.

use std::collections::{BTreeSet, HashMap};

/// Transient mode of a single pending item. Modes are mutually exclusive per
/// item and independent across items.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ItemMode {
    #[default]
    Idle,
    /// First `r` press landed; the next `r` on the same item confirms.
    ConfirmingReject,
    /// Feedback composer is open with a local-only draft. The draft is
    /// submitted or discarded whole — never partially persisted.
    ComposingFeedback { draft: String },
}

/// Result of a reject keypress — see [`SessionState::press_reject`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectPress {
    /// Confirmation armed; a second press on the same item confirms.
    Armed,
    /// Second press on an already-armed item — proceed with the rejection.
    Confirmed,
}

/// What an Escape press ended up doing, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscapeOutcome {
    CancelledReject,
    ClosedComposer,
    ClearedSelection,
    Noop,
}

/// All session-local UI state, mutated only through the methods below.
#[derive(Debug, Default)]
pub struct SessionState {
    /// Index into the currently filtered and ordered list. Always clamped to
    /// `[0, len-1]` (0 when the list is empty) via [`Self::clamp_focus`].
    pub focused_index: usize,
    /// Multi-select set for batch actions. Pending items only.
    pub selected: BTreeSet<String>,
    /// Items whose detail panel is open. Survives polls while the id does.
    pub expanded: BTreeSet<String>,
    /// Items with a decision request currently in flight. Blocks re-submit on
    /// the same item without blocking actions on other items.
    acting: BTreeSet<String>,
    /// Per-item transient modes; absent means [`ItemMode::Idle`].
    modes: HashMap<String, ItemMode>,
    /// Ids that arrived since the last banner dismiss — rendered highlighted.
    pub new_ids: BTreeSet<String>,
    /// Running "N new decisions" banner counter.
    pub new_count: u64,
}

impl SessionState {
    /// Current mode of `id` (`Idle` when untracked).
    pub fn mode(&self, id: &str) -> &ItemMode {
        static IDLE: ItemMode = ItemMode::Idle;
        self.modes.get(id).unwrap_or(&IDLE)
    }

    // -- focus ---------------------------------------------------------------

    pub fn focus_next(&mut self, len: usize) {
        if len > 0 && self.focused_index + 1 < len {
            self.focused_index += 1;
        }
    }

    pub fn focus_prev(&mut self) {
        self.focused_index = self.focused_index.saturating_sub(1);
    }

    pub fn focus_first(&mut self) {
        self.focused_index = 0;
    }

    pub fn focus_last(&mut self, len: usize) {
        self.focused_index = len.saturating_sub(1);
    }

    /// Re-clamps the focus after any list shrink (filter change, item
    /// removal). An empty list resets to 0.
    pub fn clamp_focus(&mut self, len: usize) {
        if len == 0 {
            self.focused_index = 0;
        } else if self.focused_index >= len {
            self.focused_index = len - 1;
        }
    }

    // -- selection -----------------------------------------------------------

    /// Idempotent per-item toggle.
    pub fn toggle_selected(&mut self, id: &str) {
        if !self.selected.remove(id) {
            self.selected.insert(id.to_owned());
        }
    }

    /// Pure toggle over the currently visible pending ids: when every one of
    /// them is already selected the whole selection clears, otherwise the
    /// selection becomes exactly that set. Calling twice with the same input
    /// returns to the starting state.
    pub fn select_all_toggle<I, S>(&mut self, pending_ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let all: BTreeSet<String> = pending_ids.into_iter().map(Into::into).collect();
        if !all.is_empty() && all.iter().all(|id| self.selected.contains(id)) {
            self.selected.clear();
        } else {
            self.selected = all;
        }
    }

    // -- expansion -----------------------------------------------------------

    pub fn toggle_expanded(&mut self, id: &str) {
        if !self.expanded.remove(id) {
            self.expanded.insert(id.to_owned());
        }
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.contains(id)
    }

    // -- reject confirmation -------------------------------------------------

    /// Handles an `r` press on `id`. The first press arms the confirmation;
    /// a second press on the *same* item confirms and resets the mode. Arming
    /// one item disarms any other armed item, so a stale confirmation can
    /// never fire from a different row.
    pub fn press_reject(&mut self, id: &str) -> RejectPress {
        if matches!(self.mode(id), ItemMode::ConfirmingReject) {
            self.modes.remove(id);
            return RejectPress::Confirmed;
        }
        self.modes
            .retain(|_, mode| !matches!(mode, ItemMode::ConfirmingReject));
        self.modes.insert(id.to_owned(), ItemMode::ConfirmingReject);
        RejectPress::Armed
    }

    fn armed_reject_id(&self) -> Option<String> {
        self.modes
            .iter()
            .find(|(_, m)| matches!(m, ItemMode::ConfirmingReject))
            .map(|(id, _)| id.clone())
    }

    // -- feedback composer ---------------------------------------------------

    /// Opens the composer for `id`, keeping any draft from a previous open.
    pub fn open_feedback(&mut self, id: &str) {
        let draft = match self.modes.remove(id) {
            Some(ItemMode::ComposingFeedback { draft }) => draft,
            _ => String::new(),
        };
        self.modes
            .insert(id.to_owned(), ItemMode::ComposingFeedback { draft });
    }

    pub fn feedback_push(&mut self, id: &str, ch: char) {
        if let Some(ItemMode::ComposingFeedback { draft }) = self.modes.get_mut(id) {
            draft.push(ch);
        }
    }

    pub fn feedback_backspace(&mut self, id: &str) {
        if let Some(ItemMode::ComposingFeedback { draft }) = self.modes.get_mut(id) {
            draft.pop();
        }
    }

    /// Current draft text, if the composer is open for `id`.
    pub fn feedback_draft(&self, id: &str) -> Option<&str> {
        match self.mode(id) {
            ItemMode::ComposingFeedback { draft } => Some(draft.as_str()),
            _ => None,
        }
    }

    /// Trimmed draft ready for submission, or `None` when the composer is
    /// closed or the draft is effectively empty. Does not close the composer —
    /// the draft is only cleared once the server confirms (see the dispatcher).
    pub fn submittable_feedback(&self, id: &str) -> Option<String> {
        let draft = self.feedback_draft(id)?.trim();
        if draft.is_empty() {
            None
        } else {
            Some(draft.to_owned())
        }
    }

    /// Closes the composer for `id`, discarding the draft.
    pub fn close_feedback(&mut self, id: &str) {
        if matches!(self.mode(id), ItemMode::ComposingFeedback { .. }) {
            self.modes.remove(id);
        }
    }

    /// Id of the item whose composer is open, if any.
    pub fn composing_id(&self) -> Option<String> {
        self.modes
            .iter()
            .find(|(_, m)| matches!(m, ItemMode::ComposingFeedback { .. }))
            .map(|(id, _)| id.clone())
    }

    // -- escape --------------------------------------------------------------

    /// Escape priority: cancel an armed reject-confirm, else close an open
    /// composer (discarding its draft), else clear the selection.
    pub fn escape(&mut self) -> EscapeOutcome {
        if let Some(id) = self.armed_reject_id() {
            self.modes.remove(&id);
            return EscapeOutcome::CancelledReject;
        }
        if let Some(id) = self.composing_id() {
            self.modes.remove(&id);
            return EscapeOutcome::ClosedComposer;
        }
        if !self.selected.is_empty() {
            self.selected.clear();
            return EscapeOutcome::ClearedSelection;
        }
        EscapeOutcome::Noop
    }

    // -- in-flight guard -----------------------------------------------------

    pub fn begin_acting(&mut self, id: &str) {
        self.acting.insert(id.to_owned());
    }

    pub fn end_acting(&mut self, id: &str) {
        self.acting.remove(id);
    }

    pub fn is_acting(&self, id: &str) -> bool {
        self.acting.contains(id)
    }

    // -- arrivals ------------------------------------------------------------

    /// Records newly arrived ids for the banner counter and row highlight.
    pub fn record_new<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for id in ids {
            if self.new_ids.insert(id.into()) {
                self.new_count += 1;
            }
        }
    }

    pub fn is_new(&self, id: &str) -> bool {
        self.new_ids.contains(id)
    }

    /// Clears the banner counter and row highlights.
    pub fn dismiss_new(&mut self) {
        self.new_ids.clear();
        self.new_count = 0;
    }

    // -- lifecycle -----------------------------------------------------------

    /// Drops every piece of per-id state whose id is no longer in `live`.
    ///
    /// Called after each applied poll so the session can never act on a stale
    /// id (an item decided elsewhere mid-interaction is purged from selection,
    /// expansion, modes, the acting set, and the highlight set alike).
    pub fn purge_missing(&mut self, live: &BTreeSet<String>) {
        self.selected.retain(|id| live.contains(id));
        self.expanded.retain(|id| live.contains(id));
        self.acting.retain(|id| live.contains(id));
        self.modes.retain(|id, _| live.contains(id));
        self.new_ids.retain(|id| live.contains(id));
    }

    /// Full reset, used on tab switch.
    pub fn reset(&mut self) {
        *self = SessionState::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn live(ids: &[&str]) -> BTreeSet<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn poll_removal_purges_every_per_id_structure() {
        let mut s = SessionState::default();
        s.toggle_selected("a");
        s.toggle_expanded("a");
        s.begin_acting("a");
        s.press_reject("a");
        s.record_new(["a"]);
        s.toggle_selected("b");

        s.purge_missing(&live(&["b"]));

        assert!(!s.selected.contains("a"));
        assert!(s.selected.contains("b"));
        assert!(!s.is_expanded("a"));
        assert!(!s.is_acting("a"));
        assert_eq!(*s.mode("a"), ItemMode::Idle);
        assert!(!s.is_new("a"));
    }

    #[test]
    fn composer_for_vanished_id_is_purged() {
        let mut s = SessionState::default();
        s.open_feedback("a");
        s.feedback_push("a", 'x');
        s.purge_missing(&live(&[]));
        assert_eq!(s.feedback_draft("a"), None);
        assert_eq!(s.composing_id(), None);
    }

    #[test]
    fn select_all_is_a_pure_toggle() {
        let mut s = SessionState::default();
        s.toggle_selected("a");

        s.select_all_toggle(["a", "b", "c"]);
        assert_eq!(s.selected.len(), 3);

        // Everything selected: a second call clears rather than re-adding.
        s.select_all_toggle(["a", "b", "c"]);
        assert!(s.selected.is_empty());

        // And a third returns to the full set — double-toggle identity.
        s.select_all_toggle(["a", "b", "c"]);
        assert_eq!(s.selected.len(), 3);
    }

    #[test]
    fn selection_toggle_is_idempotent_per_item() {
        let mut s = SessionState::default();
        s.toggle_selected("a");
        assert!(s.selected.contains("a"));
        s.toggle_selected("a");
        assert!(!s.selected.contains("a"));
    }

    #[test]
    fn focus_clamps_on_shrink_and_empty() {
        let mut s = SessionState::default();
        s.focus_last(10);
        assert_eq!(s.focused_index, 9);
        s.clamp_focus(4);
        assert_eq!(s.focused_index, 3);
        s.clamp_focus(0);
        assert_eq!(s.focused_index, 0);
        s.focus_next(0); // no crash, no move
        assert_eq!(s.focused_index, 0);
    }

    #[test]
    fn focus_next_stops_at_end() {
        let mut s = SessionState::default();
        s.focus_next(2);
        s.focus_next(2);
        s.focus_next(2);
        assert_eq!(s.focused_index, 1);
        s.focus_prev();
        s.focus_prev();
        assert_eq!(s.focused_index, 0);
    }

    #[test]
    fn reject_needs_two_presses_on_the_same_item() {
        let mut s = SessionState::default();
        assert_eq!(s.press_reject("a"), RejectPress::Armed);
        assert_eq!(s.press_reject("a"), RejectPress::Confirmed);
        assert_eq!(*s.mode("a"), ItemMode::Idle);
    }

    #[test]
    fn armed_state_does_not_leak_to_another_item() {
        let mut s = SessionState::default();
        assert_eq!(s.press_reject("a"), RejectPress::Armed);
        // Moving focus and pressing r on b must arm b, not confirm with a's state.
        assert_eq!(s.press_reject("b"), RejectPress::Armed);
        assert_eq!(*s.mode("a"), ItemMode::Idle);
        assert_eq!(s.press_reject("b"), RejectPress::Confirmed);
    }

    #[test]
    fn escape_priority_reject_then_composer_then_selection() {
        let mut s = SessionState::default();
        s.toggle_selected("a");
        s.open_feedback("b");
        s.press_reject("c");

        assert_eq!(s.escape(), EscapeOutcome::CancelledReject);
        assert_eq!(s.escape(), EscapeOutcome::ClosedComposer);
        assert_eq!(s.escape(), EscapeOutcome::ClearedSelection);
        assert_eq!(s.escape(), EscapeOutcome::Noop);
    }

    #[test]
    fn empty_draft_is_not_submittable() {
        let mut s = SessionState::default();
        s.open_feedback("a");
        assert_eq!(s.submittable_feedback("a"), None);
        s.feedback_push("a", ' ');
        assert_eq!(s.submittable_feedback("a"), None);
        s.feedback_push("a", 'o');
        s.feedback_push("a", 'k');
        assert_eq!(s.submittable_feedback("a").as_deref(), Some("ok"));
        // Submitting does not clear the draft; only close_feedback discards it.
        assert_eq!(s.feedback_draft("a"), Some(" ok"));
        s.close_feedback("a");
        assert_eq!(s.feedback_draft("a"), None);
    }

    #[test]
    fn reopening_composer_keeps_prior_draft() {
        let mut s = SessionState::default();
        s.open_feedback("a");
        s.feedback_push("a", 'h');
        s.feedback_push("a", 'i');
        s.open_feedback("a");
        assert_eq!(s.feedback_draft("a"), Some("hi"));
    }

    #[test]
    fn new_arrivals_count_once_per_id() {
        let mut s = SessionState::default();
        s.record_new(["x", "y"]);
        s.record_new(["y"]);
        assert_eq!(s.new_count, 2);
        s.dismiss_new();
        assert_eq!(s.new_count, 0);
        assert!(!s.is_new("x"));
    }
}
