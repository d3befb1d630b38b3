//! Keybinding dispatcher for c2cmd.
//!
//! Translates raw crossterm `KeyEvent`s into `AppState` mutations and returns
//! a `KeyAction` plus any network requests the keypress produced. The
//! dispatcher branches first on `state.mode`, then on whether the feedback
//! composer is open — while composing, every binding is disabled except the
//! composer editing keys and Escape.

use crossterm::event::{KeyCode, KeyEvent, MouseEvent, MouseEventKind};

use c2cmd_core::reconcile::Clock;
use c2cmd_core::types::LearningDecision;

use crate::app::{AppState, Mode, Tab};
use crate::net::types::ApiRequest;

/// Control-flow signal returned from the key dispatcher.
///
/// The event loop checks this after every keypress: `Quit` tears down the
/// terminal and exits; `Continue` waits for the next render tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Continue,
    Quit,
}

/// Dispatches a key event to the handler matching the current mode.
///
/// Mutates `state` in place; the returned requests must be forwarded to the
/// network worker by the caller.
pub fn handle_key(
    key: KeyEvent,
    state: &mut AppState,
    clock: &dyn Clock,
) -> (KeyAction, Vec<ApiRequest>) {
    match state.mode {
        Mode::HelpOverlay => (handle_help(key, state), Vec::new()),
        Mode::ConfirmQuit => (handle_confirm_quit(key, state), Vec::new()),
        Mode::Normal => {
            if state.session.composing_id().is_some() {
                (KeyAction::Continue, handle_compose(key, state))
            } else {
                handle_normal(key, state, clock)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Normal mode
// ---------------------------------------------------------------------------

fn handle_normal(
    key: KeyEvent,
    state: &mut AppState,
    clock: &dyn Clock,
) -> (KeyAction, Vec<ApiRequest>) {
    let mut requests = Vec::new();
    match key.code {
        // Navigation over the filtered, ordered list.
        KeyCode::Char('j') | KeyCode::Down => {
            let len = state.visible_len();
            state.session.focus_next(len);
        }
        KeyCode::Char('k') | KeyCode::Up => state.session.focus_prev(),
        KeyCode::Char('g') => state.session.focus_first(),
        KeyCode::Char('G') => state.session.focus_last(state.visible_len()),

        // Detail expansion (review tabs only).
        KeyCode::Enter => {
            if state.tab != Tab::Learning {
                if let Some(id) = state.focused_id() {
                    state.session.toggle_expanded(&id);
                }
            }
        }

        // Decisions.
        KeyCode::Char('a') => {
            requests = match state.tab {
                Tab::Learning => state.decide_learning(LearningDecision::Approve),
                _ => state.approve_focused(),
            };
        }
        KeyCode::Char('A') => requests = state.batch_approve(),
        KeyCode::Char('r') => {
            requests = match state.tab {
                Tab::Learning => state.decide_learning(LearningDecision::Reject),
                _ => state.press_reject_focused(),
            };
        }
        KeyCode::Char('f') => state.open_feedback_focused(),

        // Selection.
        KeyCode::Char('x') => state.toggle_select_focused(),
        KeyCode::Char('*') => state.select_all_visible(),

        // Filters and banner.
        KeyCode::Char('w') => state.cycle_workflow_filter(),
        KeyCode::Char('s') => state.cycle_risk_filter(),
        KeyCode::Char('n') => state.session.dismiss_new(),

        // Tab cycle.
        KeyCode::Tab => requests = state.switch_tab(clock),

        // Escape priority: reject-confirm, then composer, then selection.
        KeyCode::Esc => {
            state.session.escape();
        }

        // Help overlay.
        KeyCode::Char('?') => {
            state.help_scroll = 0;
            state.mode = Mode::HelpOverlay;
        }

        // Quit, guarded while decisions are in flight.
        KeyCode::Char('q') => {
            if state.inflight > 0 {
                state.mode = Mode::ConfirmQuit;
            } else {
                return (KeyAction::Quit, requests);
            }
        }

        _ => {}
    }
    (KeyAction::Continue, requests)
}

// ---------------------------------------------------------------------------
// Feedback composer
// ---------------------------------------------------------------------------

/// Keys while the composer is open: edit the draft, submit, or discard.
/// Everything else is swallowed so a stray `a` can never approve mid-typing.
fn handle_compose(key: KeyEvent, state: &mut AppState) -> Vec<ApiRequest> {
    let Some(id) = state.session.composing_id() else {
        return Vec::new();
    };
    match key.code {
        KeyCode::Esc => {
            state.session.escape();
            Vec::new()
        }
        KeyCode::Enter => state.submit_feedback(),
        KeyCode::Backspace => {
            state.session.feedback_backspace(&id);
            Vec::new()
        }
        KeyCode::Char(ch) => {
            state.session.feedback_push(&id, ch);
            Vec::new()
        }
        _ => Vec::new(),
    }
}

// ---------------------------------------------------------------------------
// HelpOverlay mode
// ---------------------------------------------------------------------------

fn handle_help(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match key.code {
        KeyCode::Char('j') => state.help_scroll = state.help_scroll.saturating_add(1),
        KeyCode::Char('k') => state.help_scroll = state.help_scroll.saturating_sub(1),
        KeyCode::Char('g') => state.help_scroll = 0,
        KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q') => state.mode = Mode::Normal,
        _ => {}
    }
    KeyAction::Continue
}

// ---------------------------------------------------------------------------
// ConfirmQuit mode
// ---------------------------------------------------------------------------

/// `y` quits even with decisions in flight; `n` / `Esc` returns to the queue.
fn handle_confirm_quit(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => KeyAction::Quit,
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            state.mode = Mode::Normal;
            KeyAction::Continue
        }
        _ => KeyAction::Continue,
    }
}

// ---------------------------------------------------------------------------
// Mouse events
// ---------------------------------------------------------------------------

/// Scroll wheel moves the focus through the list; clicks are ignored.
pub fn handle_mouse(mouse: MouseEvent, state: &mut AppState) -> KeyAction {
    if state.mode != Mode::Normal || state.session.composing_id().is_some() {
        return KeyAction::Continue;
    }
    match mouse.kind {
        MouseEventKind::ScrollUp => state.session.focus_prev(),
        MouseEventKind::ScrollDown => {
            let len = state.visible_len();
            state.session.focus_next(len);
        }
        _ => {}
    }
    KeyAction::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use c2cmd_core::reconcile::NullSink;
    use c2cmd_core::types::{
        Decision, ReviewContext, ReviewItem, ReviewStatus, RiskLevel, StatusFilter,
    };
    use chrono::{DateTime, TimeZone, Utc};
    use crossterm::event::{KeyEventKind, KeyEventState, KeyModifiers};

    use crate::net::types::ApiEvent;

    struct FixedClock(DateTime<Utc>);

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    fn clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).unwrap())
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn item(id: &str, risk: RiskLevel, minute: u32) -> ReviewItem {
        ReviewItem {
            id: id.to_owned(),
            status: ReviewStatus::Pending,
            workflow_slug: Some("trip".to_owned()),
            workflow_name: None,
            risk_level: risk,
            review_context: ReviewContext::default(),
            notified_channels: Vec::new(),
            feedback_round: 1,
            created_at: Utc.with_ymd_and_hms(2026, 8, 1, 11, minute, 0).unwrap(),
        }
    }

    fn state_with(items: Vec<ReviewItem>) -> AppState {
        let clk = clock();
        let mut state = AppState::new(15, &clk);
        let seq = state.reconciler.begin_poll();
        state.apply_api_event(
            ApiEvent::Reviews { seq, status: StatusFilter::Pending, result: Ok(items) },
            &clk,
            &mut NullSink,
        );
        state
    }

    #[test]
    fn double_r_confirms_only_on_the_same_item() {
        let mut state =
            state_with(vec![item("A", RiskLevel::Low, 0), item("B", RiskLevel::Low, 1)]);

        // r on A arms, j moves to B, r on B re-arms rather than confirming.
        let (_, reqs) = handle_key(key(KeyCode::Char('r')), &mut state, &clock());
        assert!(reqs.is_empty());
        handle_key(key(KeyCode::Char('j')), &mut state, &clock());
        let (_, reqs) = handle_key(key(KeyCode::Char('r')), &mut state, &clock());
        assert!(reqs.is_empty());

        // Second r on B confirms and dispatches the rejection.
        let (_, reqs) = handle_key(key(KeyCode::Char('r')), &mut state, &clock());
        assert_eq!(
            reqs,
            vec![ApiRequest::Decide {
                id: "B".to_owned(),
                decision: Decision::Rejected,
                message: None
            }]
        );
    }

    #[test]
    fn composer_swallows_action_keys_and_refuses_empty_submit() {
        let mut state = state_with(vec![item("A", RiskLevel::Low, 0)]);
        handle_key(key(KeyCode::Char('f')), &mut state, &clock());
        assert_eq!(state.session.composing_id().as_deref(), Some("A"));

        // 'a' is draft text now, not an approval.
        let (_, reqs) = handle_key(key(KeyCode::Char('a')), &mut state, &clock());
        assert!(reqs.is_empty());
        assert_eq!(state.session.feedback_draft("A"), Some("a"));

        // Empty (whitespace-only) draft: Enter is refused client-side.
        handle_key(key(KeyCode::Backspace), &mut state, &clock());
        handle_key(key(KeyCode::Char(' ')), &mut state, &clock());
        let (_, reqs) = handle_key(key(KeyCode::Enter), &mut state, &clock());
        assert!(reqs.is_empty());
        assert_eq!(state.session.composing_id().as_deref(), Some("A"));

        // Escape discards the draft and closes the composer.
        handle_key(key(KeyCode::Esc), &mut state, &clock());
        assert_eq!(state.session.composing_id(), None);
        assert_eq!(state.session.feedback_draft("A"), None);
    }

    #[test]
    fn escape_clears_selection_only_after_modes() {
        let mut state =
            state_with(vec![item("A", RiskLevel::Low, 0), item("B", RiskLevel::Low, 1)]);
        handle_key(key(KeyCode::Char('x')), &mut state, &clock());
        handle_key(key(KeyCode::Char('r')), &mut state, &clock());

        handle_key(key(KeyCode::Esc), &mut state, &clock());
        assert_eq!(state.session.selected.len(), 1, "first Esc cancels the armed reject");
        handle_key(key(KeyCode::Esc), &mut state, &clock());
        assert!(state.session.selected.is_empty());
    }

    #[test]
    fn select_all_then_batch_approve() {
        let mut state =
            state_with(vec![item("A", RiskLevel::Low, 0), item("B", RiskLevel::Low, 1)]);
        handle_key(key(KeyCode::Char('*')), &mut state, &clock());
        assert_eq!(state.session.selected.len(), 2);

        let (_, reqs) = handle_key(key(KeyCode::Char('A')), &mut state, &clock());
        assert!(matches!(&reqs[0], ApiRequest::BatchApprove { ids } if ids.len() == 2));
    }

    #[test]
    fn quit_is_guarded_while_a_decision_is_in_flight() {
        let mut state = state_with(vec![item("A", RiskLevel::Low, 0)]);
        handle_key(key(KeyCode::Char('a')), &mut state, &clock());
        assert_eq!(state.inflight, 1);

        let (action, _) = handle_key(key(KeyCode::Char('q')), &mut state, &clock());
        assert_eq!(action, KeyAction::Continue);
        assert_eq!(state.mode, Mode::ConfirmQuit);

        let (action, _) = handle_key(key(KeyCode::Char('n')), &mut state, &clock());
        assert_eq!(action, KeyAction::Continue);
        let (action, _) = handle_key(key(KeyCode::Char('q')), &mut state, &clock());
        assert_eq!(action, KeyAction::Continue);
        let (action, _) = handle_key(key(KeyCode::Char('y')), &mut state, &clock());
        assert_eq!(action, KeyAction::Quit);
    }

    #[test]
    fn filter_cycle_reclamps_focus() {
        let mut state = state_with(vec![
            item("A", RiskLevel::Critical, 0),
            item("B", RiskLevel::Low, 1),
            item("C", RiskLevel::Low, 2),
        ]);
        handle_key(key(KeyCode::Char('G')), &mut state, &clock());
        assert_eq!(state.session.focused_index, 2);

        // s narrows to Critical: one visible row, focus clamps to it.
        handle_key(key(KeyCode::Char('s')), &mut state, &clock());
        assert_eq!(state.visible_len(), 1);
        assert_eq!(state.session.focused_index, 0);
    }
}
