//! Learning proposal list renderer.
//!
//! Proposals are the parallel approval flow: an agent whose experiment passed
//! its gate is waiting for promotion. Rows show the agent label, win rate,
//! gate verdict, and who requested the approval.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem},
    Frame,
};

use c2cmd_core::timefmt;
use c2cmd_core::types::LearningProposal;

use crate::app::AppState;
use crate::theme::Theme;
use crate::ui::layout::panel_block;

pub fn render_learning(frame: &mut Frame, area: Rect, state: &mut AppState, theme: &Theme) {
    let title = format!(" Learning proposals ({}) ", state.proposals.len());

    let rows: Vec<ListItem<'static>> = if state.proposals.is_empty() {
        vec![ListItem::new(Line::raw("No proposals awaiting approval"))]
    } else {
        state.proposals.iter().map(|p| proposal_row(p, state, theme)).collect()
    };

    let list = List::new(rows)
        .block(panel_block(&title, true, theme))
        .highlight_style(
            Style::default().fg(theme.row_focused).add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▌ ");

    if state.proposals.is_empty() {
        state.list_state.select(None);
    } else {
        state.list_state.select(Some(state.session.focused_index));
    }
    frame.render_stateful_widget(list, area, &mut state.list_state);
}

fn proposal_row(proposal: &LearningProposal, state: &AppState, theme: &Theme) -> ListItem<'static> {
    let mut spans = vec![Span::styled(
        proposal.label().to_owned(),
        Style::default().add_modifier(Modifier::BOLD),
    )];

    spans.push(Span::styled(
        format!("  win rate {:.0}%", proposal.experiment.win_rate * 100.0),
        Style::default().fg(theme.metrics_value),
    ));

    let (gate, color) = if proposal.experiment.gate_passed {
        ("  gate passed", theme.toast_success)
    } else {
        ("  gate failed", theme.toast_error)
    };
    spans.push(Span::styled(gate, Style::default().fg(color)));

    if let Some(by) = &proposal.approval.requested_by {
        spans.push(Span::styled(
            format!("  by {by}"),
            Style::default().fg(theme.detail_text),
        ));
    }
    if let Some(at) = proposal.approval.requested_at {
        spans.push(Span::styled(
            format!("  {}", timefmt::relative(at, state.now)),
            Style::default().fg(theme.detail_text),
        ));
    }

    if state.session.is_acting(&proposal.session_id) {
        spans.push(Span::styled("  …", Style::default().fg(theme.detail_text)));
    }

    ListItem::new(Line::from(spans))
}
