//! Review queue renderer.
//!
//! Renders the filtered, ordered review list as a stateful `List`. Each row
//! shows a selection mark, risk badge, workflow label, summary, feedback
//! round, and an age label colored by urgency; expanded items grow extra
//! detail lines beneath the row. The focused row is driven by
//! `session.focused_index` through the shared `ListState`, which keeps it
//! scrolled into view.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem},
    Frame,
};

use c2cmd_core::filter;
use c2cmd_core::session::ItemMode;
use c2cmd_core::timefmt;
use c2cmd_core::types::ReviewItem;

use crate::app::{AppState, Tab};
use crate::theme::Theme;
use crate::ui::layout::panel_block;

/// Renders the queue panel for the current review tab.
pub fn render_queue(frame: &mut Frame, area: Rect, state: &mut AppState, theme: &Theme) {
    let visible = filter::visible(&state.items, &state.filter);
    let count = visible.len();
    let title = format!(" {} ({}) ", state.tab.title(), count);

    let rows: Vec<ListItem<'static>> = if visible.is_empty() {
        vec![ListItem::new(Line::raw(empty_label(state)))]
    } else {
        visible.iter().map(|item| queue_row(item, state, theme)).collect()
    };

    let list = List::new(rows)
        .block(panel_block(&title, true, theme))
        .highlight_style(
            Style::default().fg(theme.row_focused).add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▌ ");

    if count > 0 {
        state.list_state.select(Some(state.session.focused_index));
    } else {
        state.list_state.select(None);
    }
    frame.render_stateful_widget(list, area, &mut state.list_state);
}

fn empty_label(state: &AppState) -> &'static str {
    if state.connection_lost {
        "No data — connection lost"
    } else if !state.filter.is_unfiltered() {
        "No reviews match the current filters"
    } else if state.tab == Tab::Pending {
        "Queue clear — nothing waiting on you"
    } else {
        "Nothing here yet"
    }
}

/// Builds one (possibly multi-line) list entry for a review item.
fn queue_row(item: &ReviewItem, state: &AppState, theme: &Theme) -> ListItem<'static> {
    let actionable = state.tab == Tab::Pending;
    let mut spans: Vec<Span<'static>> = Vec::new();

    if actionable {
        let mark = if state.session.selected.contains(&item.id) {
            Span::styled("[x] ", Style::default().fg(theme.selection_mark))
        } else {
            Span::styled("[ ] ", Style::default().fg(theme.border_inactive))
        };
        spans.push(mark);
    }

    spans.push(Span::styled(
        format!("{} ", item.risk_level.badge()),
        Style::default().fg(theme.risk(item.risk_level)).add_modifier(Modifier::BOLD),
    ));

    spans.push(Span::styled(
        item.workflow_label().to_owned(),
        Style::default().add_modifier(Modifier::BOLD),
    ));

    if let Some(summary) = &item.review_context.summary {
        spans.push(Span::styled(
            format!("  {}", truncate(summary, 48)),
            Style::default().fg(theme.detail_text),
        ));
    }

    if item.feedback_round > 1 {
        spans.push(Span::styled(
            format!("  round {}", item.feedback_round),
            Style::default().fg(theme.detail_text),
        ));
    }

    let age = state.now - item.created_at;
    spans.push(Span::styled(
        format!("  {}", timefmt::relative(item.created_at, state.now)),
        Style::default().fg(theme.age(timefmt::urgency(age))),
    ));

    if state.session.is_new(&item.id) {
        spans.push(Span::styled(
            "  NEW",
            Style::default().fg(theme.row_new).add_modifier(Modifier::BOLD),
        ));
    }

    match state.session.mode(&item.id) {
        ItemMode::ConfirmingReject => spans.push(Span::styled(
            "  press r again to reject, Esc to cancel",
            Style::default().fg(theme.banner_alert).add_modifier(Modifier::BOLD),
        )),
        ItemMode::ComposingFeedback { .. } => spans.push(Span::styled(
            "  composing feedback…",
            Style::default().fg(theme.status_mode_compose),
        )),
        ItemMode::Idle => {}
    }

    if state.session.is_acting(&item.id) {
        spans.push(Span::styled("  …", Style::default().fg(theme.detail_text)));
    }

    let mut lines = vec![Line::from(spans)];
    if state.session.is_expanded(&item.id) {
        lines.extend(detail_lines(item, state, theme));
    }
    ListItem::new(lines)
}

/// Indented detail lines shown beneath an expanded row.
fn detail_lines(item: &ReviewItem, state: &AppState, theme: &Theme) -> Vec<Line<'static>> {
    let indent = if state.tab == Tab::Pending { "      " } else { "  " };
    let dim = Style::default().fg(theme.detail_text);
    let mut lines = Vec::new();

    if let Some(summary) = &item.review_context.summary {
        lines.push(Line::from(Span::styled(format!("{indent}{summary}"), dim)));
    }
    for file in &item.review_context.files {
        lines.push(Line::from(Span::styled(format!("{indent}• {file}"), dim)));
    }
    for link in &item.review_context.links {
        lines.push(Line::from(Span::styled(format!("{indent}→ {link}"), dim)));
    }
    if let Some(prompt) = &item.review_context.suggested_prompt {
        lines.push(Line::from(Span::styled(
            format!("{indent}suggested: {prompt}"),
            dim.add_modifier(Modifier::ITALIC),
        )));
    }
    if !item.notified_channels.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("{indent}notified: {}", item.notified_channels.join(", ")),
            dim,
        )));
    }
    if lines.is_empty() {
        lines.push(Line::from(Span::styled(format!("{indent}(no context provided)"), dim)));
    }
    lines
}

/// Truncates display text on a character boundary.
fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_owned()
    } else {
        let cut: String = text.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}
