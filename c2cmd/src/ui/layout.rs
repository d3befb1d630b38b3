//! Frame layout and chrome (tab strip, banner, status bar) for c2cmd.
//!
//! This module is pure layout arithmetic plus the three single-row chrome
//! surfaces — no mutable application state lives here. It is called inside
//! `terminal.draw()` on every render so every frame gets a fresh layout that
//! automatically reflects the current terminal size.
//!
//! `Spacing::Overlap(1)` combined with `Block::merge_borders(MergeStrategy::Fuzzy)`
//! makes adjacent panel borders share a single column and merge their
//! junction box-drawing characters automatically.

use ratatui::{
    layout::{Constraint, Layout, Margin, Rect},
    style::{Modifier, Style},
    symbols::merge::MergeStrategy,
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph, Tabs},
    Frame,
};

use crate::app::{AppState, Mode, Tab};
use crate::theme::Theme;

/// Returns `[tab_strip, metrics, banner, main, status_bar]` `Rect`s for the
/// current frame.
///
/// Called inside `terminal.draw()` on every render. The returned slices are
/// valid only for the current draw closure — never store them across frames.
pub fn compute_layout(frame: &Frame) -> [Rect; 5] {
    frame.area().layout(&Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
    ]))
}

/// Returns the inner `Rect` of a panel after removing the 1-cell border on
/// each side.
pub fn inner_rect(area: Rect) -> Rect {
    area.inner(Margin { vertical: 1, horizontal: 1 })
}

/// Builds a bordered `Block` for a panel.
///
/// `MergeStrategy::Fuzzy` is used for the border-merge strategy because
/// `Exact` produces incorrect junctions when mixing border types.
pub fn panel_block<'a>(title: &'a str, is_focused: bool, theme: &'a Theme) -> Block<'a> {
    let border_style = if is_focused {
        Style::default().fg(theme.border_active)
    } else {
        Style::default().fg(theme.border_inactive)
    };
    let border_type = if is_focused { BorderType::Thick } else { BorderType::Plain };

    Block::bordered()
        .title(title)
        .border_type(border_type)
        .border_style(border_style)
        .merge_borders(MergeStrategy::Fuzzy)
}

/// Renders the 1-row tab strip across the top.
pub fn render_tabs(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let titles: Vec<Line> = Tab::ALL.iter().map(|t| Line::from(t.title())).collect();
    let selected = Tab::ALL.iter().position(|t| *t == state.tab).unwrap_or(0);
    let tabs = Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(theme.tab_inactive))
        .highlight_style(
            Style::default().fg(theme.tab_active).add_modifier(Modifier::BOLD),
        )
        .divider(" │ ");
    frame.render_widget(tabs, area);
}

/// Renders the 1-row banner between the metrics strip and the queue.
///
/// Connection loss wins over arrivals: an operator with no server needs to
/// know that before anything else. With neither condition the row stays
/// blank rather than collapsing, so the queue never jumps vertically.
pub fn render_banner(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let line = if state.connection_lost {
        Line::from(Span::styled(
            " connection lost — showing last known queue, retrying…",
            Style::default().fg(theme.banner_alert).add_modifier(Modifier::BOLD),
        ))
    } else if state.session.new_count > 0 {
        let label = if state.session.new_count == 1 {
            " 1 new decision — n to dismiss".to_owned()
        } else {
            format!(" {} new decisions — n to dismiss", state.session.new_count)
        };
        Line::from(Span::styled(
            label,
            Style::default().fg(theme.banner_fg).add_modifier(Modifier::BOLD),
        ))
    } else {
        Line::raw("")
    };
    frame.render_widget(Paragraph::new(line), area);
}

/// Renders the 1-row status bar at the bottom of the terminal.
///
/// Always shows a mode indicator; `HelpOverlay` and `ConfirmQuit` display
/// `NORMAL` because the underlying mode is Normal — the overlay is a
/// transient visual layer, not a mode change.
pub fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let composing = state.session.composing_id().is_some();
    let (mode_text, mode_fg) = if composing {
        (" COMPOSE ", theme.status_mode_compose)
    } else {
        match state.mode {
            Mode::Normal | Mode::HelpOverlay | Mode::ConfirmQuit => {
                (" NORMAL ", theme.status_mode_normal)
            }
        }
    };

    let mut spans = vec![Span::styled(
        mode_text,
        Style::default().fg(mode_fg).add_modifier(Modifier::BOLD),
    )];

    if let Some(slug) = &state.filter.workflow {
        spans.push(Span::raw(format!(" workflow:{slug}")));
    }
    if let Some(risk) = state.filter.risk {
        spans.push(Span::raw(format!(" risk:{}", risk.badge().trim_end())));
    }
    if !state.session.selected.is_empty() {
        spans.push(Span::raw(format!(" {} selected", state.session.selected.len())));
    }
    if state.inflight > 0 {
        spans.push(Span::raw(format!(" {} in flight", state.inflight)));
    }
    spans.push(Span::raw("  ? help  q quit"));

    frame.render_widget(
        Paragraph::new(Line::from(spans))
            .style(Style::default().bg(theme.status_bar_bg).fg(theme.status_bar_fg)),
        area,
    );
}
