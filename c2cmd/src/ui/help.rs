//! Help overlay renderer.
//!
//! Draws a centred modal box over the queue using ratatui's `Clear` widget to
//! erase the background first. The overlay is rendered inside the same
//! `terminal.draw()` closure as all other panels — calling
//! `frame.render_widget(Clear, area)` before the bordered `Paragraph`
//! achieves the modal effect without a second draw call.

use ratatui::{
    layout::Constraint,
    text::{Line, Text},
    widgets::{Block, Clear, Paragraph, Wrap},
    Frame,
};

use crate::theme::Theme;

/// Renders the help overlay as a centred modal.
///
/// If the terminal is narrower than 60 columns the overlay is skipped to
/// avoid a zero-height `Rect` panic.
pub fn render_help_overlay(frame: &mut Frame, theme: &Theme, help_scroll: u16) {
    if frame.area().width < 60 {
        return;
    }

    let overlay_area = frame
        .area()
        .centered(Constraint::Percentage(80), Constraint::Percentage(80));

    frame.render_widget(Clear, overlay_area);

    let block = Block::bordered()
        .title(" Help  — j/k scroll, ? or Esc to dismiss ")
        .border_style(ratatui::style::Style::default().fg(theme.border_active));

    frame.render_widget(
        Paragraph::new(build_help_text())
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((help_scroll, 0)),
        overlay_area,
    );
}

/// Builds the help text as a multi-line `Text` value.
fn build_help_text() -> Text<'static> {
    Text::from(vec![
        Line::from("Navigation"),
        Line::from("  j / k         Focus next / previous item"),
        Line::from("  g / G         Focus first / last item"),
        Line::from("  Enter         Expand / collapse item detail"),
        Line::from("  Tab           Cycle tab (Pending → Approved → Rejected → Feedback → Learning)"),
        Line::from(""),
        Line::from("Decisions (Pending tab)"),
        Line::from("  a             Approve focused item"),
        Line::from("  r             Reject focused item (press twice to confirm)"),
        Line::from("  f             Compose feedback for focused item"),
        Line::from("  x             Toggle selection on focused item"),
        Line::from("  *             Select / deselect all visible items"),
        Line::from("  A             Batch-approve the selection"),
        Line::from(""),
        Line::from("Learning tab"),
        Line::from("  a / r         Approve / reject the focused proposal"),
        Line::from(""),
        Line::from("Filters & banner"),
        Line::from("  w             Cycle workflow filter"),
        Line::from("  s             Cycle risk filter"),
        Line::from("  n             Dismiss the new-items banner"),
        Line::from(""),
        Line::from("Feedback composer"),
        Line::from("  Enter         Send (refused while the draft is empty)"),
        Line::from("  Esc           Discard the draft and close"),
        Line::from(""),
        Line::from("General"),
        Line::from("  Esc           Cancel reject confirm / close composer / clear selection"),
        Line::from("  ?             Open / close this help overlay"),
        Line::from("  q             Quit (confirms while decisions are in flight)"),
    ])
}
