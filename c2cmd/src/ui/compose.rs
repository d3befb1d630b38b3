//! Feedback composer modal.
//!
//! Drawn as a centred modal over the queue using the `Clear` widget, in the
//! same draw closure as everything else. The draft lives in the item's
//! session mode; this module only renders it.

use ratatui::{
    layout::Constraint,
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::AppState;
use crate::theme::Theme;
use crate::ui::layout::panel_block;

/// Renders the composer when one is open. A no-op otherwise.
pub fn render_composer(frame: &mut Frame, state: &AppState, theme: &Theme) {
    let Some(id) = state.session.composing_id() else {
        return;
    };
    let Some(draft) = state.session.feedback_draft(&id) else {
        return;
    };
    // Skip on very narrow terminals to prevent a zero-width Rect.
    if frame.area().width < 40 {
        return;
    }

    let label = state
        .items
        .iter()
        .find(|i| i.id == id)
        .map(|i| i.workflow_label().to_owned())
        .unwrap_or_else(|| "review".to_owned());

    let area = frame
        .area()
        .centered(Constraint::Percentage(60), Constraint::Length(7));
    frame.render_widget(Clear, area);

    let title = format!(" Feedback — {label} ");
    let block = panel_block(&title, true, theme);

    let submittable = state.session.submittable_feedback(&id).is_some();
    let hint = if submittable {
        Span::styled("Enter to send, Esc to discard", Style::default().fg(theme.detail_text))
    } else {
        Span::styled(
            "type feedback first — empty drafts are not sent",
            Style::default().fg(theme.toast_warning),
        )
    };

    let text = Text::from(vec![
        Line::from(vec![
            Span::raw(draft.to_owned()),
            Span::styled("█", Style::default().add_modifier(Modifier::SLOW_BLINK)),
        ]),
        Line::raw(""),
        Line::from(hint),
    ]);

    frame.render_widget(
        Paragraph::new(text).block(block).wrap(Wrap { trim: false }),
        area,
    );
}
