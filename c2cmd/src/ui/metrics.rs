//! Metrics header strip.
//!
//! One bordered row of aggregate counters. The snapshot is advisory: when no
//! fetch has succeeded yet the strip says so instead of showing zeros that
//! could be mistaken for an empty queue.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::AppState;
use crate::theme::Theme;
use crate::ui::layout::panel_block;

pub fn render_metrics(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let block = panel_block(" Metrics ", false, theme);

    let line = match &state.metrics {
        None => Line::from(Span::styled(
            "metrics unavailable",
            Style::default().fg(theme.metrics_label),
        )),
        Some(m) => {
            let label = Style::default().fg(theme.metrics_label);
            let value = Style::default().fg(theme.metrics_value);
            Line::from(vec![
                Span::styled("pending ", label),
                Span::styled(m.pending_count.to_string(), value),
                Span::styled("  avg wait ", label),
                Span::styled(format!("{:.0}m", m.avg_wait_minutes), value),
                Span::styled("  approval 7d ", label),
                Span::styled(format!("{:.0}%", m.approval_rate_7d * 100.0), value),
                Span::styled("  today ", label),
                Span::styled(m.decisions_today.to_string(), value),
                Span::styled("  resolved 24h ", label),
                Span::styled(m.resolved_24h.to_string(), value),
                Span::styled("  trend ", label),
                Span::styled(m.queue_trend.arrow(), value),
            ])
        }
    };

    frame.render_widget(Paragraph::new(line).block(block), area);
}
