//! Toast renderer.
//!
//! Live toasts stack upward from the bottom-right corner, newest at the
//! bottom, each in its own small bordered box. Expiry is handled by the tick
//! arm pruning the queue; this module only draws whatever is still alive.

use ratatui::{
    layout::Rect,
    style::Style,
    text::Line,
    widgets::{Block, Clear, Paragraph},
    Frame,
};

use crate::app::AppState;
use crate::theme::Theme;

const TOAST_HEIGHT: u16 = 3;
const TOAST_MAX_WIDTH: u16 = 44;

pub fn render_toasts(frame: &mut Frame, state: &AppState, theme: &Theme) {
    if state.toasts.is_empty() {
        return;
    }
    let screen = frame.area();
    if screen.width < TOAST_MAX_WIDTH + 2 {
        return;
    }

    let toasts: Vec<_> = state.toasts.iter().collect();
    // Newest at the bottom; older toasts shift upward until they run out of
    // vertical room and are simply not drawn (they still expire on time).
    for (slot, toast) in toasts.iter().rev().enumerate() {
        let offset = (slot as u16 + 1) * TOAST_HEIGHT;
        if offset + 1 > screen.height {
            break;
        }
        let width = (toast.message.len() as u16 + 4).min(TOAST_MAX_WIDTH);
        let area = Rect {
            x: screen.right().saturating_sub(width + 1),
            y: screen.bottom().saturating_sub(offset + 1),
            width,
            height: TOAST_HEIGHT,
        };

        frame.render_widget(Clear, area);
        let block = Block::bordered()
            .border_style(Style::default().fg(theme.toast(toast.kind)));
        frame.render_widget(
            Paragraph::new(Line::raw(toast.message.clone())).block(block),
            area,
        );
    }
}
