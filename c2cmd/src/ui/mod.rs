//! UI rendering module for c2cmd.
//!
//! This is the module root for `ui/`. It re-exports `render()` as the single
//! entry point called by the event loop's `terminal.draw()` closure.
//!
//! Layout arithmetic and chrome live in `layout.rs`; the queue, learning
//! list, metrics strip, composer, toasts, and help overlay each have their
//! own renderer module.

mod layout;
pub mod compose;
pub mod help;
pub mod keybindings;
pub mod learning;
pub mod metrics;
pub mod queue;
pub mod toast;

use ratatui::{
    layout::Constraint,
    text::{Line, Text},
    widgets::{Clear, Paragraph},
    Frame,
};

use crate::app::{AppState, Mode, Tab};
use crate::theme::Theme;
use layout::{compute_layout, render_banner, render_status_bar, render_tabs};

/// Renders one complete frame.
///
/// Called exactly once per `AppEvent::Render` inside `terminal.draw()`. This
/// is the only location where `terminal.draw()` is called in the application.
/// Overlays (composer, quit confirm, help, toasts) are rendered after the
/// panels so they sit on top; `Clear` inside each overlay erases its
/// background.
pub fn render(frame: &mut Frame, state: &mut AppState, theme: &Theme) {
    let [tab_strip, metrics_area, banner, main, status_bar] = compute_layout(frame);

    render_tabs(frame, tab_strip, state, theme);
    metrics::render_metrics(frame, metrics_area, state, theme);
    render_banner(frame, banner, state, theme);

    match state.tab {
        Tab::Learning => learning::render_learning(frame, main, state, theme),
        _ => queue::render_queue(frame, main, state, theme),
    }

    render_status_bar(frame, status_bar, state, theme);

    compose::render_composer(frame, state, theme);
    if state.mode == Mode::ConfirmQuit {
        render_confirm_quit(frame, state, theme);
    }
    if state.mode == Mode::HelpOverlay {
        help::render_help_overlay(frame, theme, state.help_scroll);
    }
    toast::render_toasts(frame, state, theme);
}

/// Small centred dialog shown when quitting with decisions still in flight.
fn render_confirm_quit(frame: &mut Frame, state: &AppState, theme: &Theme) {
    if frame.area().width < 50 {
        return;
    }
    let area = frame
        .area()
        .centered(Constraint::Length(48), Constraint::Length(4));
    frame.render_widget(Clear, area);

    let block = layout::panel_block(" Quit? ", true, theme);
    let text = Text::from(vec![
        Line::raw(format!(
            "{} decision(s) still in flight.",
            state.inflight
        )),
        Line::raw("y to quit anyway, n to keep waiting"),
    ]);
    frame.render_widget(Paragraph::new(text).block(block), area);
}
