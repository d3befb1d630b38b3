//! c2cmd — approval-queue console for AgentC2.
//!
//! Entry point for the `c2cmd` binary. Wires together the terminal lifecycle
//! (`tui`), unified event bus (`event`), application state (`app`), renderer
//! (`ui`), theme system (`theme`), and the background network worker (`net`)
//! over the `c2cmd-api` client.
//!
//! # Startup sequence (order matters)
//!
//! 1. Load config and theme — read-only, safe before terminal init.
//! 2. Initialise file logging — stderr belongs to the TUI afterwards.
//! 3. `install_panic_hook()` — installed first so it is the innermost hook.
//!    Restores the terminal before the panic message prints.
//! 4. `register_sigterm()` — returns `Arc<AtomicBool>` polled in the event loop.
//! 5. `init_tui()` — enters alternate screen and enables raw mode.
//! 6. Spawn the event task and the network worker, then dispatch the entry
//!    fetches so the first frames render against live data as soon as it lands.
//!
//! # Safety
//!
//! `restore_tui()` is called after the event loop exits (normal quit, 'q'
//! key, SIGTERM, or `None` channel close). The `?` operator is only used
//! before `init_tui()` or inside the Render arm — draw errors propagate out
//! of the loop and reach `restore_tui()` after `break`. The panic hook covers
//! unexpected panics.

mod app;
mod config;
mod event;
mod logging;
mod net;
mod notify;
mod theme;
mod tui;
mod ui;

use std::sync::atomic::Ordering;

use c2cmd_api::ReviewsClient;
use c2cmd_core::reconcile::SystemClock;
use tokio::sync::mpsc;

use crate::net::types::ApiRequest;
use crate::ui::keybindings::{handle_key, handle_mouse, KeyAction};

fn dispatch(tx: &mpsc::UnboundedSender<ApiRequest>, requests: Vec<ApiRequest>) {
    for request in requests {
        // A send error means the worker is gone, which only happens during
        // teardown; dropping the request is correct then.
        let _ = tx.send(request);
    }
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Step 0: config, logging, theme — all before the terminal is taken over.
    let config = config::load();
    if let Err(e) = logging::init(".c2cmd") {
        eprintln!("c2cmd: file logging disabled: {e}");
    }
    log::info!("starting against {}", config.base_url);
    let theme = theme::Theme::from_name(&config.theme);

    let clock = SystemClock;
    let mut state = app::AppState::new(config.poll_interval_secs, &clock);
    let mut bell = notify::TerminalBell;
    let client = ReviewsClient::new(config.base_url.clone());

    // Step 1: panic hook installed first — innermost hook restores terminal.
    tui::install_panic_hook();

    // Step 2: SIGTERM flag — polled in the 50ms heartbeat arm below.
    let term_flag = tui::register_sigterm();

    // Step 3: enter alternate screen and raw mode.
    let mut terminal = tui::init_tui()?;

    // Step 4: unified event channel plus the network worker channel.
    let handler = event::EventHandler::new();
    event::spawn_event_task(handler.tx.clone());
    let (api_tx, api_rx) = mpsc::unbounded_channel();
    net::worker::spawn_api_worker(client, api_rx, handler.tx.clone());
    let mut rx = handler.rx;

    // Step 5: entry fetches for the starting tab (pending queue + metrics).
    dispatch(&api_tx, state.refresh_tab(&clock));

    // Event loop — exits only via `break`, never via `?`.
    // This guarantees `restore_tui()` is always reached after the loop.
    'event_loop: loop {
        tokio::select! {
            // Heartbeat: guarantees SIGTERM is checked at least every 50ms,
            // even when no crossterm/tick/render events arrive.
            _ = tokio::time::sleep(std::time::Duration::from_millis(50)) => {
                if term_flag.load(Ordering::Relaxed) {
                    break 'event_loop;
                }
            }
            maybe_event = rx.recv() => {
                match maybe_event {
                    Some(event::AppEvent::Render) => {
                        // Exactly one draw() call per Render event — never elsewhere.
                        terminal.draw(|frame| ui::render(frame, &mut state, &theme))?;
                    }
                    Some(event::AppEvent::Key(key)) => {
                        let (action, requests) = handle_key(key, &mut state, &clock);
                        dispatch(&api_tx, requests);
                        if action == KeyAction::Quit {
                            break 'event_loop;
                        }
                    }
                    Some(event::AppEvent::Mouse(mouse)) => {
                        handle_mouse(mouse, &mut state);
                    }
                    Some(event::AppEvent::Tick) => {
                        // Refreshes relative-time labels, expires toasts, and
                        // fires the 15s poll when due on the pending tab.
                        dispatch(&api_tx, state.tick(&clock));
                    }
                    Some(event::AppEvent::Api(api_event)) => {
                        let follow_ups = state.apply_api_event(api_event, &clock, &mut bell);
                        dispatch(&api_tx, follow_ups);
                    }
                    Some(event::AppEvent::Resize(_, _)) => {
                        // Handled automatically by ratatui on the next Render:
                        // frame.area() returns the new terminal size.
                    }
                    Some(event::AppEvent::Quit) | None => break 'event_loop,
                }
                // Check SIGTERM after every event too, not just on the heartbeat,
                // so quit latency is at most one event cycle rather than 50ms.
                if term_flag.load(Ordering::Relaxed) {
                    break 'event_loop;
                }
            }
        }
    }

    // Restore the terminal at the single exit point of the loop.
    // Called unconditionally — covers normal quit, 'q' key, SIGTERM, and
    // channel close. The panic hook handles the panic path separately.
    tui::restore_tui()?;
    log::info!("shutting down");
    Ok(())
}
