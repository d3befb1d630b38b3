//! Terminal-side notification sink.
//!
//! High-risk arrivals ring the terminal bell (BEL), which most terminal
//! emulators surface as an audible cue or a window/tab attention marker even
//! when the console is in a background tab. The full message also goes to the
//! log file, since the bell itself carries no text.

use std::io::Write;

use c2cmd_core::reconcile::NotificationSink;

/// Rings BEL on stderr and logs the notification text.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalBell;

impl NotificationSink for TerminalBell {
    fn notify(&mut self, summary: &str, body: &str) {
        log::info!("notification: {summary}: {body}");
        let mut err = std::io::stderr();
        let _ = err.write_all(b"\x07");
        let _ = err.flush();
    }
}
