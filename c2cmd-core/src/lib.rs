//! Core domain and state-machine logic for the c2cmd approval console.
//!
//! Everything in this crate is pure: no terminal, no HTTP, no timers. The TUI
//! binary feeds events in (key intents, poll results, clock readings) and reads
//! state back out. Time and notification side effects go through the `Clock`
//! and `NotificationSink` traits in `reconcile` so every transition is
//! unit-testable without a real interval timer or a real notifier.

pub mod filter;
pub mod reconcile;
pub mod session;
pub mod timefmt;
pub mod toast;
pub mod types;
