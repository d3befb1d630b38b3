//! File logging setup.
//!
//! The TUI owns the terminal, so log output goes to `.c2cmd/c2cmd.log` in the
//! working directory rather than stderr. Initialisation failure is non-fatal:
//! the console runs fine without a log file, it just loses diagnostics.

use log::LevelFilter;

/// Initialises the `log` facade with a `fern` dispatch writing to
/// `.c2cmd/c2cmd.log`. Creates the directory if needed.
///
/// # Errors
///
/// Returns `Err` when the directory or log file cannot be created, or when a
/// global logger is already installed.
pub fn init(dir: &str) -> Result<(), fern::InitError> {
    std::fs::create_dir_all(dir)?;
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(LevelFilter::Info)
        .level_for("c2cmd", LevelFilter::Debug)
        .level_for("c2cmd_core", LevelFilter::Debug)
        .level_for("c2cmd_api", LevelFilter::Debug)
        .chain(fern::log_file(format!("{dir}/c2cmd.log"))?)
        .apply()?;
    Ok(())
}
