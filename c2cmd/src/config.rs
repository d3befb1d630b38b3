//! Configuration loading for c2cmd.
//!
//! Config lives at `$XDG_CONFIG_HOME/c2cmd/config.toml` (falling back to
//! `~/.config/c2cmd/config.toml`). Every failure here is soft: a missing or
//! malformed file yields the defaults so a typo never prevents startup. The
//! `C2CMD_BASE_URL` environment variable overrides the config file, which is
//! the usual way to point the console at a non-local deployment.

use serde::Deserialize;

/// Parsed configuration with every field defaulted.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the AgentC2 server hosting `/api/reviews`.
    pub base_url: String,
    /// Theme name resolved through `Theme::from_name`.
    pub theme: String,
    /// Pending-tab poll interval in seconds.
    pub poll_interval_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:3000".to_owned(),
            theme: "catppuccin-mocha".to_owned(),
            poll_interval_secs: 15,
        }
    }
}

/// Returns the path to the c2cmd config file.
///
/// Prefers `$XDG_CONFIG_HOME/c2cmd/config.toml`; falls back to
/// `~/.config/c2cmd/config.toml` when the env var is absent.
fn config_path() -> std::path::PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .ok()
        .map(std::path::PathBuf::from)
        .or_else(|| {
            std::env::var("HOME")
                .ok()
                .map(|h| std::path::PathBuf::from(h).join(".config"))
        })
        .unwrap_or_else(|| std::path::PathBuf::from(".config"));
    base.join("c2cmd").join("config.toml")
}

/// Loads config from disk and applies environment overrides.
///
/// Never panics and never errors — parse problems are printed to stderr
/// (this runs before the terminal is taken over) and defaults are used.
pub fn load() -> Config {
    let path = config_path();
    let mut config = match std::fs::read_to_string(&path) {
        Ok(raw) => match toml::from_str(&raw) {
            Ok(parsed) => parsed,
            Err(e) => {
                eprintln!("c2cmd: config parse error in {:?}: {}", path, e);
                Config::default()
            }
        },
        Err(_) => Config::default(),
    };

    if let Ok(url) = std::env::var("C2CMD_BASE_URL") {
        if !url.trim().is_empty() {
            config.base_url = url;
        }
    }
    if config.poll_interval_secs == 0 {
        config.poll_interval_secs = Config::default().poll_interval_secs;
    }
    config
}
