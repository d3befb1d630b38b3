//! Color theme system for c2cmd.
//!
//! A `Theme` holds named `ratatui::style::Color` fields covering every UI
//! surface the console renders. Two built-in themes are provided:
//!
//! - `dark` — uses ANSI 16 colors (`Color::Reset`, `Color::DarkGray`, etc.) so
//!   it works on any terminal including 256-color SSH sessions with no
//!   truecolor support.
//! - `catppuccin_mocha` — Catppuccin Mocha palette in RGB; requires truecolor.

use ratatui::style::Color;

use c2cmd_core::timefmt::Urgency;
use c2cmd_core::toast::ToastKind;
use c2cmd_core::types::RiskLevel;

/// All color values used across the console's UI surfaces.
///
/// Every field is a `ratatui::style::Color`. Callers use `theme.field`
/// directly inside `Style::default().fg(theme.border_active)`.
#[derive(Debug, Clone)]
pub struct Theme {
    // Panel borders
    pub border_active: Color,
    pub border_inactive: Color,

    // Tab strip
    pub tab_active: Color,
    pub tab_inactive: Color,

    // Risk badges
    pub risk_critical: Color,
    pub risk_high: Color,
    pub risk_medium: Color,
    pub risk_low: Color,
    pub risk_trivial: Color,
    pub risk_unknown: Color,

    // Age labels
    pub age_fresh: Color,
    pub age_aging: Color,
    pub age_stale: Color,
    pub age_overdue: Color,

    // Queue rows
    /// Highlight for rows that arrived since the last banner dismiss.
    pub row_new: Color,
    pub selection_mark: Color,
    pub row_focused: Color,
    pub detail_text: Color,

    // Banner (new arrivals / connection lost)
    pub banner_fg: Color,
    pub banner_alert: Color,

    // Toasts
    pub toast_success: Color,
    pub toast_error: Color,
    pub toast_warning: Color,
    pub toast_info: Color,

    // Metrics strip
    pub metrics_label: Color,
    pub metrics_value: Color,

    // Status bar
    pub status_bar_bg: Color,
    pub status_bar_fg: Color,
    pub status_mode_normal: Color,
    pub status_mode_compose: Color,

    /// Application background (used for clearing areas).
    pub background: Color,
}

impl Theme {
    /// Returns the built-in dark theme using ANSI 16 colors.
    ///
    /// Works on all terminals: 16-color, 256-color, and truecolor. Suitable
    /// as the default when color capability is unknown.
    pub fn dark() -> Self {
        Self {
            border_active: Color::Cyan,
            border_inactive: Color::DarkGray,

            tab_active: Color::Cyan,
            tab_inactive: Color::DarkGray,

            risk_critical: Color::Red,
            risk_high: Color::LightRed,
            risk_medium: Color::Yellow,
            risk_low: Color::Blue,
            risk_trivial: Color::DarkGray,
            risk_unknown: Color::DarkGray,

            age_fresh: Color::Green,
            age_aging: Color::Yellow,
            age_stale: Color::LightRed,
            age_overdue: Color::Red,

            row_new: Color::Cyan,
            selection_mark: Color::Green,
            row_focused: Color::Cyan,
            detail_text: Color::Gray,

            banner_fg: Color::Cyan,
            banner_alert: Color::Red,

            toast_success: Color::Green,
            toast_error: Color::Red,
            toast_warning: Color::Yellow,
            toast_info: Color::Blue,

            metrics_label: Color::DarkGray,
            metrics_value: Color::White,

            status_bar_bg: Color::DarkGray,
            status_bar_fg: Color::White,
            status_mode_normal: Color::Cyan,
            status_mode_compose: Color::Green,

            background: Color::Reset,
        }
    }

    /// Returns the Catppuccin Mocha theme using RGB truecolor values.
    ///
    /// Requires a truecolor terminal. Colors degrade to the nearest ANSI
    /// 256-color approximation elsewhere, with reduced fidelity. Use `dark()`
    /// on SSH or 256-color terminals.
    ///
    /// Palette source: <https://github.com/catppuccin/catppuccin> Mocha variant.
    pub fn catppuccin_mocha() -> Self {
        // Catppuccin Mocha palette (selected subset)
        let green = Color::Rgb(166, 227, 161); // #a6e3a1
        let red = Color::Rgb(243, 139, 168); // #f38ba8
        let maroon = Color::Rgb(235, 160, 172); // #eba0ac
        let yellow = Color::Rgb(249, 226, 175); // #f9e2af
        let blue = Color::Rgb(137, 180, 250); // #89b4fa
        let teal = Color::Rgb(148, 226, 213); // #94e2d5
        let lavender = Color::Rgb(180, 190, 254); // #b4befe
        let overlay1 = Color::Rgb(127, 132, 156); // #7f849c
        let surface1 = Color::Rgb(69, 71, 90); // #45475a
        let base = Color::Rgb(30, 30, 46); // #1e1e2e
        let text = Color::Rgb(205, 214, 244); // #cdd6f4
        let subtext = Color::Rgb(166, 173, 200); // #a6adc8
        let peach = Color::Rgb(250, 179, 135); // #fab387

        Self {
            border_active: lavender,
            border_inactive: overlay1,

            tab_active: lavender,
            tab_inactive: overlay1,

            risk_critical: red,
            risk_high: maroon,
            risk_medium: peach,
            risk_low: blue,
            risk_trivial: overlay1,
            risk_unknown: overlay1,

            age_fresh: green,
            age_aging: yellow,
            age_stale: peach,
            age_overdue: red,

            row_new: teal,
            selection_mark: green,
            row_focused: lavender,
            detail_text: subtext,

            banner_fg: teal,
            banner_alert: red,

            toast_success: green,
            toast_error: red,
            toast_warning: peach,
            toast_info: blue,

            metrics_label: overlay1,
            metrics_value: text,

            status_bar_bg: surface1,
            status_bar_fg: text,
            status_mode_normal: lavender,
            status_mode_compose: green,

            background: base,
        }
    }

    /// Resolves a theme name string to the corresponding built-in theme.
    ///
    /// Unknown names fall back to `dark()` so a typo in config never prevents
    /// startup. The fallback is printed to stderr (this runs before the
    /// terminal is taken over).
    pub fn from_name(name: &str) -> Self {
        match name {
            "catppuccin-mocha" | "catppuccin_mocha" => Self::catppuccin_mocha(),
            "dark" => Self::dark(),
            other => {
                eprintln!("c2cmd: unknown theme '{}', falling back to 'dark'", other);
                Self::dark()
            }
        }
    }

    /// Badge color for a risk level.
    pub fn risk(&self, level: RiskLevel) -> Color {
        match level {
            RiskLevel::Critical => self.risk_critical,
            RiskLevel::High => self.risk_high,
            RiskLevel::Medium => self.risk_medium,
            RiskLevel::Low => self.risk_low,
            RiskLevel::Trivial => self.risk_trivial,
            RiskLevel::Unknown => self.risk_unknown,
        }
    }

    /// Label color for an age bucket.
    pub fn age(&self, urgency: Urgency) -> Color {
        match urgency {
            Urgency::Fresh => self.age_fresh,
            Urgency::Aging => self.age_aging,
            Urgency::Stale => self.age_stale,
            Urgency::Overdue => self.age_overdue,
        }
    }

    /// Border/accent color for a toast kind.
    pub fn toast(&self, kind: ToastKind) -> Color {
        match kind {
            ToastKind::Success => self.toast_success,
            ToastKind::Error => self.toast_error,
            ToastKind::Warning => self.toast_warning,
            ToastKind::Info => self.toast_info,
        }
    }
}
