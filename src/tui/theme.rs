//! Theme module for centralized color and style definitions
//!
//! Semantic colors used by the game canvas, the log window and the dialogs.

use ratatui::style::{Color, Modifier, Style};

use crate::logging::LogLevel;

/// Application theme with all color definitions
#[derive(Debug, Clone)]
pub struct Theme {
    // === Scene ===
    /// Robot body
    pub robot: Color,
    /// Robot heading marker
    pub robot_heading: Color,
    /// Click target
    pub target: Color,

    // === Log Levels ===
    pub level_trace: Color,
    pub level_debug: Color,
    pub level_info: Color,
    pub level_warn: Color,
    pub level_error: Color,

    // === UI Elements ===
    /// Primary accent color (titles, log targets)
    pub accent: Color,
    /// Text color for normal content
    pub text: Color,
    /// Text color for muted/secondary content
    pub text_muted: Color,

    // === Borders ===
    /// Normal border color
    pub border: Color,
    /// Focused pane border color
    pub border_focused: Color,
    /// Warning border color
    pub border_warning: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Dark theme (default)
    pub fn dark() -> Self {
        Self {
            robot: Color::Magenta,
            robot_heading: Color::White,
            target: Color::Green,

            level_trace: Color::DarkGray,
            level_debug: Color::Gray,
            level_info: Color::Blue,
            level_warn: Color::Yellow,
            level_error: Color::Red,

            accent: Color::Cyan,
            text: Color::White,
            text_muted: Color::DarkGray,

            border: Color::White,
            border_focused: Color::Cyan,
            border_warning: Color::Yellow,
        }
    }

    /// Get the color for a log level
    pub fn level_color(&self, level: LogLevel) -> Color {
        match level {
            LogLevel::Trace => self.level_trace,
            LogLevel::Debug => self.level_debug,
            LogLevel::Info => self.level_info,
            LogLevel::Warn => self.level_warn,
            LogLevel::Error => self.level_error,
        }
    }

    /// Border style for a pane, highlighted when it has focus
    pub fn pane_border_style(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.border_focused)
        } else {
            Style::default().fg(self.border)
        }
    }

    /// Style for headers/titles
    pub fn header_style(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    /// Style for muted text
    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.text_muted)
    }
}

/// Global theme instance
static THEME: std::sync::OnceLock<Theme> = std::sync::OnceLock::new();

/// Get the current theme
pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::default)
}
