//! Terminal UI module
//!
//! This module handles all terminal rendering and UI components using Ratatui.

pub mod theme;
pub mod views;

pub use theme::{theme, Theme};

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::prelude::*;
use std::io::{self, stdout};
use std::sync::Once;

use crate::logging::listener_panic_is_isolated;

static PANIC_HOOK: Once = Once::new();

/// Install a panic hook that restores the terminal before the report is printed
///
/// Listener panics that the log source catches and counts are not reported,
/// so they cannot scribble over the alternate screen.
fn install_panic_hook() {
    PANIC_HOOK.call_once(|| {
        let default_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            if !panic_is_reported() {
                return;
            }
            let _ = stdout().execute(DisableMouseCapture);
            let _ = stdout().execute(LeaveAlternateScreen);
            let _ = disable_raw_mode();
            default_hook(info);
        }));
    });
}

/// Whether a panic on this thread reaches the user
fn panic_is_reported() -> bool {
    !listener_panic_is_isolated()
}

/// Terminal UI wrapper
///
/// Handles terminal setup, teardown, and provides the rendering surface.
pub struct Tui {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    /// Whether raw mode and the alternate screen are active
    entered: bool,
    /// Whether mouse capture is enabled (needed for click targets)
    mouse_capture_enabled: bool,
}

/// Error handler for terminal cleanup operations
/// Used during both normal exit and panic/drop scenarios
enum ErrorHandler {
    /// Log errors via tracing (normal exit)
    Tracing,
    /// Print errors to stderr (drop, the log window is already gone)
    Stderr,
}

impl ErrorHandler {
    fn handle(&self, context: &str, error: impl std::fmt::Display) {
        match self {
            ErrorHandler::Tracing => tracing::warn!("{}: {}", context, error),
            ErrorHandler::Stderr => eprintln!("TUI teardown: {}: {}", context, error),
        }
    }
}

impl Tui {
    /// Create a new TUI instance
    pub fn new() -> Result<Self> {
        let backend = CrosstermBackend::new(stdout());
        let terminal = Terminal::new(backend)?;
        Ok(Self {
            terminal,
            entered: false,
            mouse_capture_enabled: false,
        })
    }

    /// Enter TUI mode (raw mode + alternate screen + mouse capture)
    pub fn enter(&mut self) -> Result<()> {
        install_panic_hook();
        enable_raw_mode()?;
        stdout().execute(EnterAlternateScreen)?;
        self.entered = true;

        if stdout().execute(EnableMouseCapture).is_ok() {
            self.mouse_capture_enabled = true;
        } else {
            tracing::warn!("Mouse capture unavailable, targets cannot be set by clicking");
        }

        self.terminal.hide_cursor()?;
        self.terminal.clear()?;
        Ok(())
    }

    /// Exit TUI mode (restore terminal)
    pub fn exit(&mut self) -> Result<()> {
        self.restore(&ErrorHandler::Tracing);
        Ok(())
    }

    fn restore(&mut self, handler: &ErrorHandler) {
        if self.mouse_capture_enabled {
            if let Err(e) = stdout().execute(DisableMouseCapture) {
                handler.handle("failed to disable mouse capture", e);
            }
            self.mouse_capture_enabled = false;
        }

        if !self.entered {
            return;
        }
        if let Err(e) = self.terminal.show_cursor() {
            handler.handle("failed to show cursor", e);
        }
        if let Err(e) = stdout().execute(LeaveAlternateScreen) {
            handler.handle("failed to leave alternate screen", e);
        }
        if let Err(e) = disable_raw_mode() {
            handler.handle("failed to disable raw mode", e);
        }
        self.entered = false;
    }

    /// Draw a frame
    pub fn draw<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&mut Frame),
    {
        self.terminal.draw(f)?;
        Ok(())
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        // Note: by now the log window is gone, so errors go to stderr
        self.restore(&ErrorHandler::Stderr);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::{ListenerFaultPolicy, LogLevel, LogWindowSource};
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_only_uncaught_panics_are_reported() {
        assert!(panic_is_reported());

        let seen = Arc::new(Mutex::new(Vec::new()));
        for policy in [ListenerFaultPolicy::Isolate, ListenerFaultPolicy::Propagate] {
            let source = LogWindowSource::with_policy(2, policy).unwrap();
            let seen = Arc::clone(&seen);
            source.register_listener(Arc::new(move || {
                seen.lock().unwrap().push(panic_is_reported());
            }));
            source.append(LogLevel::Debug, "x");
        }

        assert_eq!(*seen.lock().unwrap(), vec![false, true]);
        assert!(panic_is_reported());
    }
}
