//! Application state management
//!
//! Contains the AppState struct and the log window scroll state.

use ratatui::layout::Rect;

/// Which pane receives scroll keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// The robot canvas
    #[default]
    Game,
    /// The log window
    Log,
}

impl Focus {
    /// The other pane
    pub fn toggle(self) -> Self {
        match self {
            Focus::Game => Focus::Log,
            Focus::Log => Focus::Game,
        }
    }
}

/// Scroll position of the log window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogViewState {
    /// Index of the first visible entry, relative to the oldest retained one
    pub scroll: usize,
    /// Keep the newest entries in view
    pub auto_scroll: bool,
    /// Rows the log window showed at the last render
    pub visible: usize,
}

impl Default for LogViewState {
    fn default() -> Self {
        Self {
            scroll: 0,
            auto_scroll: true,
            visible: 0,
        }
    }
}

impl LogViewState {
    /// Largest first-entry index that still fills the window
    fn max_scroll(&self, entry_count: usize) -> usize {
        entry_count.saturating_sub(self.visible.max(1))
    }

    /// First entry to show for `entry_count` entries
    pub fn effective_scroll(&self, entry_count: usize) -> usize {
        if self.auto_scroll {
            self.max_scroll(entry_count)
        } else {
            self.scroll.min(self.max_scroll(entry_count))
        }
    }

    /// Scroll by `delta` entries (negative is up) from what is on screen, leaving auto-scroll
    pub fn scroll_by(&mut self, delta: isize, entry_count: usize) {
        let current = self.effective_scroll(entry_count);
        self.auto_scroll = false;
        self.scroll = if delta.is_negative() {
            current.saturating_sub(delta.unsigned_abs())
        } else {
            (current + delta.unsigned_abs()).min(self.max_scroll(entry_count))
        };
    }

    /// Jump to the oldest entry, leaving auto-scroll
    pub fn jump_to_top(&mut self) {
        self.auto_scroll = false;
        self.scroll = 0;
    }

    /// Jump to the newest entry and follow new ones
    pub fn jump_to_bottom(&mut self, entry_count: usize) {
        self.auto_scroll = true;
        self.scroll = self.max_scroll(entry_count);
    }
}

/// Main application state
#[derive(Debug, Default)]
pub struct AppState {
    /// Pane that receives scroll keys
    pub focus: Focus,
    /// Log window scroll state
    pub log_view: LogViewState,
    /// Inner area of the game canvas from the last render, for mouse mapping
    pub game_area: Option<Rect>,
    /// Quit confirmation dialog is open
    pub confirming_quit: bool,
    /// Set when the event loop should stop
    pub should_quit: bool,
    /// Redraw on the next loop iteration
    pub needs_render: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_toggle() {
        assert_eq!(Focus::Game.toggle(), Focus::Log);
        assert_eq!(Focus::Log.toggle(), Focus::Game);
    }

    fn view(visible: usize) -> LogViewState {
        LogViewState {
            visible,
            ..LogViewState::default()
        }
    }

    #[test]
    fn test_auto_scroll_shows_newest() {
        let view = view(10);
        assert_eq!(view.effective_scroll(50), 40);
        assert_eq!(view.effective_scroll(5), 0);
    }

    #[test]
    fn test_manual_scroll_is_clamped_to_last_page() {
        let mut view = view(10);
        view.jump_to_top();
        view.scroll_by(100, 30);
        assert!(!view.auto_scroll);
        assert_eq!(view.scroll, 20);
        assert_eq!(view.effective_scroll(30), 20);

        view.scroll_by(-15, 30);
        assert_eq!(view.scroll, 5);
        view.scroll_by(-25, 30);
        assert_eq!(view.scroll, 0);
    }

    #[test]
    fn test_scroll_up_after_overshoot_moves_immediately() {
        let mut view = view(10);
        view.jump_to_top();
        for _ in 0..50 {
            view.scroll_by(1, 30);
        }
        let bottom = view.effective_scroll(30);

        view.scroll_by(-1, 30);
        assert_eq!(view.effective_scroll(30), bottom - 1);
    }

    #[test]
    fn test_leaving_auto_scroll_starts_from_screen() {
        let mut view = view(10);
        view.scroll_by(-1, 30);
        assert!(!view.auto_scroll);
        assert_eq!(view.scroll, 19);
    }

    #[test]
    fn test_jump_to_bottom_restores_auto_scroll() {
        let mut view = view(5);
        view.jump_to_top();
        assert!(!view.auto_scroll);
        view.jump_to_bottom(12);
        assert!(view.auto_scroll);
        assert_eq!(view.scroll, 7);
    }
}
