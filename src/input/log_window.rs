//! Log window input handler
//!
//! Scrolling keys for the log window while it has focus.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::app::LogViewState;

/// Entries moved by PageUp/PageDown
const PAGE_SIZE: isize = 20;

/// Handle a key while the log window has focus
pub fn handle_log_window_key(view: &mut LogViewState, entry_count: usize, key: KeyEvent) -> Result<()> {
    // Only process key press events (not release/repeat)
    if key.kind != KeyEventKind::Press {
        return Ok(());
    }

    match key.code {
        KeyCode::Down | KeyCode::Char('j') => view.scroll_by(1, entry_count),
        KeyCode::Up | KeyCode::Char('k') => view.scroll_by(-1, entry_count),
        KeyCode::Char('g') | KeyCode::Home => view.jump_to_top(),
        KeyCode::Char('G') | KeyCode::End => view.jump_to_bottom(entry_count),
        KeyCode::PageDown => view.scroll_by(PAGE_SIZE, entry_count),
        KeyCode::PageUp => view.scroll_by(-PAGE_SIZE, entry_count),
        _ => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn view(visible: usize) -> LogViewState {
        LogViewState {
            visible,
            ..LogViewState::default()
        }
    }

    #[test]
    fn test_scroll_keys_leave_auto_scroll() {
        let mut view = view(10);
        handle_log_window_key(&mut view, 50, press(KeyCode::Char('k'))).unwrap();
        assert!(!view.auto_scroll);
        assert_eq!(view.scroll, 39);

        handle_log_window_key(&mut view, 50, press(KeyCode::PageUp)).unwrap();
        assert_eq!(view.scroll, 19);

        handle_log_window_key(&mut view, 50, press(KeyCode::Char('j'))).unwrap();
        assert_eq!(view.scroll, 20);

        handle_log_window_key(&mut view, 50, press(KeyCode::PageDown)).unwrap();
        assert_eq!(view.scroll, 40);
        handle_log_window_key(&mut view, 50, press(KeyCode::PageDown)).unwrap();
        assert_eq!(view.scroll, 40);
    }

    #[test]
    fn test_jump_keys() {
        let mut view = view(10);
        handle_log_window_key(&mut view, 30, press(KeyCode::Char('g'))).unwrap();
        assert!(!view.auto_scroll);
        assert_eq!(view.scroll, 0);

        handle_log_window_key(&mut view, 30, press(KeyCode::Char('G'))).unwrap();
        assert!(view.auto_scroll);
        assert_eq!(view.scroll, 20);
    }

    #[test]
    fn test_release_events_are_ignored() {
        let mut view = LogViewState::default();
        let mut key = press(KeyCode::Char('j'));
        key.kind = KeyEventKind::Release;
        handle_log_window_key(&mut view, 50, key).unwrap();
        assert_eq!(view, LogViewState::default());
    }
}
