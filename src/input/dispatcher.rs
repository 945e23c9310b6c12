//! Main input dispatch logic
//!
//! Routes keyboard and mouse events based on the open dialog and the focused
//! pane.

use anyhow::Result;
use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::app::{AppContext, AppState, Focus, LogViewState};
use crate::model::Target;
use crate::tui::views::screen_to_world;

use super::log_window::handle_log_window_key;

/// Lines moved per mouse wheel notch over the log window
const WHEEL_STEP: isize = 3;

/// Handle a key event by routing it to the dialog, a global binding or the focused pane
pub fn handle_key_event(state: &mut AppState, ctx: &AppContext, key: KeyEvent) -> Result<()> {
    // Only process key press events (not release/repeat)
    if key.kind != KeyEventKind::Press {
        return Ok(());
    }

    if state.confirming_quit {
        return handle_confirming_quit_key(state, key);
    }

    // Ctrl+C quits without asking
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return Ok(());
    }

    match key.code {
        KeyCode::Char('q') => state.confirming_quit = true,
        KeyCode::Tab => state.focus = state.focus.toggle(),
        KeyCode::Char('l') => ctx.logger.debug("New log line"),
        KeyCode::Char('c') => {
            ctx.log_source().clear();
            state.log_view = LogViewState {
                visible: state.log_view.visible,
                ..LogViewState::default()
            };
        }
        _ if state.focus == Focus::Log => {
            let entry_count = ctx.log_source().size();
            handle_log_window_key(&mut state.log_view, entry_count, key)?;
        }
        _ => {}
    }
    Ok(())
}

/// Handle key when confirming quit
pub fn handle_confirming_quit_key(state: &mut AppState, key: KeyEvent) -> Result<()> {
    if key.kind != KeyEventKind::Press {
        return Ok(());
    }
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
            // Confirm quit
            state.should_quit = true;
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            // Cancel quit
            state.confirming_quit = false;
        }
        _ => {}
    }
    Ok(())
}

/// Handle a mouse event, returning whether anything changed
pub fn handle_mouse_event(state: &mut AppState, ctx: &AppContext, mouse: MouseEvent) -> Result<bool> {
    if state.confirming_quit {
        return Ok(false);
    }

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let Some(area) = state.game_area else {
                return Ok(false);
            };
            let mut logic = ctx.lock_logic();
            let Some(point) = screen_to_world(area, logic.window_bounds(), mouse.column, mouse.row)
            else {
                return Ok(false);
            };
            logic.set_target(Target::new(point.x, point.y));
            state.focus = Focus::Game;
            Ok(true)
        }
        MouseEventKind::ScrollUp => {
            let entry_count = ctx.log_source().size();
            state.log_view.scroll_by(-WHEEL_STEP, entry_count);
            Ok(true)
        }
        MouseEventKind::ScrollDown => {
            let entry_count = ctx.log_source().size();
            state.log_view.scroll_by(WHEEL_STEP, entry_count);
            Ok(true)
        }
        _ => Ok(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::logging::Logger;
    use ratatui::layout::Rect;

    fn context() -> AppContext {
        AppContext::new(&Config::default(), Logger::with_capacity(100).unwrap())
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_quit_requires_confirmation() {
        let ctx = context();
        let mut state = AppState::default();

        handle_key_event(&mut state, &ctx, press(KeyCode::Char('q'))).unwrap();
        assert!(state.confirming_quit);
        assert!(!state.should_quit);

        handle_key_event(&mut state, &ctx, press(KeyCode::Esc)).unwrap();
        assert!(!state.confirming_quit);
        assert!(!state.should_quit);

        handle_key_event(&mut state, &ctx, press(KeyCode::Char('q'))).unwrap();
        handle_key_event(&mut state, &ctx, press(KeyCode::Char('y'))).unwrap();
        assert!(state.should_quit);
    }

    #[test]
    fn test_dialog_swallows_other_keys() {
        let ctx = context();
        let mut state = AppState {
            confirming_quit: true,
            ..AppState::default()
        };

        handle_key_event(&mut state, &ctx, press(KeyCode::Char('l'))).unwrap();
        assert_eq!(ctx.log_source().size(), 0);
        assert!(state.confirming_quit);
    }

    #[test]
    fn test_log_and_clear_keys() {
        let ctx = context();
        let mut state = AppState::default();

        handle_key_event(&mut state, &ctx, press(KeyCode::Char('l'))).unwrap();
        handle_key_event(&mut state, &ctx, press(KeyCode::Char('l'))).unwrap();
        assert_eq!(ctx.log_source().size(), 2);
        assert_eq!(ctx.log_source().all()[0].message(), "New log line");

        state.log_view.jump_to_top();
        handle_key_event(&mut state, &ctx, press(KeyCode::Char('c'))).unwrap();
        assert_eq!(ctx.log_source().size(), 0);
        assert!(state.log_view.auto_scroll);
    }

    #[test]
    fn test_scroll_keys_only_apply_to_focused_log() {
        let ctx = context();
        for _ in 0..10 {
            ctx.logger.info("line");
        }
        let mut state = AppState::default();
        state.log_view.visible = 4;

        handle_key_event(&mut state, &ctx, press(KeyCode::Char('k'))).unwrap();
        assert!(state.log_view.auto_scroll);

        handle_key_event(&mut state, &ctx, press(KeyCode::Tab)).unwrap();
        assert_eq!(state.focus, Focus::Log);
        handle_key_event(&mut state, &ctx, press(KeyCode::Char('k'))).unwrap();
        assert!(!state.log_view.auto_scroll);
        assert_eq!(state.log_view.scroll, 5);
    }

    #[test]
    fn test_click_sets_target() {
        let ctx = context();
        let mut state = AppState {
            game_area: Some(Rect::new(0, 0, 40, 30)),
            focus: Focus::Log,
            ..AppState::default()
        };

        assert!(handle_mouse_event(&mut state, &ctx, click(20, 15)).unwrap());
        let target = ctx.lock_logic().target().position();
        assert!((target.x - 205.0).abs() < 1e-9);
        assert!((target.y - 155.0).abs() < 1e-9);
        assert_eq!(state.focus, Focus::Game);
        assert_eq!(ctx.log_source().size(), 1);
    }

    #[test]
    fn test_click_outside_canvas_is_ignored() {
        let ctx = context();
        let before = ctx.lock_logic().target();
        let mut state = AppState {
            game_area: Some(Rect::new(0, 0, 40, 30)),
            ..AppState::default()
        };

        assert!(!handle_mouse_event(&mut state, &ctx, click(45, 5)).unwrap());
        assert_eq!(ctx.lock_logic().target(), before);

        state.game_area = None;
        assert!(!handle_mouse_event(&mut state, &ctx, click(5, 5)).unwrap());
        assert_eq!(ctx.log_source().size(), 0);
    }
}
