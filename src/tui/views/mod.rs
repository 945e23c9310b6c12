//! View rendering modules
//!
//! The screen is split into the game canvas on the left and, on the right,
//! the coordinate readout above the log window. A footer lists the keys.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::{AppState, Focus};
use crate::logging::LogWindowSource;
use crate::tui::theme::theme;

mod confirm;
mod game;
mod logs;
mod robot_info;

pub use confirm::render_quit_confirm_dialog;
pub use game::{render_game, screen_to_world, SceneSnapshot};
pub use logs::render_log_window;
pub use robot_info::render_robot_info;

/// Footer height (including top border)
const FOOTER_HEIGHT: u16 = 2;

/// Height of the coordinate readout (two lines plus borders)
const INFO_HEIGHT: u16 = 4;

/// Render the whole screen
///
/// Records the game canvas area in `state` so clicks can be mapped.
pub fn render_app(
    frame: &mut Frame,
    state: &mut AppState,
    scene: &SceneSnapshot,
    source: &LogWindowSource,
) {
    let area = frame.size();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(FOOTER_HEIGHT)])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(rows[0]);

    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(INFO_HEIGHT), Constraint::Min(0)])
        .split(columns[1]);

    state.game_area = Some(render_game(
        frame,
        columns[0],
        scene,
        state.focus == Focus::Game,
    ));
    render_robot_info(frame, side[0], scene);
    // Rows inside the log window borders
    state.log_view.visible = side[1].height.saturating_sub(2) as usize;
    render_log_window(
        frame,
        side[1],
        source,
        &state.log_view,
        state.focus == Focus::Log,
    );

    render_footer(frame, rows[1], source.listener_faults());

    if state.confirming_quit {
        render_quit_confirm_dialog(frame, area);
    }
}

fn render_footer(frame: &mut Frame, area: Rect, listener_faults: u64) {
    let t = theme();
    let footer = Paragraph::new(footer_text(listener_faults))
        .style(t.muted_style())
        .block(Block::default().borders(Borders::TOP));
    frame.render_widget(footer, area);
}

fn footer_text(listener_faults: u64) -> String {
    let mut text = String::from(
        "click: set target | l: log line | c: clear log | Tab: focus | j/k g/G PgUp/PgDn: scroll | q: quit",
    );
    if listener_faults > 0 {
        text.push_str(&format!(" | listener faults: {}", listener_faults));
    }
    text
}
