//! Coordinate readout for the robot

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use super::game::SceneSnapshot;
use crate::tui::theme::theme;

/// Render the robot's position and heading
pub fn render_robot_info(frame: &mut Frame, area: Rect, scene: &SceneSnapshot) {
    let t = theme();
    let lines = vec![
        Line::from(Span::styled(format_robot(scene), Style::default().fg(t.text))),
        Line::from(Span::styled(format_target(scene), t.muted_style())),
    ];

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(Span::styled("Coordinates", t.header_style())),
    );
    frame.render_widget(paragraph, area);
}

fn format_robot(scene: &SceneSnapshot) -> String {
    format!(
        "x={:.2} y={:.2} dir={:.2}",
        scene.robot.x, scene.robot.y, scene.direction
    )
}

fn format_target(scene: &SceneSnapshot) -> String {
    format!("target x={:.2} y={:.2}", scene.target.x, scene.target.y)
}
