//! Game canvas view
//!
//! Draws the robot, its heading and the target on a braille canvas, and maps
//! mouse clicks back to world coordinates.

use ratatui::prelude::*;
use ratatui::symbols::Marker;
use ratatui::widgets::canvas::{Canvas, Circle, Line as CanvasLine};
use ratatui::widgets::{Block, Borders};

use crate::model::{Point, RobotsLogic};
use crate::tui::theme::theme;

/// Length of the heading marker in world units
const HEADING_LENGTH: f64 = 12.0;

/// Copy of everything the canvas needs, taken under the logic lock
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneSnapshot {
    pub robot: Point,
    pub direction: f64,
    pub target: Point,
    pub bounds: Point,
}

impl SceneSnapshot {
    pub fn capture(logic: &RobotsLogic) -> Self {
        Self {
            robot: logic.robot().position(),
            direction: logic.robot().direction(),
            target: logic.target().position(),
            bounds: logic.window_bounds(),
        }
    }
}

/// Render the game canvas, returning its inner area for click mapping
pub fn render_game(frame: &mut Frame, area: Rect, scene: &SceneSnapshot, focused: bool) -> Rect {
    let t = theme();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(t.pane_border_style(focused))
        .title("Game");
    let inner = block.inner(area);

    let scene = *scene;
    // World y grows downward, canvas y grows upward
    let flip = move |y: f64| scene.bounds.y - y;

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds([0.0, scene.bounds.x])
        .y_bounds([0.0, scene.bounds.y])
        .paint(move |ctx| {
            ctx.draw(&Circle {
                x: scene.target.x,
                y: flip(scene.target.y),
                radius: 3.0,
                color: t.target,
            });
            ctx.draw(&Circle {
                x: scene.robot.x,
                y: flip(scene.robot.y),
                radius: 6.0,
                color: t.robot,
            });
            ctx.draw(&CanvasLine {
                x1: scene.robot.x,
                y1: flip(scene.robot.y),
                x2: scene.robot.x + HEADING_LENGTH * scene.direction.cos(),
                y2: flip(scene.robot.y + HEADING_LENGTH * scene.direction.sin()),
                color: t.robot_heading,
            });
        });

    frame.render_widget(canvas, area);
    inner
}

/// Map a terminal cell inside `area` to the world point at its center
///
/// Returns `None` for cells outside the canvas.
pub fn screen_to_world(area: Rect, bounds: Point, column: u16, row: u16) -> Option<Point> {
    if area.width == 0 || area.height == 0 {
        return None;
    }
    let inside_x = column >= area.x && column < area.x + area.width;
    let inside_y = row >= area.y && row < area.y + area.height;
    if !(inside_x && inside_y) {
        return None;
    }

    let fx = (f64::from(column - area.x) + 0.5) / f64::from(area.width);
    let fy = (f64::from(row - area.y) + 0.5) / f64::from(area.height);
    Some(Point::new(fx * bounds.x, fy * bounds.y))
}
