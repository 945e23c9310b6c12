//! Robot simulation model
//!
//! A robot steers toward a target using simple dead reckoning. The model is
//! plain data plus one stepping function; the app drives it from a periodic
//! task and reads it for rendering.

mod logic;
mod robot;

pub use logic::{spawn_simulation, RobotsLogic, SharedLogic};
pub use robot::{Robot, Target};

/// A point in world coordinates (y grows downward, like screen space)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}
