//! Robot and target state

use super::Point;

/// Linear speed in world units per time unit
pub const ROBOT_SPEED: f64 = 0.1;

/// Where a new robot starts
pub const ROBOT_START: Point = Point::new(100.0, 100.0);

/// The steerable robot
#[derive(Debug, Clone, PartialEq)]
pub struct Robot {
    position: Point,
    /// Heading in radians, normalized to [0, 2π)
    direction: f64,
    angular_velocity: f64,
    speed: f64,
}

impl Default for Robot {
    fn default() -> Self {
        Self {
            position: ROBOT_START,
            direction: 0.0,
            angular_velocity: 0.0,
            speed: ROBOT_SPEED,
        }
    }
}

impl Robot {
    /// Shift the robot by a displacement
    pub fn move_by(&mut self, dx: f64, dy: f64) {
        self.position.x += dx;
        self.position.y += dy;
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn direction(&self) -> f64 {
        self.direction
    }

    pub fn set_direction(&mut self, direction: f64) {
        self.direction = direction;
    }

    pub fn angular_velocity(&self) -> f64 {
        self.angular_velocity
    }

    pub fn set_angular_velocity(&mut self, angular_velocity: f64) {
        self.angular_velocity = angular_velocity;
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }
}

/// The point the robot is steering toward
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Target {
    position: Point,
}

impl Target {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            position: Point::new(x, y),
        }
    }

    pub fn position(&self) -> Point {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_robot_defaults() {
        let robot = Robot::default();
        assert_eq!(robot.position(), ROBOT_START);
        assert_eq!(robot.direction(), 0.0);
        assert_eq!(robot.speed(), ROBOT_SPEED);
    }

    #[test]
    fn test_robot_move_by() {
        let mut robot = Robot::default();
        robot.move_by(1.5, -2.0);
        assert_eq!(robot.position(), Point::new(101.5, 98.0));
    }
}
