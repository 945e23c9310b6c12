//! Steering logic
//!
//! Each step either drives the robot straight (when its heading is close
//! enough to the bearing of the target) or moves it along an arc with a fixed
//! angular velocity. Movement slows near the window edges.

use std::f64::consts::TAU;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::robot::{Robot, Target};
use super::Point;
use crate::logging::Logger;

/// Turn rate magnitude in radians per time unit
pub const ANGULAR_VELOCITY: f64 = 0.001;

/// Distance at which the target counts as reached
pub const TARGET_CLOSE_ENOUGH: f64 = 5.0;

/// Heading error below which the robot drives straight
const EPSILON: f64 = 0.05;

/// Time units advanced per step
pub const TIME_STEP: f64 = 5.0;

/// Target a new simulation starts heading for
pub const INITIAL_TARGET: Point = Point::new(50.0, 50.0);

/// Logic shared between the simulation task and the UI
pub type SharedLogic = Arc<Mutex<RobotsLogic>>;

/// Robot, target and the rules that move one toward the other
pub struct RobotsLogic {
    robot: Robot,
    target: Target,
    window_bounds: Point,
    reached: bool,
    logger: Logger,
}

impl RobotsLogic {
    /// Start heading for [`INITIAL_TARGET`], one step already taken
    pub fn new(logger: Logger, window_bounds: Point) -> Self {
        let mut logic = Self {
            robot: Robot::default(),
            target: Target::new(INITIAL_TARGET.x, INITIAL_TARGET.y),
            window_bounds,
            reached: false,
            logger,
        };
        logic.steer_toward_target();
        logic.move_robot();
        logic
    }

    pub fn robot(&self) -> &Robot {
        &self.robot
    }

    pub fn target(&self) -> Target {
        self.target
    }

    pub fn window_bounds(&self) -> Point {
        self.window_bounds
    }

    /// Whether the robot is within reach of the current target
    pub fn is_target_reached(&self) -> bool {
        self.robot.position().distance(&self.target.position()) < TARGET_CLOSE_ENOUGH
    }

    pub fn set_window_bounds(&mut self, window_bounds: Point) {
        self.window_bounds = window_bounds;
    }

    /// Point the robot at a new target
    pub fn set_target(&mut self, target: Target) {
        self.target = target;
        self.reached = false;
        self.steer_toward_target();
        let position = target.position();
        self.logger
            .debug(format!("Target set to ({:.1}, {:.1})", position.x, position.y));
    }

    fn steer_toward_target(&mut self) {
        let bearing = angle_to(self.robot.position(), self.target.position());
        let angular_velocity = if bearing > self.robot.direction() {
            -ANGULAR_VELOCITY
        } else {
            ANGULAR_VELOCITY
        };
        self.robot.set_angular_velocity(angular_velocity);
    }

    /// Advance the simulation by one step, returning whether the robot moved
    pub fn move_robot(&mut self) -> bool {
        if self.is_target_reached() {
            if !self.reached {
                self.reached = true;
                let position = self.robot.position();
                self.logger.debug(format!(
                    "Robot reached target at ({:.1}, {:.1})",
                    position.x, position.y
                ));
            }
            return false;
        }

        let bearing = angle_to(self.robot.position(), self.target.position());
        let direction = self.robot.direction();
        let angular_velocity = self.robot.angular_velocity();
        let speed = self.robot.speed();

        if angular_velocity.abs() < ANGULAR_VELOCITY || (direction - bearing).abs() < EPSILON {
            self.robot.move_by(
                speed * direction.cos() * TIME_STEP,
                speed * direction.sin() * TIME_STEP,
            );
            return true;
        }

        let new_direction = as_normalized_radians(direction + angular_velocity * TIME_STEP);
        let dx = speed / angular_velocity * (new_direction.sin() - direction.sin());
        let dy = speed / angular_velocity * (new_direction.cos() - direction.cos());

        let position = self.robot.position();
        self.robot.move_by(
            dx * speed_factor(position.x, self.window_bounds.x),
            -dy * speed_factor(position.y, self.window_bounds.y),
        );
        self.robot.set_direction(new_direction);
        true
    }
}

/// Bearing from `from` to `to`, normalized to [0, 2π)
fn angle_to(from: Point, to: Point) -> f64 {
    as_normalized_radians((to.y - from.y).atan2(to.x - from.x))
}

fn as_normalized_radians(angle: f64) -> f64 {
    angle.rem_euclid(TAU)
}

/// 1.0 in the middle of the bounds, falling linearly to 0.01 at the edges
fn speed_factor(t: f64, upper_bound: f64) -> f64 {
    (1.0 - 2.0 * ((upper_bound - t) / upper_bound - 0.5).abs()).max(0.01)
}

/// Step `logic` every `tick` until the task is aborted
///
/// `moved` is raised whenever a step changes the robot's position.
pub fn spawn_simulation(logic: SharedLogic, tick: Duration, moved: Arc<AtomicBool>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(tick);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            interval.tick().await;
            let stepped = logic
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .move_robot();
            if stepped {
                moved.store(true, Ordering::Release);
            }
        }
    })
}
