//! Robots - a robot chasing click targets, with a live in-memory log window
//!
//! This library provides the core functionality for the Robots application:
//! the shared log, the robot model and the terminal front-end.

pub mod app;
pub mod config;
pub mod input;
pub mod logging;
pub mod model;
pub mod tui;
