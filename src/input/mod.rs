//! Input handling module
//!
//! Routes keyboard and mouse events to the game canvas, the log window and
//! the quit dialog.

pub mod dispatcher;
pub mod log_window;

// Re-export commonly used items
pub use dispatcher::{handle_key_event, handle_mouse_event};
