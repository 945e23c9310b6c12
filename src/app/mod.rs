//! Application shell and main event loop
//!
//! Ties together the simulation task, the shared log and the terminal UI.

mod state;

pub use state::{AppState, Focus, LogViewState};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use anyhow::Result;
use crossterm::event::{self, Event};

use crate::config::Config;
use crate::input::{handle_key_event, handle_mouse_event};
use crate::logging::{LogWindowSource, Logger};
use crate::model::{spawn_simulation, RobotsLogic, SharedLogic};
use crate::tui::views::{render_app, SceneSnapshot};
use crate::tui::Tui;

/// Everything input handlers act on besides the UI state
#[derive(Clone)]
pub struct AppContext {
    /// Robot model shared with the simulation task
    pub logic: SharedLogic,
    /// Logger bound to the log window's source
    pub logger: Logger,
}

impl AppContext {
    pub fn new(config: &Config, logger: Logger) -> Self {
        let logic = RobotsLogic::new(logger.clone(), config.world_bounds());
        Self {
            logic: Arc::new(Mutex::new(logic)),
            logger,
        }
    }

    /// Lock the robot model, recovering it if a holder panicked
    pub fn lock_logic(&self) -> MutexGuard<'_, RobotsLogic> {
        self.logic.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Source the log window reads from
    pub fn log_source(&self) -> &Arc<LogWindowSource> {
        self.logger.default_source()
    }

    pub fn scene(&self) -> SceneSnapshot {
        SceneSnapshot::capture(&self.lock_logic())
    }
}

/// Main application struct
pub struct App {
    /// Application configuration
    config: Config,
    /// Application state
    pub(crate) state: AppState,
    /// Model and logger
    pub(crate) ctx: AppContext,
    /// Terminal UI
    tui: Tui,
    /// Set by the log listener, cleared when the loop picks it up
    log_dirty: Arc<AtomicBool>,
    /// Set by the simulation task after the robot moves
    robot_moved: Arc<AtomicBool>,
}

impl App {
    /// Create a new application instance
    pub fn new(config: Config, logger: Logger) -> Result<Self> {
        let ctx = AppContext::new(&config, logger);
        let tui = Tui::new()?;

        Ok(Self {
            config,
            state: AppState::default(),
            ctx,
            tui,
            log_dirty: Arc::new(AtomicBool::new(false)),
            robot_moved: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Run the main application loop
    pub async fn run(&mut self) -> Result<()> {
        self.tui.enter()?;

        let dirty = Arc::clone(&self.log_dirty);
        let listener_id = self
            .ctx
            .log_source()
            .register_listener(Arc::new(move || dirty.store(true, Ordering::Release)));

        let simulation = spawn_simulation(
            Arc::clone(&self.ctx.logic),
            self.config.tick_interval(),
            Arc::clone(&self.robot_moved),
        );

        tracing::info!("Robots started. Click the canvas to set a target, 'q' to quit.");
        self.ctx.logger.debug("Log window is working");

        // crossterm polling blocks, keep it off the async workers
        let result = tokio::task::block_in_place(|| self.event_loop());

        simulation.abort();
        self.ctx.log_source().unregister_listener(listener_id);

        // Exit TUI mode (also done in Drop)
        self.tui.exit()?;

        result
    }

    /// Main event loop
    fn event_loop(&mut self) -> Result<()> {
        let frame_interval = self.config.frame_interval();

        // Always render on first frame
        self.state.needs_render = true;

        loop {
            if self.log_dirty.swap(false, Ordering::AcqRel) {
                self.state.needs_render = true;
            }
            if self.robot_moved.swap(false, Ordering::AcqRel) {
                self.state.needs_render = true;
            }

            // Only render when something has changed
            if self.state.needs_render {
                self.render()?;
                self.state.needs_render = false;
            }

            if event::poll(frame_interval)? {
                match event::read()? {
                    Event::Key(key) => {
                        handle_key_event(&mut self.state, &self.ctx, key)?;
                        self.state.needs_render = true;
                    }
                    Event::Mouse(mouse) => {
                        if handle_mouse_event(&mut self.state, &self.ctx, mouse)? {
                            self.state.needs_render = true;
                        }
                    }
                    Event::Resize(_, _) => {
                        self.state.needs_render = true;
                    }
                    _ => {}
                }
            }

            if self.state.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn render(&mut self) -> Result<()> {
        // Copy the scene first so the logic lock is not held while drawing
        let scene = self.ctx.scene();
        let source = Arc::clone(self.ctx.log_source());
        let state = &mut self.state;
        self.tui
            .draw(|frame| render_app(frame, state, &scene, &source))
    }
}
