//! Application lifecycle
//!
//! The [`Application`] owns exactly one [`Worker`] and enforces the ordering
//! logger initialized -> worker constructed -> worker run -> worker stopped
//! -> worker released -> logger shut down.

// Submodules
mod signal;
mod state;
mod worker;

pub use signal::RunSignal;
pub use state::AppState;
pub use worker::Worker;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::style::Stylize;

use crate::config::Config;
use crate::editor::{Editor, InstanceHandle};
use crate::logging::{Logger, Severity};
use crate::mint_log;

/// Owns the logger's session and the worker it drives
pub struct Application<W: Worker = Editor> {
    logger: Arc<Logger>,
    worker: Option<W>,
    state: AppState,
    /// False if startup failed or teardown already ran
    usable: bool,
    poll_interval: Duration,
}

impl Application<Editor> {
    /// Start the logger and construct the editor
    ///
    /// Check [`is_usable`](Self::is_usable) before calling `run`.
    pub fn new(logger: Arc<Logger>, config: &Config, instance: InstanceHandle) -> Self {
        let tick = config.editor_tick();
        Self::with_worker(logger, config.shutdown_poll_interval(), move |logger| {
            Ok(Editor::new(logger, instance, tick))
        })
    }
}

impl<W: Worker> Application<W> {
    /// Start the logger, then build the worker with `make_worker`
    ///
    /// If the logger fails to initialize the worker is never built. If the
    /// worker fails to build the logger is shut down again. Either way the
    /// application reports itself unusable.
    pub fn with_worker<F>(logger: Arc<Logger>, poll_interval: Duration, make_worker: F) -> Self
    where
        F: FnOnce(Arc<Logger>) -> Result<W>,
    {
        let mut app = Self {
            logger,
            worker: None,
            state: AppState::NotStarted,
            usable: false,
            poll_interval,
        };

        if !app.logger.initialize() {
            app.logger
                .diagnostics()
                .report("Failed to initialize logger");
            return app;
        }

        app.logger.info("Application startup");

        match make_worker(Arc::clone(&app.logger)) {
            Ok(worker) => {
                app.worker = Some(worker);
                app.usable = true;
            }
            Err(e) => {
                mint_log!(app.logger, Severity::Fatal, "Failed to initialize Editor: {:#}", e);
                app.logger.shutdown();
            }
        }

        app
    }

    pub fn is_usable(&self) -> bool {
        self.usable
    }

    pub fn state(&self) -> AppState {
        self.state
    }

    pub fn logger(&self) -> &Arc<Logger> {
        &self.logger
    }

    pub fn worker(&self) -> Option<&W> {
        self.worker.as_ref()
    }

    /// Handle for stopping the worker from another thread
    pub fn stop_handle(&self) -> Option<RunSignal> {
        self.worker.as_ref().map(Worker::stop_handle)
    }

    /// Drive the worker until it reports stopped
    ///
    /// Does nothing if the application is not usable.
    pub fn run(&mut self) {
        if !self.usable {
            self.logger
                .diagnostics()
                .report("Application not initialized");
            return;
        }

        self.state = AppState::Running;
        let logger = Arc::clone(&self.logger);
        logger.in_scope(|| {
            while let Some(worker) = self.worker.as_mut().filter(|w| w.is_running()) {
                worker.run();
            }
        });
    }

    /// Stop the worker, release it and shut the logger down
    ///
    /// Blocks until the worker reports stopped, checking once per poll
    /// interval. There is no timeout. Runs at most once; also invoked on drop.
    pub fn shutdown(&mut self) {
        if !self.usable {
            return;
        }
        self.usable = false;

        self.logger.info("Application shutdown");

        if let Some(worker) = self.worker.as_ref() {
            if worker.is_running() {
                worker.request_stop();
                while !worker.wait_stopped(self.poll_interval) {}
            }
        }

        self.worker = None;
        self.logger.shutdown();
        self.state = AppState::Stopped;
    }
}

impl<W: Worker> Drop for Application<W> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Tell the operator that startup failed
///
/// The logger may be unavailable at this point, so this goes straight to stderr.
pub fn notify_operator(message: &str) {
    eprintln!("{} {}", "Mint Editor:".red().bold(), message);
}
