//! The editor worker loop
//!
//! Rendering, asset and scene management will live behind this loop. For now
//! each pass only waits for the next tick or a stop request.

use std::sync::Arc;
use std::time::Duration;

use crate::app::{RunSignal, Worker};
use crate::logging::{Logger, Severity};
use crate::mint_log;

/// Opaque handle to the platform instance the editor window belongs to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InstanceHandle(usize);

impl InstanceHandle {
    pub fn from_raw(raw: usize) -> Self {
        Self(raw)
    }

    /// Handle for the running process
    pub fn current() -> Self {
        Self(std::process::id() as usize)
    }

    pub fn raw(&self) -> usize {
        self.0
    }
}

/// The editor's main loop
pub struct Editor {
    logger: Arc<Logger>,
    instance: InstanceHandle,
    signal: RunSignal,
    tick: Duration,
    frames: u64,
}

impl Editor {
    pub fn new(logger: Arc<Logger>, instance: InstanceHandle, tick: Duration) -> Self {
        mint_log!(
            logger,
            Severity::Info,
            "Editor initialized (instance {:#x})",
            instance.raw()
        );
        Self {
            logger,
            instance,
            signal: RunSignal::new(),
            tick,
            frames: 0,
        }
    }

    pub fn instance(&self) -> InstanceHandle {
        self.instance
    }

    /// Number of loop passes completed so far
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Worker for Editor {
    fn run(&mut self) {
        while self.signal.is_running() {
            self.frames += 1;
            self.signal.wait_stopped(self.tick);
        }
        mint_log!(
            self.logger,
            Severity::Info,
            "Editor loop exited after {} frames",
            self.frames
        );
    }

    fn is_running(&self) -> bool {
        self.signal.is_running()
    }

    fn request_stop(&self) {
        self.signal.request_stop();
        self.logger.info("Editor shutdown");
    }

    fn stop_handle(&self) -> RunSignal {
        self.signal.clone()
    }

    fn wait_stopped(&self, interval: Duration) -> bool {
        self.signal.wait_stopped(interval)
    }
}
