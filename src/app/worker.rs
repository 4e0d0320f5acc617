//! The unit of work driven by the [`Application`](super::Application)

use std::thread;
use std::time::Duration;

use super::signal::RunSignal;

/// A long-running loop that stops cooperatively
///
/// The worker starts out running. `request_stop` only asks; the worker itself
/// decides when it has stopped and reports that through `is_running`.
pub trait Worker {
    /// Do work until a stop is observed or there is nothing left to do
    fn run(&mut self);

    fn is_running(&self) -> bool;

    /// Ask the worker to stop; safe to call from any thread that can reach it
    fn request_stop(&self);

    /// Handle another thread can use to request a stop while `run` blocks
    fn stop_handle(&self) -> RunSignal;

    /// Wait at most `interval` for the worker to stop
    ///
    /// Returns true once stopped. The default sleeps for the whole interval
    /// and then checks.
    fn wait_stopped(&self, interval: Duration) -> bool {
        if self.is_running() {
            thread::sleep(interval);
        }
        !self.is_running()
    }
}
