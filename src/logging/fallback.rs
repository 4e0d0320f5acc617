//! Fallback diagnostic channel
//!
//! Receives failures of the logging subsystem itself (initialization errors,
//! unformattable messages). It must work when the sinks do not.

use std::sync::{Arc, Mutex, PoisonError};

/// Best-effort destination for logging-subsystem diagnostics
pub trait DiagnosticChannel: Send + Sync {
    fn report(&self, message: &str);
}

/// Writes diagnostics to stderr
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrDiagnostics;

impl DiagnosticChannel for StderrDiagnostics {
    fn report(&self, message: &str) {
        eprintln!("mint-editor: {}", message);
    }
}

/// Keeps diagnostics in memory so they can be inspected later
#[derive(Debug, Default, Clone)]
pub struct CapturedDiagnostics {
    messages: Arc<Mutex<Vec<String>>>,
}

impl CapturedDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// All messages reported so far
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl DiagnosticChannel for CapturedDiagnostics {
    fn report(&self, message: &str) {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.to_string());
    }
}
