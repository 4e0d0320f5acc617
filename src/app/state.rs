//! Application lifecycle state

/// Where the application is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppState {
    /// Constructed; `run` has not been called yet
    #[default]
    NotStarted,
    /// `run` has been entered
    Running,
    /// Torn down; the worker is released and the logger shut down
    Stopped,
}

