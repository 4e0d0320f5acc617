//! Errors raised while preparing or tearing down the logging subsystem

use std::io;

/// Failure of a logging lifecycle operation
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    /// Neither the user-data directory nor the home directory is available
    #[error("no user data directory could be resolved from the environment")]
    EnvironmentUnavailable,

    /// Directory or file I/O failed while preparing the log destination
    #[error("{context}: {source}")]
    SinkCreationFailed {
        context: String,
        #[source]
        source: io::Error,
    },

    /// The logger has not been initialized
    #[error("logger is not initialized")]
    NotInitialized,

    /// The logger was already shut down for this process
    #[error("logger has already been shut down")]
    AlreadyShutDown,
}

impl LogError {
    /// Build a closure that wraps an I/O error with context, for use with `map_err`
    pub(crate) fn sink(context: impl Into<String>) -> impl FnOnce(io::Error) -> LogError {
        let context = context.into();
        move |source| LogError::SinkCreationFailed { context, source }
    }
}
