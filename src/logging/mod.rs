//! Logging system for Mint Editor
//!
//! Provides the session logger with dual console/file sinks, rotation of the
//! previous session's log into a backup directory, and backup retention.

mod destination;
mod error;
mod fallback;
mod format;
mod logger;
mod retention;
mod severity;
mod sinks;
mod template;

pub use destination::{
    backup_file_name, resolve_data_root, select_data_root, LogDestination, RotationOutcome,
    BACKUP_DIR_NAME, LOGS_DIR_NAME, LOG_FILE_NAME,
};
pub use error::LogError;
pub use fallback::{CapturedDiagnostics, DiagnosticChannel, StderrDiagnostics};
pub use format::{render_line, LineFormat, SeverityFilter};
pub use logger::{Logger, LoggerOptions, LoggerState, LOG_TARGET};
pub use retention::cleanup_old_backups;
pub use severity::{ParseSeverityError, Severity};
pub use sinks::{ConsoleTarget, DestinationHandles, LogSinkManager, SinkHandle};
pub use template::{render as render_template, TemplateError};

/// Log through a [`Logger`] with `format!`-style arguments
///
/// ```ignore
/// mint_log!(logger, Severity::Info, "opened {} in {}ms", path.display(), elapsed);
/// ```
#[macro_export]
macro_rules! mint_log {
    ($logger:expr, $severity:expr, $($arg:tt)+) => {
        $logger.log_fmt($severity, format_args!($($arg)+))
    };
}
