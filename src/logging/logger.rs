//! Process-scoped logger
//!
//! The [`Logger`] is created once by the entry point and shared by reference
//! with the application and its worker. It moves through
//! Uninitialized -> Initialized -> ShutDown. Log calls outside the
//! Initialized window are accepted and ignored; logging never fails the
//! caller.

use std::fmt::{self, Display};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::Dispatch;
use tracing_subscriber::layer::SubscriberExt;

use super::error::LogError;
use super::fallback::{DiagnosticChannel, StderrDiagnostics};
use super::format::{LineFormat, SeverityFilter};
use super::retention::cleanup_old_backups;
use super::severity::Severity;
use super::sinks::{ConsoleTarget, DestinationHandles, LogSinkManager};
use super::template;
use crate::config::{Config, DEFAULT_SOURCE_NAME, PRODUCT_NAME};

/// Target attached to every event the logger emits
pub const LOG_TARGET: &str = "mint_editor";

/// Settings fixed at logger construction
#[derive(Clone)]
pub struct LoggerOptions {
    /// Namespaces the user-data directory
    pub product_name: String,
    /// The `<SourceName>` printed on every line
    pub source_name: String,
    /// Records below this severity are suppressed
    pub threshold: Severity,
    /// Overrides the data root resolved from the environment
    pub data_root: Option<PathBuf>,
    pub console: ConsoleTarget,
    pub colored_console: bool,
    /// 0 keeps every backup
    pub backup_retention_days: u64,
    pub diagnostics: Arc<dyn DiagnosticChannel>,
}

impl Default for LoggerOptions {
    fn default() -> Self {
        Self {
            product_name: PRODUCT_NAME.to_string(),
            source_name: DEFAULT_SOURCE_NAME.to_string(),
            threshold: Severity::default_threshold(),
            data_root: None,
            console: ConsoleTarget::Stdout,
            colored_console: true,
            backup_retention_days: 0,
            diagnostics: Arc::new(StderrDiagnostics),
        }
    }
}

impl LoggerOptions {
    /// Options described by the application configuration
    pub fn from_config(config: &Config) -> Self {
        Self {
            source_name: config.log_source_name.clone(),
            threshold: config.threshold(),
            data_root: config.data_dir.clone(),
            colored_console: config.colored_console,
            backup_retention_days: config.backup_retention_days,
            ..Self::default()
        }
    }

    pub fn with_data_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.data_root = Some(root.into());
        self
    }

    pub fn with_threshold(mut self, threshold: Severity) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_console(mut self, console: ConsoleTarget) -> Self {
        self.console = console;
        self
    }

    pub fn with_source_name(mut self, source_name: impl Into<String>) -> Self {
        self.source_name = source_name.into();
        self
    }

    pub fn with_backup_retention_days(mut self, days: u64) -> Self {
        self.backup_retention_days = days;
        self
    }

    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn DiagnosticChannel>) -> Self {
        self.diagnostics = diagnostics;
        self
    }
}

/// Observable lifecycle state of a [`Logger`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoggerState {
    Uninitialized,
    Initialized,
    ShutDown,
}

enum Lifecycle {
    Uninitialized,
    Initialized(ActiveLogger),
    ShutDown,
}

/// Sinks and the dispatcher that writes to them
struct ActiveLogger {
    threshold: Severity,
    dispatch: Dispatch,
    handles: DestinationHandles,
}

impl ActiveLogger {
    fn new(handles: DestinationHandles, options: &LoggerOptions) -> Self {
        let console_layer = tracing_subscriber::fmt::layer()
            .event_format(LineFormat::new(options.source_name.clone()))
            .with_writer(handles.console.clone())
            .with_ansi(handles.console.ansi());

        let file_layer = tracing_subscriber::fmt::layer()
            .event_format(LineFormat::new(options.source_name.clone()))
            .with_writer(handles.file.clone())
            .with_ansi(false);

        let subscriber = tracing_subscriber::registry()
            .with(options.threshold.level_filter())
            .with(SeverityFilter::new(options.threshold))
            .with(console_layer)
            .with(file_layer);

        Self {
            threshold: options.threshold,
            dispatch: Dispatch::new(subscriber),
            handles,
        }
    }

    fn emit(&self, severity: Severity, message: &str) {
        if severity < self.threshold {
            return;
        }

        let name = severity.as_str();
        tracing::dispatcher::with_default(&self.dispatch, || match severity {
            Severity::Trace => {
                tracing::trace!(target: LOG_TARGET, severity = name, "{}", message)
            }
            Severity::Info => tracing::info!(target: LOG_TARGET, severity = name, "{}", message),
            Severity::Warning => {
                tracing::warn!(target: LOG_TARGET, severity = name, "{}", message)
            }
            Severity::Error | Severity::Fatal => {
                tracing::error!(target: LOG_TARGET, severity = name, "{}", message)
            }
        });
    }
}

/// Leveled logger writing to a console sink and a session log file
pub struct Logger {
    options: LoggerOptions,
    lifecycle: Mutex<Lifecycle>,
}

impl Logger {
    /// Create an uninitialized logger
    pub fn new(options: LoggerOptions) -> Self {
        Self {
            options,
            lifecycle: Mutex::new(Lifecycle::Uninitialized),
        }
    }

    pub fn state(&self) -> LoggerState {
        match &*self.lock() {
            Lifecycle::Uninitialized => LoggerState::Uninitialized,
            Lifecycle::Initialized(_) => LoggerState::Initialized,
            Lifecycle::ShutDown => LoggerState::ShutDown,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.state() == LoggerState::Initialized
    }

    /// Channel that receives failures of the logger itself
    pub fn diagnostics(&self) -> &dyn DiagnosticChannel {
        self.options.diagnostics.as_ref()
    }

    /// Path of the active session log, while initialized
    pub fn log_file(&self) -> Option<PathBuf> {
        match &*self.lock() {
            Lifecycle::Initialized(active) => Some(active.handles.log_file().to_path_buf()),
            _ => None,
        }
    }

    /// Prepare the sinks and start accepting records
    ///
    /// Returns false on failure and leaves the logger uninitialized. Calling
    /// it again while initialized is a no-op that opens nothing new.
    pub fn initialize(&self) -> bool {
        match self.try_initialize() {
            Ok(()) => true,
            Err(e) => {
                self.diagnostics()
                    .report(&format!("Logger initialization failed: {}", e));
                false
            }
        }
    }

    pub fn try_initialize(&self) -> Result<(), LogError> {
        let mut lifecycle = self.lock();
        match *lifecycle {
            Lifecycle::Initialized(_) => return Ok(()),
            Lifecycle::ShutDown => return Err(LogError::AlreadyShutDown),
            Lifecycle::Uninitialized => {}
        }

        let mut manager = LogSinkManager::new()
            .with_console(self.options.console.clone())
            .with_colored_console(self.options.colored_console);
        if let Some(root) = &self.options.data_root {
            manager = manager.with_data_root(root.clone());
        }
        let handles = manager.prepare(&self.options.product_name)?;

        let active = ActiveLogger::new(handles, &self.options);
        active.emit(Severity::Info, "Logger initialized");

        if let Some(rotation) = &active.handles.rotation {
            if rotation.replaced_existing {
                active.emit(
                    Severity::Warning,
                    &format!(
                        "Previous session log overwrote existing backup {}",
                        rotation.backup_path.display()
                    ),
                );
            } else {
                active.emit(
                    Severity::Trace,
                    &format!(
                        "Previous session log moved to {}",
                        rotation.backup_path.display()
                    ),
                );
            }
        }

        let backup_dir = active.handles.destination.backup_dir();
        match cleanup_old_backups(backup_dir, self.options.backup_retention_days) {
            Ok(0) => {}
            Ok(count) => active.emit(
                Severity::Info,
                &format!("Cleaned up {} old log backups", count),
            ),
            Err(e) => active.emit(
                Severity::Warning,
                &format!("Failed to clean up old log backups: {:#}", e),
            ),
        }

        *lifecycle = Lifecycle::Initialized(active);
        Ok(())
    }

    /// Flush and release both sinks
    ///
    /// Returns false if the logger was not initialized.
    pub fn shutdown(&self) -> bool {
        match self.try_shutdown() {
            Ok(()) => true,
            Err(e) => {
                self.diagnostics()
                    .report(&format!("Logger shutdown rejected: {}", e));
                false
            }
        }
    }

    pub fn try_shutdown(&self) -> Result<(), LogError> {
        let mut lifecycle = self.lock();
        match std::mem::replace(&mut *lifecycle, Lifecycle::ShutDown) {
            Lifecycle::Initialized(active) => {
                active.emit(Severity::Info, "Logger shutting down");
                if let Err(e) = active.handles.close() {
                    self.diagnostics()
                        .report(&format!("Failed to flush log sinks: {}", e));
                }
                Ok(())
            }
            Lifecycle::Uninitialized => {
                *lifecycle = Lifecycle::Uninitialized;
                Err(LogError::NotInitialized)
            }
            Lifecycle::ShutDown => Err(LogError::AlreadyShutDown),
        }
    }

    /// Log a runtime template with positional arguments
    ///
    /// A template that cannot be rendered is dropped and reported on the
    /// diagnostic channel.
    pub fn log(&self, severity: Severity, template: &str, args: &[&dyn Display]) {
        if !self.accepts(severity) {
            return;
        }
        match template::render(template, args) {
            Ok(message) => self.write(severity, &message),
            Err(e) => self.diagnostics().report(&format!(
                "Failed to format log message \"{}\": {}",
                template, e
            )),
        }
    }

    /// Log pre-built format arguments, as produced by [`mint_log!`](crate::mint_log)
    pub fn log_fmt(&self, severity: Severity, args: fmt::Arguments<'_>) {
        if !self.accepts(severity) {
            return;
        }
        let mut message = String::new();
        match fmt::write(&mut message, args) {
            Ok(()) => self.write(severity, &message),
            Err(_) => self
                .diagnostics()
                .report("Failed to format log message: an argument failed to format itself"),
        }
    }

    pub fn trace(&self, message: impl Display) {
        self.log_fmt(Severity::Trace, format_args!("{}", message));
    }

    pub fn info(&self, message: impl Display) {
        self.log_fmt(Severity::Info, format_args!("{}", message));
    }

    pub fn warning(&self, message: impl Display) {
        self.log_fmt(Severity::Warning, format_args!("{}", message));
    }

    pub fn error(&self, message: impl Display) {
        self.log_fmt(Severity::Error, format_args!("{}", message));
    }

    pub fn fatal(&self, message: impl Display) {
        self.log_fmt(Severity::Fatal, format_args!("{}", message));
    }

    /// Run `f` with this logger's sinks as the `tracing` default
    ///
    /// `tracing` macros inside the scope are written with the same format and
    /// threshold. Outside the Initialized window `f` runs unchanged.
    pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        let dispatch = match &*self.lock() {
            Lifecycle::Initialized(active) => Some(active.dispatch.clone()),
            _ => None,
        };
        match dispatch {
            Some(dispatch) => tracing::dispatcher::with_default(&dispatch, f),
            None => f(),
        }
    }

    /// Cheap pre-check so disabled records are never formatted
    fn accepts(&self, severity: Severity) -> bool {
        severity >= self.options.threshold && self.is_initialized()
    }

    fn write(&self, severity: Severity, message: &str) {
        // Holding the lifecycle lock orders records against shutdown
        if let Lifecycle::Initialized(active) = &*self.lock() {
            active.emit(severity, message);
        }
    }

    fn lock(&self) -> MutexGuard<'_, Lifecycle> {
        self.lifecycle.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::destination::LogDestination;
    use crate::logging::fallback::CapturedDiagnostics;
    use std::fs::{self, File};
    use std::path::Path;
    use std::thread;
    use std::time::{Duration, SystemTime};
    use tempfile::TempDir;

    struct Harness {
        logger: Logger,
        console: Arc<Mutex<Vec<u8>>>,
        diagnostics: CapturedDiagnostics,
    }

    fn harness(root: &Path, threshold: Severity) -> Harness {
        let console = Arc::new(Mutex::new(Vec::new()));
        let diagnostics = CapturedDiagnostics::new();
        let options = LoggerOptions::default()
            .with_data_root(root)
            .with_threshold(threshold)
            .with_console(ConsoleTarget::Shared(console.clone()))
            .with_diagnostics(Arc::new(diagnostics.clone()));
        Harness {
            logger: Logger::new(options),
            console,
            diagnostics,
        }
    }

    fn destination(root: &Path) -> LogDestination {
        LogDestination::new(root, PRODUCT_NAME)
    }

    fn file_text(root: &Path) -> String {
        fs::read_to_string(destination(root).log_file()).unwrap()
    }

    impl Harness {
        fn console_text(&self) -> String {
            String::from_utf8(self.console.lock().unwrap().clone()).unwrap()
        }
    }

    #[test]
    fn test_initialize_and_shutdown_lifecycle() {
        let temp_dir = TempDir::new().unwrap();
        let h = harness(temp_dir.path(), Severity::Info);

        assert_eq!(h.logger.state(), LoggerState::Uninitialized);
        assert!(h.logger.initialize());
        assert_eq!(h.logger.state(), LoggerState::Initialized);
        assert_eq!(
            h.logger.log_file().unwrap(),
            destination(temp_dir.path()).log_file()
        );
        assert!(h.logger.shutdown());
        assert_eq!(h.logger.state(), LoggerState::ShutDown);
        assert!(h.logger.log_file().is_none());

        let text = file_text(temp_dir.path());
        assert!(text.contains("EditorLogger: Logger initialized"));
        assert!(text.contains("EditorLogger: Logger shutting down"));
    }

    #[test]
    fn test_logging_outside_window_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let h = harness(temp_dir.path(), Severity::Trace);

        h.logger.error("before initialize");
        assert!(h.logger.initialize());
        h.logger.info("inside window");
        assert!(h.logger.shutdown());
        h.logger.error("after shutdown");

        let text = file_text(temp_dir.path());
        assert!(!text.contains("before initialize"));
        assert!(text.contains("inside window"));
        assert!(!text.contains("after shutdown"));
        assert!(!h.console_text().contains("after shutdown"));
        assert!(h.diagnostics.messages().is_empty());
    }

    #[test]
    fn test_line_format_on_both_sinks() {
        let temp_dir = TempDir::new().unwrap();
        let h = harness(temp_dir.path(), Severity::Info);
        assert!(h.logger.initialize());
        h.logger.info("hello there");

        let file = file_text(temp_dir.path());
        let console = h.console_text();
        for text in [&file, &console] {
            let line = text
                .lines()
                .find(|l| l.ends_with("hello there"))
                .unwrap();
            let bytes = line.as_bytes();
            assert_eq!(bytes[0], b'[');
            assert_eq!(bytes[3], b':');
            assert_eq!(bytes[6], b':');
            assert_eq!(&line[9..], "] EditorLogger: hello there");
        }
    }

    #[test]
    fn test_threshold_suppresses_trace() {
        let temp_dir = TempDir::new().unwrap();
        let h = harness(temp_dir.path(), Severity::Info);
        assert!(h.logger.initialize());

        h.logger.trace("too chatty");
        h.logger.error("always shown");
        h.logger.fatal("also shown");

        let file = file_text(temp_dir.path());
        assert!(!file.contains("too chatty"));
        assert!(!h.console_text().contains("too chatty"));
        assert!(file.contains("always shown"));
        assert!(file.contains("also shown"));
        assert!(h.console_text().contains("always shown"));
    }

    #[test]
    fn test_trace_threshold_admits_everything() {
        let temp_dir = TempDir::new().unwrap();
        let h = harness(temp_dir.path(), Severity::Trace);
        assert!(h.logger.initialize());

        for severity in Severity::ALL {
            h.logger.log(severity, "level {}", &[&severity]);
        }

        let file = file_text(temp_dir.path());
        for severity in Severity::ALL {
            assert!(file.contains(&format!("level {}", severity)));
        }
    }

    #[test]
    fn test_initialize_twice_does_not_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let h = harness(temp_dir.path(), Severity::Info);

        assert!(h.logger.initialize());
        h.logger.info("first line");
        assert!(h.logger.initialize());

        assert!(!destination(temp_dir.path()).backup_dir().exists());
        assert!(file_text(temp_dir.path()).contains("first line"));
    }

    #[test]
    fn test_shutdown_misuse_returns_false() {
        let temp_dir = TempDir::new().unwrap();
        let h = harness(temp_dir.path(), Severity::Info);

        assert!(!h.logger.shutdown());
        assert!(matches!(h.logger.try_shutdown(), Err(LogError::NotInitialized)));
        assert_eq!(h.logger.state(), LoggerState::Uninitialized);

        assert!(h.logger.initialize());
        assert!(h.logger.shutdown());
        assert!(matches!(h.logger.try_shutdown(), Err(LogError::AlreadyShutDown)));
        assert!(!h.logger.initialize());
        assert_eq!(h.logger.state(), LoggerState::ShutDown);
    }

    #[test]
    fn test_initialize_failure_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();
        let h = harness(&blocker, Severity::Info);

        assert!(!h.logger.initialize());
        assert_eq!(h.logger.state(), LoggerState::Uninitialized);
        h.logger.error("dropped");

        let messages = h.diagnostics.messages();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].starts_with("Logger initialization failed"));
        assert!(h.console_text().is_empty());
    }

    #[test]
    fn test_bad_template_is_swallowed_and_reported() {
        let temp_dir = TempDir::new().unwrap();
        let h = harness(temp_dir.path(), Severity::Info);
        assert!(h.logger.initialize());

        h.logger.log(Severity::Error, "{} and {}", &[&"one"]);

        assert!(!file_text(temp_dir.path()).contains("one and"));
        let messages = h.diagnostics.messages();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("Failed to format log message \"{} and {}\""));
    }

    #[test]
    fn test_mint_log_macro_formats_arguments() {
        let temp_dir = TempDir::new().unwrap();
        let h = harness(temp_dir.path(), Severity::Info);
        assert!(h.logger.initialize());

        crate::mint_log!(h.logger, Severity::Warning, "loaded {} assets in {}ms", 12, 7);

        assert!(file_text(temp_dir.path()).contains("EditorLogger: loaded 12 assets in 7ms"));
    }

    #[test]
    fn test_in_scope_routes_tracing_macros() {
        let temp_dir = TempDir::new().unwrap();
        let h = harness(temp_dir.path(), Severity::Info);
        assert!(h.logger.initialize());

        h.logger.in_scope(|| {
            tracing::info!(frames = 3, "editor tick");
            tracing::trace!("hidden by threshold");
        });

        let file = file_text(temp_dir.path());
        assert!(file.contains("EditorLogger: editor tick frames=3"));
        assert!(!file.contains("hidden by threshold"));
    }

    #[test]
    fn test_concurrent_writers_never_interleave() {
        let temp_dir = TempDir::new().unwrap();
        let h = harness(temp_dir.path(), Severity::Info);
        assert!(h.logger.initialize());
        let logger = Arc::new(h.logger);

        let workers: Vec<_> = (0..4)
            .map(|id| {
                let logger = Arc::clone(&logger);
                thread::spawn(move || {
                    for n in 0..50 {
                        logger.info(format!("worker {} line {}", id, n));
                    }
                })
            })
            .collect();
        for worker in workers {
            worker.join().unwrap();
        }

        let file = file_text(temp_dir.path());
        let worker_lines: Vec<_> = file.lines().filter(|l| l.contains("worker ")).collect();
        assert_eq!(worker_lines.len(), 200);
        for line in file.lines() {
            assert!(line.starts_with('['));
            assert_eq!(line.matches("EditorLogger: ").count(), 1);
        }
    }

    #[test]
    fn test_consecutive_runs_leave_one_backup() {
        let temp_dir = TempDir::new().unwrap();
        let dest = destination(temp_dir.path());

        let first = harness(temp_dir.path(), Severity::Info);
        assert!(first.logger.initialize());
        first.logger.info("first run line");
        assert!(first.logger.shutdown());
        let modified = fs::metadata(dest.log_file()).unwrap().modified().unwrap();
        let expected_backup = dest.backup_path_for(modified);

        let second = harness(temp_dir.path(), Severity::Info);
        assert!(second.logger.initialize());
        second.logger.info("second run line");
        assert!(second.logger.shutdown());

        let backups: Vec<_> = fs::read_dir(dest.backup_dir())
            .unwrap()
            .map(|e| e.unwrap().path())
            .collect();
        assert_eq!(backups, vec![expected_backup.clone()]);
        assert!(fs::read_to_string(&expected_backup)
            .unwrap()
            .contains("first run line"));

        let current = file_text(temp_dir.path());
        assert!(current.contains("second run line"));
        assert!(!current.contains("first run line"));
    }

    #[test]
    fn test_rotation_collision_is_logged_as_warning() {
        let temp_dir = TempDir::new().unwrap();
        let dest = destination(temp_dir.path());
        dest.ensure_directories().unwrap();
        fs::create_dir_all(dest.backup_dir()).unwrap();

        let modified = SystemTime::UNIX_EPOCH + Duration::from_secs(1_600_000_000);
        fs::write(dest.backup_path_for(modified), "older").unwrap();
        let file = File::create(dest.log_file()).unwrap();
        file.set_modified(modified).unwrap();
        drop(file);

        let h = harness(temp_dir.path(), Severity::Info);
        assert!(h.logger.initialize());

        assert!(file_text(temp_dir.path()).contains("overwrote existing backup"));
    }

    #[test]
    fn test_retention_removes_expired_backups_on_initialize() {
        let temp_dir = TempDir::new().unwrap();
        let dest = destination(temp_dir.path());
        fs::create_dir_all(dest.backup_dir()).unwrap();

        let expired = dest.backup_dir().join("MintLog_01-01-2020-00-00-00.log");
        let file = File::create(&expired).unwrap();
        file.set_modified(SystemTime::now() - Duration::from_secs(90 * 24 * 60 * 60))
            .unwrap();
        drop(file);

        let console = Arc::new(Mutex::new(Vec::new()));
        let logger = Logger::new(
            LoggerOptions::default()
                .with_data_root(temp_dir.path())
                .with_threshold(Severity::Info)
                .with_console(ConsoleTarget::Shared(console))
                .with_backup_retention_days(30),
        );
        assert!(logger.initialize());

        assert!(!expired.exists());
        assert!(file_text(temp_dir.path()).contains("Cleaned up 1 old log backups"));
    }

    #[test]
    fn test_huge_retention_keeps_backups() {
        let temp_dir = TempDir::new().unwrap();
        let dest = destination(temp_dir.path());
        fs::create_dir_all(dest.backup_dir()).unwrap();

        let old = dest.backup_dir().join("MintLog_01-01-2020-00-00-00.log");
        let file = File::create(&old).unwrap();
        file.set_modified(SystemTime::now() - Duration::from_secs(400 * 24 * 60 * 60))
            .unwrap();
        drop(file);

        let console = Arc::new(Mutex::new(Vec::new()));
        let logger = Logger::new(
            LoggerOptions::default()
                .with_data_root(temp_dir.path())
                .with_threshold(Severity::Info)
                .with_console(ConsoleTarget::Shared(console))
                .with_backup_retention_days(u64::MAX / 1000),
        );
        assert!(logger.initialize());

        assert!(old.exists());
        assert!(!file_text(temp_dir.path()).contains("Cleaned up"));
    }

    #[test]
    fn test_fatal_threshold_filters_scoped_tracing_errors() {
        let temp_dir = TempDir::new().unwrap();
        let h = harness(temp_dir.path(), Severity::Fatal);
        assert!(h.logger.initialize());

        h.logger.in_scope(|| tracing::error!("scoped error"));
        h.logger.error("plain error");
        h.logger.fatal("fatal shown");

        let file = file_text(temp_dir.path());
        assert!(!file.contains("scoped error"));
        assert!(!file.contains("plain error"));
        assert!(file.contains("fatal shown"));
        assert!(!h.console_text().contains("scoped error"));
        assert!(h.console_text().contains("fatal shown"));
    }
}
