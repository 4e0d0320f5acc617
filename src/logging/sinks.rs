//! Console and file sinks
//!
//! Each sink serializes writers behind its own mutex and flushes after every
//! line, so a crash never loses the last record. Closing a sink releases the
//! underlying handle; later writes are discarded.

use std::fs::File;
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing_subscriber::fmt::MakeWriter;

use super::destination::{LogDestination, RotationOutcome};
use super::error::LogError;

/// Where console output goes
#[derive(Clone)]
pub enum ConsoleTarget {
    Stdout,
    /// A caller-owned writer, e.g. an in-memory buffer
    Shared(Arc<Mutex<dyn Write + Send>>),
}

impl std::fmt::Debug for ConsoleTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConsoleTarget::Stdout => f.write_str("Stdout"),
            ConsoleTarget::Shared(_) => f.write_str("Shared"),
        }
    }
}

impl ConsoleTarget {
    fn is_terminal(&self) -> bool {
        match self {
            ConsoleTarget::Stdout => io::stdout().is_terminal(),
            ConsoleTarget::Shared(_) => false,
        }
    }

    fn into_writer(self) -> Box<dyn Write + Send> {
        match self {
            ConsoleTarget::Stdout => Box::new(io::stdout()),
            ConsoleTarget::Shared(shared) => Box::new(SharedWriter(shared)),
        }
    }
}

/// Forwards writes into a shared writer
struct SharedWriter(Arc<Mutex<dyn Write + Send>>);

impl Write for SharedWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).flush()
    }
}

/// Shared handle to one output sink
#[derive(Clone)]
pub struct SinkHandle {
    ansi: bool,
    inner: Arc<Mutex<Option<Box<dyn Write + Send>>>>,
}

impl SinkHandle {
    fn new(ansi: bool, writer: Box<dyn Write + Send>) -> Self {
        Self {
            ansi,
            inner: Arc::new(Mutex::new(Some(writer))),
        }
    }

    /// Whether lines written here may carry ANSI colour codes
    pub fn ansi(&self) -> bool {
        self.ansi
    }

    /// Whether the handle has been released
    pub fn is_closed(&self) -> bool {
        self.lock().is_none()
    }

    /// Flush and release the underlying writer
    pub fn close(&self) -> io::Result<()> {
        match self.lock().take() {
            Some(mut writer) => writer.flush(),
            None => Ok(()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<Box<dyn Write + Send>>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Exclusive access to a sink for the duration of one event
pub struct SinkWriter<'a> {
    guard: MutexGuard<'a, Option<Box<dyn Write + Send>>>,
}

impl Write for SinkWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Some(writer) = self.guard.as_mut() {
            writer.write_all(buf)?;
            writer.flush()?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.guard.as_mut() {
            Some(writer) => writer.flush(),
            None => Ok(()),
        }
    }
}

impl<'a> MakeWriter<'a> for SinkHandle {
    type Writer = SinkWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        SinkWriter { guard: self.lock() }
    }
}

/// Sinks produced for one logging session
#[derive(Clone)]
pub struct DestinationHandles {
    pub console: SinkHandle,
    pub file: SinkHandle,
    pub destination: LogDestination,
    /// Set when a previous session's log was moved into Backup
    pub rotation: Option<RotationOutcome>,
}

impl DestinationHandles {
    pub fn log_file(&self) -> &Path {
        self.destination.log_file()
    }

    /// Flush and release both sinks
    pub fn close(&self) -> io::Result<()> {
        let console = self.console.close();
        let file = self.file.close();
        console.and(file)
    }
}

/// Prepares log directories, rotates the previous log and opens the sinks
#[derive(Debug, Clone)]
pub struct LogSinkManager {
    data_root: Option<PathBuf>,
    console: ConsoleTarget,
    colored_console: bool,
}

impl Default for LogSinkManager {
    fn default() -> Self {
        Self {
            data_root: None,
            console: ConsoleTarget::Stdout,
            colored_console: true,
        }
    }
}

impl LogSinkManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use this data root instead of resolving one from the environment
    pub fn with_data_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.data_root = Some(root.into());
        self
    }

    pub fn with_console(mut self, console: ConsoleTarget) -> Self {
        self.console = console;
        self
    }

    pub fn with_colored_console(mut self, colored: bool) -> Self {
        self.colored_console = colored;
        self
    }

    /// Resolve the destination for `product_name` and open both sinks
    pub fn prepare(&self, product_name: &str) -> Result<DestinationHandles, LogError> {
        let destination = match &self.data_root {
            Some(root) => LogDestination::new(root, product_name),
            None => LogDestination::resolve(product_name)?,
        };
        self.prepare_in(destination)
    }

    /// Open both sinks for an already resolved destination
    pub fn prepare_in(&self, destination: LogDestination) -> Result<DestinationHandles, LogError> {
        destination.ensure_directories()?;

        // Opening the file sink truncates the canonical path, so rotate first
        let rotation = destination.rotate_existing()?;

        let file = File::create(destination.log_file()).map_err(LogError::sink(format!(
            "Failed to open log file {}",
            destination.log_file().display()
        )))?;

        let ansi = self.colored_console && self.console.is_terminal();
        let console = SinkHandle::new(ansi, self.console.clone().into_writer());
        let file = SinkHandle::new(false, Box::new(file));

        Ok(DestinationHandles {
            console,
            file,
            destination,
            rotation,
        })
    }
}
