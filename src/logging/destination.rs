//! Log file locations and rotation-on-startup
//!
//! Layout under the user-data root:
//!
//! ```text
//! <root>/<product>/Logs/MintLog.log
//! <root>/<product>/Logs/Backup/MintLog_MM-DD-YYYY-HH-MM-SS.log
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Local};

use super::error::LogError;

/// Directory under the product directory that holds logs
pub const LOGS_DIR_NAME: &str = "Logs";

/// Directory under the logs directory that holds previous sessions
pub const BACKUP_DIR_NAME: &str = "Backup";

/// Name of the active session log
pub const LOG_FILE_NAME: &str = "MintLog.log";

/// Prefix shared by the active log and every backup
pub const BACKUP_FILE_PREFIX: &str = "MintLog_";

/// Resolve the user-data root from the environment
///
/// The platform data directory is preferred; the home directory is the fallback.
pub fn resolve_data_root() -> Result<PathBuf, LogError> {
    select_data_root(dirs::data_dir(), dirs::home_dir())
}

/// Pick the first usable candidate root
pub fn select_data_root(
    primary: Option<PathBuf>,
    fallback: Option<PathBuf>,
) -> Result<PathBuf, LogError> {
    primary
        .filter(|p| !p.as_os_str().is_empty())
        .or_else(|| fallback.filter(|p| !p.as_os_str().is_empty()))
        .ok_or(LogError::EnvironmentUnavailable)
}

/// Format the backup file name for a log last modified at `modified`
pub fn backup_file_name(modified: DateTime<Local>) -> String {
    format!(
        "{}{}.log",
        BACKUP_FILE_PREFIX,
        modified.format("%m-%d-%Y-%H-%M-%S")
    )
}

/// Result of moving the previous session's log aside
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationOutcome {
    /// Where the previous log now lives
    pub backup_path: PathBuf,
    /// A backup with the same name existed and was overwritten
    pub replaced_existing: bool,
}

/// Filesystem locations used by one product's logs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogDestination {
    product_dir: PathBuf,
    logs_dir: PathBuf,
    backup_dir: PathBuf,
    log_file: PathBuf,
}

impl LogDestination {
    /// Build the layout under an explicit data root
    pub fn new(data_root: &Path, product_name: &str) -> Self {
        let product_dir = data_root.join(product_name);
        let logs_dir = product_dir.join(LOGS_DIR_NAME);
        let backup_dir = logs_dir.join(BACKUP_DIR_NAME);
        let log_file = logs_dir.join(LOG_FILE_NAME);
        Self {
            product_dir,
            logs_dir,
            backup_dir,
            log_file,
        }
    }

    /// Build the layout under the data root resolved from the environment
    pub fn resolve(product_name: &str) -> Result<Self, LogError> {
        let root = resolve_data_root()?;
        Ok(Self::new(&root, product_name))
    }

    pub fn product_dir(&self) -> &Path {
        &self.product_dir
    }

    pub fn logs_dir(&self) -> &Path {
        &self.logs_dir
    }

    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }

    /// Path of the active session log
    pub fn log_file(&self) -> &Path {
        &self.log_file
    }

    /// Create the product and logs directories if they are missing
    pub fn ensure_directories(&self) -> Result<(), LogError> {
        fs::create_dir_all(&self.product_dir).map_err(LogError::sink(format!(
            "Failed to create product directory {}",
            self.product_dir.display()
        )))?;
        fs::create_dir_all(&self.logs_dir).map_err(LogError::sink(format!(
            "Failed to create logs directory {}",
            self.logs_dir.display()
        )))?;
        Ok(())
    }

    /// Move an existing session log into the backup directory
    ///
    /// The backup is named after the file's last modification time. Must run
    /// before the new file sink is opened. Returns `None` when there was
    /// nothing to rotate.
    pub fn rotate_existing(&self) -> Result<Option<RotationOutcome>, LogError> {
        if !self.log_file.is_file() {
            return Ok(None);
        }

        fs::create_dir_all(&self.backup_dir).map_err(LogError::sink(format!(
            "Failed to create backup directory {}",
            self.backup_dir.display()
        )))?;

        let modified = fs::metadata(&self.log_file)
            .and_then(|m| m.modified())
            .map_err(LogError::sink(format!(
                "Failed to read modification time of {}",
                self.log_file.display()
            )))?;

        let backup_path = self.backup_path_for(modified);
        // Second-granularity names collide on rapid restarts; the newer move wins.
        let replaced_existing = backup_path.exists();

        fs::rename(&self.log_file, &backup_path).map_err(LogError::sink(format!(
            "Failed to move {} to {}",
            self.log_file.display(),
            backup_path.display()
        )))?;

        Ok(Some(RotationOutcome {
            backup_path,
            replaced_existing,
        }))
    }

    /// Backup path for a log last modified at `modified`
    pub fn backup_path_for(&self, modified: SystemTime) -> PathBuf {
        self.backup_dir
            .join(backup_file_name(DateTime::<Local>::from(modified)))
    }
}
