//! Backup retention management
//!
//! Handles cleanup of old session backups based on age.

use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime};

use anyhow::Result;

use super::destination::BACKUP_FILE_PREFIX;

const SECS_PER_DAY: u64 = 24 * 60 * 60;

/// Remove backups older than `retention_days`
///
/// A retention of 0, or one too long to represent, keeps every backup.
/// Returns the number of files deleted.
pub fn cleanup_old_backups(backup_dir: &Path, retention_days: u64) -> Result<usize> {
    if retention_days == 0 || !backup_dir.exists() {
        return Ok(0);
    }

    let Some(retention_secs) = retention_days.checked_mul(SECS_PER_DAY) else {
        return Ok(0);
    };
    let retention_duration = Duration::from_secs(retention_secs);
    let cutoff = SystemTime::now()
        .checked_sub(retention_duration)
        .unwrap_or(SystemTime::UNIX_EPOCH);

    let mut deleted_count = 0;

    for entry in fs::read_dir(backup_dir)? {
        let entry = entry?;
        let path = entry.path();

        // Only process Mint backups
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            if !name.starts_with(BACKUP_FILE_PREFIX) || !name.ends_with(".log") {
                continue;
            }
        } else {
            continue;
        }

        if let Ok(metadata) = entry.metadata() {
            if let Ok(modified) = metadata.modified() {
                if modified < cutoff && fs::remove_file(&path).is_ok() {
                    deleted_count += 1;
                }
            }
        }
    }

    Ok(deleted_count)
}
