use std::fs;
use std::path::{Path, PathBuf};

use bamcheck_logging::{bamcheck_debug, bamcheck_warn};
use tempfile::NamedTempFile;

use crate::{BatchId, StageError};

const BATCH_PREFIX: &str = "batch-";

/// Directory holding the staged copies of one batch.
pub(crate) fn batch_dir(staging_dir: &Path, batch: BatchId) -> PathBuf {
    staging_dir.join(format!("{BATCH_PREFIX}{batch}"))
}

/// Ensure the staging directory exists and is writable; create if missing.
pub fn ensure_staging_dir(dir: &Path) -> Result<(), StageError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| StageError::StagingDir(e.to_string()))?;
        if !meta.is_dir() {
            return Err(StageError::StagingDir(format!(
                "{} is not a directory",
                dir.display()
            )));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| StageError::StagingDir(e.to_string()))?;
    }
    // Basic writability probe: try creating a temp file.
    NamedTempFile::new_in(dir).map_err(|e| StageError::StagingDir(e.to_string()))?;
    Ok(())
}

/// Deletes the copies of every batch except `live`.
///
/// Entries that do not look like `batch-<id>` are left alone. Failures are
/// logged and skipped.
pub fn purge_stale_batches(staging_dir: &Path, live: BatchId) {
    let entries = match fs::read_dir(staging_dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return,
        Err(err) => {
            bamcheck_warn!("Cannot list staging dir {:?}: {}", staging_dir, err);
            return;
        }
    };

    for entry in entries.flatten() {
        let name = entry.file_name();
        let Some(batch) = name
            .to_str()
            .and_then(|name| name.strip_prefix(BATCH_PREFIX))
            .and_then(|id| id.parse::<BatchId>().ok())
        else {
            continue;
        };
        if batch == live {
            continue;
        }
        let path = entry.path();
        match fs::remove_dir_all(&path) {
            Ok(()) => bamcheck_debug!("Removed stale staging batch {:?}", path),
            Err(err) => bamcheck_warn!("Cannot remove stale staging batch {:?}: {}", path, err),
        }
    }
}
