use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc;

use bamcheck_logging::bamcheck_debug;
use tempfile::NamedTempFile;

use crate::persist::batch_dir;
use crate::{ensure_staging_dir, BatchId, EngineEvent, StageError, UploadProgress};

pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelProgressSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelProgressSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl ProgressSink for ChannelProgressSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

/// One selected file to make available for checking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageRequest {
    /// Row of the file in the selection. Names may repeat, positions do not.
    pub position: usize,
    pub name: String,
    pub path: PathBuf,
}

/// Stages one file of `batch` and returns the path the checker should use.
///
/// Without a staging directory the source is used in place. Otherwise it is
/// copied to `{staging_dir}/batch-{batch}/{position}/{name}` in chunks of `chunk_size`,
/// keeping the source modification time so index/data ordering survives the
/// copy. The copy aborts as soon as `live_batch` no longer equals `batch`.
pub fn stage_file(
    staging_dir: Option<&Path>,
    chunk_size: usize,
    batch: BatchId,
    request: &StageRequest,
    sink: &dyn ProgressSink,
    live_batch: &AtomicU64,
) -> Result<PathBuf, StageError> {
    let io_err = |source: io::Error| StageError::Io {
        path: request.path.clone(),
        source,
    };
    let emit_progress = |progress: f32| {
        sink.emit(EngineEvent::Progress(UploadProgress {
            batch,
            position: request.position,
            file_name: request.name.clone(),
            progress,
        }));
    };

    let meta = fs::metadata(&request.path).map_err(io_err)?;

    let Some(staging_dir) = staging_dir else {
        emit_progress(1.0);
        return Ok(request.path.clone());
    };

    let target_dir = batch_dir(staging_dir, batch).join(request.position.to_string());
    ensure_staging_dir(&target_dir)?;

    let total = meta.len();
    let mut source = File::open(&request.path).map_err(io_err)?;
    let mut tmp = NamedTempFile::new_in(&target_dir).map_err(io_err)?;
    let mut buf = vec![0u8; chunk_size.max(1)];
    let mut copied: u64 = 0;
    let mut last_percent = 0;

    loop {
        if live_batch.load(Ordering::SeqCst) != batch {
            bamcheck_debug!("Staging of {} cancelled at {} bytes", request.name, copied);
            return Err(StageError::Cancelled);
        }
        let read = source.read(&mut buf).map_err(io_err)?;
        if read == 0 {
            break;
        }
        tmp.write_all(&buf[..read]).map_err(io_err)?;
        copied += read as u64;

        let percent = if total == 0 { 100 } else { copied * 100 / total.max(copied) };
        if percent > last_percent {
            last_percent = percent;
            emit_progress(percent as f32 / 100.0);
        }
    }

    tmp.flush().map_err(io_err)?;
    let modified = meta.modified().map_err(io_err)?;
    tmp.as_file().set_modified(modified).map_err(io_err)?;
    tmp.as_file().sync_all().map_err(io_err)?;

    let target = target_dir.join(&request.name);
    if target.exists() {
        fs::remove_file(&target).map_err(io_err)?;
    }
    tmp.persist(&target).map_err(|e| io_err(e.error))?;

    emit_progress(1.0);
    bamcheck_debug!("Staged {} ({} bytes) to {:?}", request.name, copied, target);
    Ok(target)
}
