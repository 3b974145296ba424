use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{mpsc, Arc, Mutex};
use std::thread;

use bamcheck_logging::{bamcheck_error, bamcheck_info, bamcheck_warn};

use crate::persist::purge_stale_batches;
use crate::stage::{stage_file, ChannelProgressSink, ProgressSink, StageRequest};
use crate::{BatchId, EngineEvent, StageError};

#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Where uploads are copied. `None` checks the selected files in place.
    pub staging_dir: Option<PathBuf>,
    pub chunk_size: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            staging_dir: None,
            chunk_size: 1024 * 1024,
        }
    }
}

enum EngineCommand {
    Stage {
        batch: BatchId,
        files: Vec<StageRequest>,
    },
    Cancel {
        batch: BatchId,
    },
}

/// Handle to the background staging thread.
///
/// Only the most recent batch is live: starting or cancelling a batch makes
/// every older batch abort between chunks and deletes its copies. The worker
/// exits once the handle is dropped.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Mutex<mpsc::Receiver<EngineEvent>>,
    live_batch: Arc<AtomicU64>,
}

impl EngineHandle {
    pub fn new(config: EngineConfig) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let live_batch = Arc::new(AtomicU64::new(0));

        let worker_live = live_batch.clone();
        thread::spawn(move || {
            let sink = ChannelProgressSink::new(event_tx);
            while let Ok(command) = cmd_rx.recv() {
                handle_command(&config, command, &sink, &worker_live);
            }
        });

        Self {
            cmd_tx,
            event_rx: Mutex::new(event_rx),
            live_batch,
        }
    }

    pub fn stage(&self, batch: BatchId, files: Vec<StageRequest>) {
        self.live_batch.store(batch, Ordering::SeqCst);
        let _ = self.cmd_tx.send(EngineCommand::Stage { batch, files });
    }

    /// Makes `batch` the live batch, cancelling anything older.
    pub fn cancel_before(&self, batch: BatchId) {
        self.live_batch.store(batch, Ordering::SeqCst);
        let _ = self.cmd_tx.send(EngineCommand::Cancel { batch });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }
}

fn handle_command(
    config: &EngineConfig,
    command: EngineCommand,
    sink: &dyn ProgressSink,
    live_batch: &AtomicU64,
) {
    match command {
        EngineCommand::Stage { batch, files } => {
            if let Some(dir) = &config.staging_dir {
                purge_stale_batches(dir, batch);
            }
            bamcheck_info!("Staging batch {} ({} files)", batch, files.len());
            for request in &files {
                if live_batch.load(Ordering::SeqCst) != batch {
                    break;
                }
                match stage_file(
                    config.staging_dir.as_deref(),
                    config.chunk_size,
                    batch,
                    request,
                    sink,
                    live_batch,
                ) {
                    Ok(path) => sink.emit(EngineEvent::FileStaged {
                        batch,
                        position: request.position,
                        file_name: request.name.clone(),
                        path,
                    }),
                    Err(StageError::Cancelled) => break,
                    Err(err) => {
                        if matches!(err, StageError::StagingDir(_)) {
                            bamcheck_error!("Staging directory unusable: {}", err);
                        } else {
                            bamcheck_warn!("Staging {} failed: {}", request.name, err);
                        }
                        sink.emit(EngineEvent::UploadFailed {
                            batch,
                            position: request.position,
                            file_name: request.name.clone(),
                            reason: err.to_string(),
                        });
                    }
                }
            }
        }
        EngineCommand::Cancel { batch } => {
            bamcheck_info!("Cancelled staging before batch {}", batch);
            if let Some(dir) = &config.staging_dir {
                purge_stale_batches(dir, batch);
            }
        }
    }
}
