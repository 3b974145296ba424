use std::sync::{Arc, Weak};
use std::thread;
use std::time::Duration;

use bamcheck_core::{CheckFailure, CheckReport, Effect, FailureKind, Msg};
use bamcheck_engine::{
    run_check, CheckError, CheckOutcome, CheckRequest, EngineConfig, EngineEvent, EngineHandle,
    StageRequest,
};
use bamcheck_logging::{bamcheck_debug, bamcheck_info, bamcheck_warn};
use futures_channel::mpsc::UnboundedSender;

/// Executes effects produced by `update`.
///
/// Checks run synchronously and come back as messages to feed into `update`.
/// Staging runs on the engine thread; its events are relayed to `inbox`
/// until the runner is dropped.
pub struct EffectRunner {
    engine: Arc<EngineHandle>,
}

impl EffectRunner {
    pub fn new(config: EngineConfig, inbox: UnboundedSender<Msg>) -> Self {
        if let Some(dir) = &config.staging_dir {
            bamcheck_info!("Staging uploads under {:?}", dir);
        }
        let runner = Self {
            engine: Arc::new(EngineHandle::new(config)),
        };
        spawn_event_loop(Arc::downgrade(&runner.engine), inbox);
        runner
    }

    pub fn run(&self, effects: Vec<Effect>) -> Vec<Msg> {
        let mut follow_ups = Vec::new();
        for effect in effects {
            match effect {
                Effect::BeginUpload { batch, files } => {
                    bamcheck_info!("BeginUpload batch={} files={}", batch, files.len());
                    let requests = files
                        .into_iter()
                        .enumerate()
                        .map(|(position, file)| StageRequest {
                            position,
                            name: file.name,
                            path: file.path,
                        })
                        .collect();
                    self.engine.stage(batch, requests);
                }
                Effect::CancelUploads { batch } => {
                    self.engine.cancel_before(batch);
                }
                Effect::RunCheck { batch, request } => {
                    bamcheck_info!(
                        "RunCheck batch={} data={:?} index={:?} reference={:?} reference_index={:?}",
                        batch,
                        request.data,
                        request.index,
                        request.reference,
                        request.reference_index
                    );
                    let outcome = run_check(&CheckRequest {
                        data: request.data,
                        index: request.index,
                        region: request.region,
                    });
                    follow_ups.push(Msg::CheckFinished {
                        batch,
                        report: map_outcome(outcome),
                    });
                }
            }
        }
        follow_ups
    }

}

/// Relays engine events to `inbox`. Holds the engine only while polling so
/// dropping the runner shuts the engine thread down.
fn spawn_event_loop(engine: Weak<EngineHandle>, inbox: UnboundedSender<Msg>) {
    thread::spawn(move || loop {
        let Some(handle) = engine.upgrade() else {
            bamcheck_debug!("Engine released, stopping event relay");
            break;
        };
        let event = handle.try_recv();
        drop(handle);
        match event {
            Some(event) => {
                if inbox.unbounded_send(map_event(event)).is_err() {
                    // UI is gone.
                    break;
                }
            }
            None => thread::sleep(Duration::from_millis(20)),
        }
    });
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::Progress(progress) => Msg::UploadProgress {
            batch: progress.batch,
            position: progress.position,
            file_name: progress.file_name,
            progress: progress.progress,
        },
        EngineEvent::FileStaged {
            batch,
            position,
            file_name,
            path,
        } => Msg::FileStaged {
            batch,
            position,
            file_name,
            path,
        },
        EngineEvent::UploadFailed {
            batch,
            position,
            file_name,
            reason,
        } => {
            bamcheck_warn!("Upload of {} failed: {}", file_name, reason);
            Msg::UploadFailed {
                batch,
                position,
                file_name,
                message: reason,
            }
        }
    }
}

fn map_outcome(outcome: CheckOutcome) -> CheckReport {
    CheckReport {
        data: outcome.data.map_err(map_failure),
        regions: outcome.regions.map(|count| count.map_err(map_failure)),
    }
}

fn map_failure(err: CheckError) -> CheckFailure {
    let kind = match &err {
        CheckError::NameMismatch { .. } => FailureKind::NameMismatch,
        CheckError::StaleIndex { .. } => FailureKind::StaleIndex,
        CheckError::Unreadable { .. } => FailureKind::Unreadable,
    };
    CheckFailure {
        kind,
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::time::Instant;

    use bamcheck_core::{PickedFile, ResolvedBatch};
    use futures_channel::mpsc::unbounded;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn failures_keep_their_kind() {
        let failure = map_failure(CheckError::StaleIndex {
            data_name: "a.bam".to_string(),
            index_name: "a.bai".to_string(),
        });
        assert_eq!(failure.kind, FailureKind::StaleIndex);
        assert!(failure.message.contains("a.bai"));

        let failure = map_failure(CheckError::Unreadable {
            path: PathBuf::from("/x/a.bam"),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        });
        assert_eq!(failure.kind, FailureKind::Unreadable);
        assert!(failure.message.starts_with("cannot read /x/a.bam"));
    }

    #[test]
    fn run_check_produces_finished_message() {
        let temp = TempDir::new().unwrap();
        let data = temp.path().join("s.bam");
        fs::write(&data, b"abc").unwrap();
        let index = temp.path().join("other.bai");
        fs::write(&index, b"").unwrap();
        let (tx, _rx) = unbounded();
        let runner = EffectRunner::new(EngineConfig::default(), tx);

        let msgs = runner.run(vec![Effect::RunCheck {
            batch: 9,
            request: ResolvedBatch {
                data,
                index,
                reference: temp.path().join("r.fa"),
                reference_index: temp.path().join("r.fa.fai"),
                region: None,
            },
        }]);

        match msgs.as_slice() {
            [Msg::CheckFinished { batch: 9, report }] => {
                let failure = report.data.as_ref().unwrap_err();
                assert_eq!(failure.kind, FailureKind::NameMismatch);
                assert!(report.regions.is_none());
            }
            other => panic!("unexpected messages: {other:?}"),
        }
    }

    #[test]
    fn upload_events_reach_the_inbox() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("s.bam");
        fs::write(&path, b"abc").unwrap();
        let (tx, mut rx) = unbounded();
        let runner = EffectRunner::new(EngineConfig::default(), tx);

        let follow_ups = runner.run(vec![Effect::BeginUpload {
            batch: 1,
            files: vec![PickedFile::new("s.bam", path.clone())],
        }]);
        assert!(follow_ups.is_empty());

        let deadline = Instant::now() + Duration::from_secs(10);
        let mut received = Vec::new();
        while received.len() < 2 && Instant::now() < deadline {
            match rx.try_next() {
                Ok(Some(msg)) => received.push(msg),
                _ => thread::sleep(Duration::from_millis(5)),
            }
        }

        assert_eq!(
            received,
            vec![
                Msg::UploadProgress {
                    batch: 1,
                    position: 0,
                    file_name: "s.bam".to_string(),
                    progress: 1.0,
                },
                Msg::FileStaged {
                    batch: 1,
                    position: 0,
                    file_name: "s.bam".to_string(),
                    path,
                },
            ]
        );
    }

    #[test]
    fn dropping_the_runner_releases_the_engine() {
        let (tx, _rx) = unbounded();
        let runner = EffectRunner::new(EngineConfig::default(), tx);
        let engine = Arc::downgrade(&runner.engine);

        drop(runner);

        let deadline = Instant::now() + Duration::from_secs(10);
        while engine.upgrade().is_some() && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(5));
        }
        assert!(engine.upgrade().is_none());
    }

    #[test]
    fn selection_positions_follow_the_picked_order() {
        let temp = TempDir::new().unwrap();
        let first = temp.path().join("a");
        let second = temp.path().join("b");
        fs::create_dir_all(&first).unwrap();
        fs::create_dir_all(&second).unwrap();
        fs::write(first.join("s.bam"), b"one").unwrap();
        fs::write(second.join("s.bam"), b"two").unwrap();
        let (tx, mut rx) = unbounded();
        let runner = EffectRunner::new(EngineConfig::default(), tx);

        runner.run(vec![Effect::BeginUpload {
            batch: 2,
            files: vec![
                PickedFile::new("s.bam", first.join("s.bam")),
                PickedFile::new("s.bam", second.join("s.bam")),
            ],
        }]);

        let deadline = Instant::now() + Duration::from_secs(10);
        let mut staged = Vec::new();
        while staged.len() < 2 && Instant::now() < deadline {
            match rx.try_next() {
                Ok(Some(Msg::FileStaged { position, path, .. })) => staged.push((position, path)),
                Ok(Some(_)) => {}
                _ => thread::sleep(Duration::from_millis(5)),
            }
        }

        assert_eq!(
            staged,
            vec![(0, first.join("s.bam")), (1, second.join("s.bam"))]
        );
    }
}
