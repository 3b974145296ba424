use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type BatchId = u64;

#[derive(Debug, Error)]
pub enum CheckError {
    #[error("file name mismatch: {data_name} does not start with index stem {stem}")]
    NameMismatch { data_name: String, stem: String },
    #[error("index older than data file: {index_name} was modified before {data_name}")]
    StaleIndex {
        data_name: String,
        index_name: String,
    },
    #[error("cannot read {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl CheckError {
    pub(crate) fn unreadable(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Unreadable {
            path: path.into(),
            source,
        }
    }
}

#[derive(Debug, Error)]
pub enum StageError {
    #[error("staging directory unusable: {0}")]
    StagingDir(String),
    #[error("cannot stage {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cancelled")]
    Cancelled,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UploadProgress {
    pub batch: BatchId,
    pub position: usize,
    pub file_name: String,
    pub progress: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    Progress(UploadProgress),
    FileStaged {
        batch: BatchId,
        position: usize,
        file_name: String,
        path: PathBuf,
    },
    UploadFailed {
        batch: BatchId,
        position: usize,
        file_name: String,
        reason: String,
    },
}
