use crate::{BatchId, PickedFile, ResolvedBatch};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Make the selected files available to the checker, reporting progress per file.
    BeginUpload {
        batch: BatchId,
        files: Vec<PickedFile>,
    },
    /// Abort any staging still running for batches older than `batch`.
    CancelUploads { batch: BatchId },
    /// Validate the data/index pair and count regions for a resolved batch.
    RunCheck {
        batch: BatchId,
        request: ResolvedBatch,
    },
}
