use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// The file dialog returned. `None` means the user cancelled.
    SelectionChanged(Option<Vec<crate::PickedFile>>),
    /// Upload progress for one file of a batch, as a fraction in `[0, 1]`.
    /// `position` is the file's row in the selection.
    UploadProgress {
        batch: crate::BatchId,
        position: usize,
        file_name: String,
        progress: f32,
    },
    /// A file finished uploading and is now available at `path`.
    FileStaged {
        batch: crate::BatchId,
        position: usize,
        file_name: String,
        path: PathBuf,
    },
    /// A file could not be uploaded.
    UploadFailed {
        batch: crate::BatchId,
        position: usize,
        file_name: String,
        message: String,
    },
    /// User clicked Confirm.
    ConfirmClicked,
    /// The checker finished a batch.
    CheckFinished {
        batch: crate::BatchId,
        report: crate::CheckReport,
    },
    /// User clicked Clear.
    ClearClicked,
}
