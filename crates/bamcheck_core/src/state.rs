use std::path::PathBuf;

use crate::view_model::{AppViewModel, FileRowView};
use crate::RoleExtensions;

pub type BatchId = u64;

/// A file returned by the picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickedFile {
    pub name: String,
    pub path: PathBuf,
}

impl PickedFile {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

/// A picked file plus its upload state for the current batch.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedFile {
    pub name: String,
    pub path: PathBuf,
    pub progress: f32,
    pub staged: bool,
    pub failure: Option<String>,
}

impl TrackedFile {
    fn from_picked(file: PickedFile) -> Self {
        Self {
            name: file.name,
            path: file.path,
            progress: 0.0,
            staged: false,
            failure: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tone {
    #[default]
    Normal,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub text: String,
    pub tone: Tone,
}

impl StatusLine {
    pub fn normal(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: Tone::Normal,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: Tone::Error,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    NameMismatch,
    StaleIndex,
    Unreadable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckFailure {
    pub kind: FailureKind,
    pub message: String,
}

/// Outcome of one confirm: the data file size (or why it was rejected) and
/// the region count when a region file was part of the batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    pub data: Result<u64, CheckFailure>,
    pub regions: Option<Result<usize, CheckFailure>>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    extensions: RoleExtensions,
    batch: BatchId,
    files: Vec<TrackedFile>,
    confirm_enabled: bool,
    checking: bool,
    status: Option<StatusLine>,
    region_status: Option<StatusLine>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_extensions(extensions: RoleExtensions) -> Self {
        Self {
            extensions,
            ..Self::default()
        }
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            files: self
                .files
                .iter()
                .map(|file| FileRowView {
                    name: file.name.clone(),
                    progress: file.progress,
                    staged: file.staged,
                    failure: file.failure.clone(),
                })
                .collect(),
            confirm_enabled: self.confirm_enabled && !self.checking,
            checking: self.checking,
            status: self.status.clone(),
            region_status: self.region_status.clone(),
        }
    }

    pub fn batch(&self) -> BatchId {
        self.batch
    }

    pub fn files(&self) -> &[TrackedFile] {
        &self.files
    }

    pub fn extensions(&self) -> &RoleExtensions {
        &self.extensions
    }

    pub fn is_checking(&self) -> bool {
        self.checking
    }

    pub fn can_confirm(&self) -> bool {
        self.confirm_enabled && !self.checking
    }

    /// Returns whether the state changed since the last call and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Starts a new batch from a picker result, dropping the previous file list.
    pub(crate) fn replace_selection(&mut self, files: Vec<PickedFile>) {
        self.batch += 1;
        self.confirm_enabled = !files.is_empty();
        self.checking = false;
        self.files = files.into_iter().map(TrackedFile::from_picked).collect();
        self.mark_dirty();
    }

    /// Resets everything the user can see and invalidates in-flight work.
    pub(crate) fn reset(&mut self) {
        self.batch += 1;
        self.files.clear();
        self.confirm_enabled = false;
        self.checking = false;
        self.status = None;
        self.region_status = None;
        self.mark_dirty();
    }

    /// Row at `position`, provided it still holds `file_name`.
    fn row_mut(&mut self, position: usize, file_name: &str) -> Option<&mut TrackedFile> {
        self.files
            .get_mut(position)
            .filter(|file| file.name == file_name)
    }

    pub(crate) fn apply_progress(&mut self, position: usize, file_name: &str, progress: f32) {
        let progress = if progress.is_nan() {
            0.0
        } else {
            progress.clamp(0.0, 1.0)
        };
        let Some(file) = self.row_mut(position, file_name) else {
            return;
        };
        if progress > file.progress {
            file.progress = progress;
            self.mark_dirty();
        }
    }

    pub(crate) fn apply_staged(&mut self, position: usize, file_name: &str, path: PathBuf) {
        let Some(file) = self.row_mut(position, file_name) else {
            return;
        };
        file.progress = 1.0;
        file.staged = true;
        file.path = path;
        self.mark_dirty();
    }

    pub(crate) fn apply_upload_failure(
        &mut self,
        position: usize,
        file_name: &str,
        message: &str,
    ) -> bool {
        let Some(file) = self.row_mut(position, file_name) else {
            return false;
        };
        file.failure = Some(message.to_string());
        self.mark_dirty();
        true
    }

    pub(crate) fn picked_files(&self) -> Vec<PickedFile> {
        self.files
            .iter()
            .map(|file| PickedFile::new(file.name.clone(), file.path.clone()))
            .collect()
    }

    pub(crate) fn set_checking(&mut self, checking: bool) {
        if self.checking != checking {
            self.checking = checking;
            self.mark_dirty();
        }
    }

    pub(crate) fn clear_results(&mut self) {
        if self.status.is_some() || self.region_status.is_some() {
            self.status = None;
            self.region_status = None;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_status(&mut self, line: StatusLine) {
        self.status = Some(line);
        self.mark_dirty();
    }

    pub(crate) fn set_region_status(&mut self, line: StatusLine) {
        self.region_status = Some(line);
        self.mark_dirty();
    }
}
