use crate::StatusLine;

const BYTES_PER_MEGABYTE: f64 = 1024.0 * 1024.0;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppViewModel {
    pub files: Vec<FileRowView>,
    pub confirm_enabled: bool,
    pub checking: bool,
    /// General status: data file size or the reason the batch was rejected.
    pub status: Option<StatusLine>,
    /// Region count, or a hint that a region file may be added.
    pub region_status: Option<StatusLine>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FileRowView {
    pub name: String,
    pub progress: f32,
    pub staged: bool,
    pub failure: Option<String>,
}

/// Formats a byte count as binary megabytes with two decimals, e.g. `1.00 MB`.
pub fn format_megabytes(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / BYTES_PER_MEGABYTE)
}
