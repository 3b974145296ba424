use bamcheck_core::{FileRowView, Tone};

use super::constants::{COLOR_ERROR, COLOR_NORMAL};

pub fn tone_color(tone: Tone) -> &'static str {
    match tone {
        Tone::Normal => COLOR_NORMAL,
        Tone::Error => COLOR_ERROR,
    }
}

/// Whole-number percentage for a progress fraction.
pub fn progress_percent(progress: f32) -> u8 {
    (progress.clamp(0.0, 1.0) * 100.0).round() as u8
}

pub fn file_row_label(row: &FileRowView) -> String {
    match &row.failure {
        Some(reason) => format!("{}: {}", row.name, reason),
        None if row.staged => format!("{} (ready)", row.name),
        None => format!("{} ({}%)", row.name, progress_percent(row.progress)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(progress: f32, staged: bool, failure: Option<&str>) -> FileRowView {
        FileRowView {
            name: "sample.bam".to_string(),
            progress,
            staged,
            failure: failure.map(str::to_string),
        }
    }

    #[test]
    fn error_tone_is_red() {
        assert_eq!(tone_color(Tone::Error), "red");
        assert_eq!(tone_color(Tone::Normal), "black");
    }

    #[test]
    fn percent_rounds_and_clamps() {
        assert_eq!(progress_percent(0.0), 0);
        assert_eq!(progress_percent(0.666), 67);
        assert_eq!(progress_percent(1.5), 100);
    }

    #[test]
    fn row_label_prefers_failure_then_ready() {
        assert_eq!(file_row_label(&row(0.25, false, None)), "sample.bam (25%)");
        assert_eq!(file_row_label(&row(1.0, true, None)), "sample.bam (ready)");
        assert_eq!(
            file_row_label(&row(0.5, false, Some("permission denied"))),
            "sample.bam: permission denied"
        );
    }
}
