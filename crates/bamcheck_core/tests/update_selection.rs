use std::path::PathBuf;
use std::sync::Once;

use bamcheck_core::{update, AppState, Effect, Msg, PickedFile, StatusLine, Tone};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(bamcheck_logging::initialize_for_tests);
}

fn picked(names: &[&str]) -> Vec<PickedFile> {
    names
        .iter()
        .map(|name| PickedFile::new(*name, format!("/data/{name}")))
        .collect()
}

fn select(state: AppState, names: &[&str]) -> (AppState, Vec<Effect>) {
    update(state, Msg::SelectionChanged(Some(picked(names))))
}

fn progress(batch: u64, position: usize, file_name: &str, progress: f32) -> Msg {
    Msg::UploadProgress {
        batch,
        position,
        file_name: file_name.to_string(),
        progress,
    }
}

#[test]
fn selection_lists_files_and_begins_upload() {
    init_logging();
    let (mut state, effects) = select(AppState::new(), &["sample.bam", "sample.bai"]);
    let view = state.view();

    assert_eq!(state.batch(), 1);
    assert!(view.confirm_enabled);
    assert_eq!(view.files.len(), 2);
    assert!(view.files.iter().all(|row| row.progress == 0.0));
    assert!(state.consume_dirty());
    assert_eq!(
        effects,
        vec![Effect::BeginUpload {
            batch: 1,
            files: picked(&["sample.bam", "sample.bai"]),
        }]
    );
}

#[test]
fn cancelled_dialog_clears_list_and_disables_confirm() {
    init_logging();
    let (state, _) = select(AppState::new(), &["sample.bam"]);
    let (state, effects) = update(state, Msg::SelectionChanged(None));

    assert!(effects.is_empty());
    assert!(state.view().files.is_empty());
    assert!(!state.view().confirm_enabled);

    let (state, effects) = update(state, Msg::SelectionChanged(Some(Vec::new())));
    assert!(effects.is_empty());
    assert!(!state.view().confirm_enabled);
}

#[test]
fn progress_is_monotonic_and_clamped() {
    init_logging();
    let (state, _) = select(AppState::new(), &["sample.bam", "sample.bai"]);
    let batch = state.batch();

    let (state, _) = update(state, progress(batch, 0, "sample.bam", 0.5));
    let (mut state, _) = update(state, progress(batch, 0, "sample.bam", 0.25));
    assert_eq!(state.view().files[0].progress, 0.5);
    assert!(state.consume_dirty());

    let (mut state, _) = update(state, progress(batch, 0, "sample.bam", 0.4));
    assert!(!state.consume_dirty());

    let (state, _) = update(state, progress(batch, 0, "sample.bam", 7.0));
    assert_eq!(state.view().files[0].progress, 1.0);
    assert_eq!(state.view().files[1].progress, 0.0);

    let (state, _) = update(state, progress(batch, 1, "sample.bai", f32::NAN));
    assert_eq!(state.view().files[1].progress, 0.0);
}

#[test]
fn progress_for_unknown_file_or_old_batch_is_dropped() {
    init_logging();
    let (state, _) = select(AppState::new(), &["sample.bam"]);
    let old_batch = state.batch();
    let (mut state, _) = select(state, &["sample.bam"]);
    state.consume_dirty();

    let (mut state, _) = update(state, progress(old_batch, 0, "sample.bam", 0.9));
    assert_eq!(state.view().files[0].progress, 0.0);
    assert!(!state.consume_dirty());

    let batch = state.batch();
    let (mut state, _) = update(state, progress(batch, 0, "other.bam", 0.9));
    assert!(!state.consume_dirty());
}

#[test]
fn staged_file_replaces_path_and_completes_progress() {
    init_logging();
    let (state, _) = select(AppState::new(), &["sample.bam"]);
    let batch = state.batch();
    let staged = PathBuf::from("/staging/session/sample.bam");

    let (state, _) = update(
        state,
        Msg::FileStaged {
            batch,
            position: 0,
            file_name: "sample.bam".to_string(),
            path: staged.clone(),
        },
    );

    let file = &state.files()[0];
    assert_eq!(file.path, staged);
    assert!(file.staged);
    assert_eq!(file.progress, 1.0);
}

#[test]
fn same_name_rows_are_updated_by_position() {
    init_logging();
    let files = vec![
        PickedFile::new("sample.bam", "/run1/sample.bam"),
        PickedFile::new("sample.bam", "/run2/sample.bam"),
    ];
    let (state, _) = update(AppState::new(), Msg::SelectionChanged(Some(files)));
    let batch = state.batch();

    let (state, _) = update(
        state,
        Msg::FileStaged {
            batch,
            position: 1,
            file_name: "sample.bam".to_string(),
            path: PathBuf::from("/staging/batch-1/1/sample.bam"),
        },
    );
    let (state, _) = update(state, progress(batch, 0, "sample.bam", 0.5));

    let rows = state.files();
    assert_eq!(rows[0].path, PathBuf::from("/run1/sample.bam"));
    assert!(!rows[0].staged);
    assert_eq!(rows[0].progress, 0.5);
    assert_eq!(rows[1].path, PathBuf::from("/staging/batch-1/1/sample.bam"));
    assert!(rows[1].staged);
    assert_eq!(rows[1].progress, 1.0);
}

#[test]
fn position_with_a_different_name_is_dropped() {
    init_logging();
    let (mut state, _) = select(AppState::new(), &["sample.bam", "sample.bai"]);
    let batch = state.batch();
    state.consume_dirty();

    let (mut state, _) = update(
        state,
        Msg::UploadFailed {
            batch,
            position: 0,
            file_name: "sample.bai".to_string(),
            message: "boom".to_string(),
        },
    );

    assert!(!state.consume_dirty());
    assert!(state.view().files.iter().all(|row| row.failure.is_none()));
    assert_eq!(state.view().status, None);

    let (mut state, _) = update(state, progress(batch, 5, "sample.bam", 0.5));
    assert!(!state.consume_dirty());
}

#[test]
fn upload_failure_marks_row_and_reports_error() {
    init_logging();
    let (state, _) = select(AppState::new(), &["sample.bam"]);
    let batch = state.batch();

    let (state, _) = update(
        state,
        Msg::UploadFailed {
            batch,
            position: 0,
            file_name: "sample.bam".to_string(),
            message: "permission denied".to_string(),
        },
    );

    let view = state.view();
    assert_eq!(view.files[0].failure.as_deref(), Some("permission denied"));
    assert_eq!(
        view.status,
        Some(StatusLine::error(
            "Upload failed for sample.bam: permission denied"
        ))
    );
    assert_eq!(view.status.map(|s| s.tone), Some(Tone::Error));
}

#[test]
fn clear_resets_everything_and_cancels_uploads() {
    init_logging();
    let (state, _) = select(AppState::new(), &["sample.bam"]);
    let batch = state.batch();
    let (state, _) = update(state, progress(batch, 0, "sample.bam", 0.3));
    let (state, _) = update(state, Msg::ConfirmClicked);
    assert!(state.view().status.is_some());

    let (mut state, effects) = update(state, Msg::ClearClicked);
    let view = state.view();

    assert_eq!(effects, vec![Effect::CancelUploads { batch: batch + 1 }]);
    assert!(view.files.is_empty());
    assert!(!view.confirm_enabled);
    assert_eq!(view.status, None);
    assert_eq!(view.region_status, None);
    assert!(state.consume_dirty());

    let (mut state, _) = update(state, progress(batch, 0, "sample.bam", 0.9));
    assert!(!state.consume_dirty());
}

#[test]
fn clear_on_empty_state_emits_nothing() {
    init_logging();
    let (_state, effects) = update(AppState::new(), Msg::ClearClicked);
    assert!(effects.is_empty());
}
