use crate::view_model::format_megabytes;
use crate::{classify, AppState, CheckReport, Effect, Msg, StatusLine};

/// Shown when confirm is pressed without every required file in the batch.
pub const MISSING_FILES_MESSAGE: &str =
    "All required files must be selected: BAM, BAI, FASTA and FAI";

/// Shown in the region field when the confirmed batch has no region file.
pub const REGION_OPTIONAL_MESSAGE: &str = "A BED region file can optionally be added";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::SelectionChanged(selection) => {
            let files = selection.unwrap_or_default();
            state.replace_selection(files.clone());
            if files.is_empty() {
                Vec::new()
            } else {
                vec![Effect::BeginUpload {
                    batch: state.batch(),
                    files,
                }]
            }
        }
        Msg::UploadProgress {
            batch,
            position,
            file_name,
            progress,
        } => {
            if batch == state.batch() {
                state.apply_progress(position, &file_name, progress);
            }
            Vec::new()
        }
        Msg::FileStaged {
            batch,
            position,
            file_name,
            path,
        } => {
            if batch == state.batch() {
                state.apply_staged(position, &file_name, path);
            }
            Vec::new()
        }
        Msg::UploadFailed {
            batch,
            position,
            file_name,
            message,
        } => {
            if batch == state.batch()
                && state.apply_upload_failure(position, &file_name, &message)
            {
                state.set_status(StatusLine::error(format!(
                    "Upload failed for {file_name}: {message}"
                )));
            }
            Vec::new()
        }
        Msg::ConfirmClicked => {
            if !state.can_confirm() {
                return (state, Vec::new());
            }
            match classify(&state.picked_files(), state.extensions()) {
                Err(_missing) => {
                    state.set_status(StatusLine::error(MISSING_FILES_MESSAGE));
                    Vec::new()
                }
                Ok(request) => {
                    state.clear_results();
                    if request.region.is_none() {
                        state.set_region_status(StatusLine::normal(REGION_OPTIONAL_MESSAGE));
                    }
                    state.set_checking(true);
                    vec![Effect::RunCheck {
                        batch: state.batch(),
                        request,
                    }]
                }
            }
        }
        Msg::CheckFinished { batch, report } => {
            if batch == state.batch() && state.is_checking() {
                apply_report(&mut state, report);
            }
            Vec::new()
        }
        Msg::ClearClicked => {
            let had_work = !state.files().is_empty() || state.is_checking();
            state.reset();
            if had_work {
                vec![Effect::CancelUploads {
                    batch: state.batch(),
                }]
            } else {
                Vec::new()
            }
        }
    };

    (state, effects)
}

fn apply_report(state: &mut AppState, report: CheckReport) {
    state.set_checking(false);

    let status = match report.data {
        Ok(bytes) => StatusLine::normal(format!("Data file size: {}", format_megabytes(bytes))),
        Err(failure) => StatusLine::error(failure.message),
    };
    state.set_status(status);

    match report.regions {
        Some(Ok(count)) => {
            state.set_region_status(StatusLine::normal(format!("Regions to analyze: {count}")))
        }
        Some(Err(failure)) => state.set_region_status(StatusLine::error(failure.message)),
        None => {}
    }
}
