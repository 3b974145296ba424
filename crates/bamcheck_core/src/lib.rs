//! Bamcheck core: pure state machine, batch classification and view-model helpers.
mod classify;
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use classify::{classify, FileRole, MissingRoles, ResolvedBatch, RoleExtensions};
pub use effect::Effect;
pub use msg::Msg;
pub use state::{
    AppState, BatchId, CheckFailure, CheckReport, FailureKind, PickedFile, StatusLine, Tone,
    TrackedFile,
};
pub use update::{update, MISSING_FILES_MESSAGE, REGION_OPTIONAL_MESSAGE};
pub use view_model::{format_megabytes, AppViewModel, FileRowView};
