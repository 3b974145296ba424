//! Bamcheck engine: filesystem checks and upload staging.
mod check;
mod count;
mod engine;
mod persist;
mod stage;
mod types;
mod validate;

pub use check::{run_check, CheckOutcome, CheckRequest};
pub use count::count_lines;
pub use engine::{EngineConfig, EngineHandle};
pub use persist::{ensure_staging_dir, purge_stale_batches};
pub use stage::{stage_file, ChannelProgressSink, ProgressSink, StageRequest};
pub use types::{BatchId, CheckError, EngineEvent, StageError, UploadProgress};
pub use validate::{check_pair, index_stem};
