use std::path::PathBuf;
use std::time::Instant;

use bamcheck_logging::{bamcheck_info, bamcheck_warn};

use crate::{check_pair, count_lines, CheckError};

/// Files needed by one check run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckRequest {
    pub data: PathBuf,
    pub index: PathBuf,
    pub region: Option<PathBuf>,
}

#[derive(Debug)]
pub struct CheckOutcome {
    pub data: Result<u64, CheckError>,
    pub regions: Option<Result<usize, CheckError>>,
}

/// Counts regions (when a region file is given) and validates the data/index pair.
pub fn run_check(request: &CheckRequest) -> CheckOutcome {
    let started = Instant::now();

    let regions = request.region.as_deref().map(count_lines);
    if let Some(Err(err)) = &regions {
        bamcheck_warn!("Region count failed: {}", err);
    }

    let data = check_pair(&request.data, &request.index);
    match &data {
        Ok(bytes) => bamcheck_info!(
            "Checked {:?}: {} bytes in {:?}",
            request.data,
            bytes,
            started.elapsed()
        ),
        Err(err) => bamcheck_warn!("Check of {:?} failed: {}", request.data, err),
    }

    CheckOutcome { data, regions }
}
