use std::fs;
use std::path::Path;

use bamcheck_logging::{bamcheck_debug, bamcheck_warn};

use crate::CheckError;

/// Strips the final extension from an index file name.
///
/// `sample.bai` yields `sample` and `sample.bam.bai` yields `sample.bam`, so both
/// index naming conventions match their data file by prefix.
pub fn index_stem(index_name: &str) -> &str {
    match index_name.rfind('.') {
        Some(dot) if dot > 0 => &index_name[..dot],
        _ => index_name,
    }
}

/// Checks that `index` belongs to `data` and is not older than it.
///
/// The name check runs before any filesystem access. On success returns the
/// size of the data file in bytes.
pub fn check_pair(data: &Path, index: &Path) -> Result<u64, CheckError> {
    let data_name = base_name(data);
    let index_name = base_name(index);
    let stem = index_stem(&index_name);

    if !data_name.starts_with(stem) {
        bamcheck_warn!("Name mismatch data={} index={}", data_name, index_name);
        return Err(CheckError::NameMismatch {
            data_name,
            stem: stem.to_string(),
        });
    }

    let data_meta = fs::metadata(data).map_err(|e| CheckError::unreadable(data, e))?;
    let index_meta = fs::metadata(index).map_err(|e| CheckError::unreadable(index, e))?;
    let data_mtime = data_meta
        .modified()
        .map_err(|e| CheckError::unreadable(data, e))?;
    let index_mtime = index_meta
        .modified()
        .map_err(|e| CheckError::unreadable(index, e))?;

    // Equal timestamps are fine; only a strictly older index is stale.
    if index_mtime < data_mtime {
        bamcheck_warn!("Stale index data={} index={}", data_name, index_name);
        return Err(CheckError::StaleIndex {
            data_name,
            index_name,
        });
    }

    bamcheck_debug!("Pair ok data={} bytes={}", data_name, data_meta.len());
    Ok(data_meta.len())
}

fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
