use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::CheckError;

/// Counts newline-terminated records in a text file.
///
/// A trailing record without a final newline still counts. Content is
/// handled as raw bytes, so invalid UTF-8 does not fail the count.
pub fn count_lines(path: &Path) -> Result<usize, CheckError> {
    let file = File::open(path).map_err(|e| CheckError::unreadable(path, e))?;
    let mut reader = BufReader::new(file);
    let mut line = Vec::new();
    let mut count = 0;
    loop {
        line.clear();
        let read = reader
            .read_until(b'\n', &mut line)
            .map_err(|e| CheckError::unreadable(path, e))?;
        if read == 0 {
            break;
        }
        count += 1;
    }
    Ok(count)
}
