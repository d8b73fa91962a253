//! CSV outcome log.

use std::fs;
use std::path::Path;

use crate::error::RewriteError;
use crate::types::OutcomeRecord;

/// Header row of the outcome log.
pub const LOG_HEADER: [&str; 5] = ["filename", "interface", "old_name", "new_name", "status"];

/// Write `records` as CSV to `path`, header first.
///
/// The header is written even when there are no records. The parent
/// directory is created when missing.
///
/// # Errors
/// `Io` when the parent directory cannot be created, `Log` on write failure.
pub fn write_outcome_log(path: &Path, records: &[OutcomeRecord]) -> Result<(), RewriteError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(onu_io::IoError::from)?;
    }

    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(LOG_HEADER)?;
    for record in records {
        writer.write_record([
            record.file.as_str(),
            record.interface.as_str(),
            record.old_name.as_str(),
            record.new_name.as_str(),
            record.status.as_str(),
        ])?;
    }
    writer.flush().map_err(csv::Error::from)?;

    tracing::info!(path = %path.display(), rows = records.len(), "outcome log written");
    Ok(())
}
