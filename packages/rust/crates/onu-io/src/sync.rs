//! Synchronous file operations.
//!
//! Each batch unit reads, backs up and writes its own file, so everything
//! here is blocking `std::fs`.

use std::ffi::OsString;
use std::fs as std_fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::decode::decode_lossy;
use crate::error::IoError;

/// Suffix appended to the original file name for backups.
pub const BACKUP_SUFFIX: &str = ".bak";

/// Read text from a file with a size check, dropping undecodable bytes.
///
/// # Errors
/// `NotFound` when the file is missing, `TooLarge` above `max_bytes`,
/// `System` for any other read failure.
///
/// # Example
///
/// ```rust,ignore
/// use onu_io::read_text_lossy;
///
/// let content = read_text_lossy("configs/olt-01.txt", 1024 * 1024)?;
/// ```
pub fn read_text_lossy<P: AsRef<Path>>(path: P, max_bytes: u64) -> Result<String, IoError> {
    let path = path.as_ref();

    let metadata = std_fs::metadata(path)
        .map_err(|_| IoError::NotFound(path.to_string_lossy().to_string()))?;

    if metadata.len() > max_bytes {
        return Err(IoError::TooLarge(metadata.len(), max_bytes));
    }

    let mut file = std_fs::File::open(path)?;
    let mut buffer = Vec::with_capacity(usize::try_from(metadata.len()).unwrap_or_default());
    file.read_to_end(&mut buffer)?;

    Ok(decode_lossy(buffer))
}

/// Sibling backup path: `olt-01.txt` becomes `olt-01.txt.bak`.
#[must_use]
pub fn backup_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_default();
    name.push(BACKUP_SUFFIX);
    path.with_file_name(name)
}

/// Copy the file's raw bytes to its `.bak` sibling.
///
/// An existing backup is overwritten.
///
/// # Errors
/// `NotFound` when the source is missing, `System` when the copy fails.
pub fn write_backup<P: AsRef<Path>>(path: P) -> Result<PathBuf, IoError> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(IoError::NotFound(path.to_string_lossy().to_string()));
    }
    let backup = backup_path_for(path);
    std_fs::copy(path, &backup)?;
    tracing::debug!(source = %path.display(), backup = %backup.display(), "backup written");
    Ok(backup)
}

/// Write text to `path`, creating parent directories first.
///
/// # Errors
/// `System` when a directory cannot be created or the write fails.
pub fn write_text<P: AsRef<Path>>(path: P, text: &str) -> Result<(), IoError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std_fs::create_dir_all(parent)?;
    }
    std_fs::write(path, text)?;
    Ok(())
}
