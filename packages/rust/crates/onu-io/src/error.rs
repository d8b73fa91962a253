//! Error types for file I/O operations.

use thiserror::Error;

/// Error types for file I/O operations.
#[derive(Error, Debug)]
pub enum IoError {
    /// File or directory does not exist.
    #[error("File not found: {0}")]
    NotFound(String),

    /// File exceeds size limit.
    #[error("File too large: {0} bytes (limit: {1})")]
    TooLarge(u64, u64),

    /// Input file pattern is not a valid glob.
    #[error("Invalid file pattern: {0}")]
    Pattern(String),

    /// Low-level I/O error from std::io.
    #[error("IO error: {0}")]
    System(#[from] std::io::Error),
}
