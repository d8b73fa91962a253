//! Error types for rewrite operations.
//!
//! Malformed blocks are never errors (they become `SKIP` outcomes); only
//! I/O, log persistence and configuration can fail.

use onu_io::IoError;
use thiserror::Error;

/// Error types for the rewrite pipeline and batch runner.
#[derive(Error, Debug)]
pub enum RewriteError {
    /// File I/O error (reading, backing up or writing a script).
    #[error("IO error: {0}")]
    Io(#[from] IoError),

    /// Writing the CSV outcome log failed.
    #[error("Log error: {0}")]
    Log(#[from] csv::Error),

    /// Settings file could not be read or parsed.
    #[error("Settings error: {0}")]
    Settings(String),

    /// Worker pool could not be started.
    #[error("Worker pool error: {0}")]
    WorkerPool(String),
}
