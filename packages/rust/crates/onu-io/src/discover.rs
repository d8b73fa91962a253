//! Input discovery for a batch run.
//!
//! Lists one directory (no recursion). Backups written next to the inputs
//! end in `.bak`, so the default `*.txt` pattern never picks them up again.
//! Sizes are not checked here; the reader enforces its own limit.

use std::fs;
use std::path::{Path, PathBuf};

use globset::{Glob, GlobMatcher};

use crate::error::IoError;

/// Options for input discovery.
#[derive(Debug, Clone)]
pub struct DiscoverOptions {
    /// Glob matched against the file name (e.g., `*.txt`)
    pub pattern: String,
    /// Skip dot-files
    pub skip_hidden: bool,
}

impl Default for DiscoverOptions {
    fn default() -> Self {
        Self {
            pattern: "*.txt".to_string(),
            skip_hidden: true,
        }
    }
}

/// Discover input files directly inside `dir`, sorted by path.
///
/// # Errors
/// `NotFound` when `dir` is not a directory, `Pattern` for an invalid glob,
/// `System` when the directory cannot be listed.
pub fn discover_inputs(dir: &Path, options: &DiscoverOptions) -> Result<Vec<PathBuf>, IoError> {
    if !dir.is_dir() {
        return Err(IoError::NotFound(dir.to_string_lossy().to_string()));
    }

    let matcher = compile_pattern(&options.pattern)?;
    let mut files = Vec::new();

    for entry in fs::read_dir(dir)?.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let Some(name) = path.file_name() else {
            continue;
        };

        if options.skip_hidden && name.to_string_lossy().starts_with('.') {
            continue;
        }
        if !matcher.is_match(name) {
            continue;
        }

        tracing::trace!(path = %path.display(), "input discovered");
        files.push(path);
    }

    files.sort();
    Ok(files)
}

fn compile_pattern(pattern: &str) -> Result<GlobMatcher, IoError> {
    Glob::new(pattern)
        .map(|glob| glob.compile_matcher())
        .map_err(|e| IoError::Pattern(format!("{pattern}: {e}")))
}
