//! Batch rewriting across a directory of scripts.
//!
//! Every input file is one unit of work (read → backup → rewrite → write) on
//! a bounded rayon pool. Units share nothing mutable: each returns its own
//! outcome list and the results are merged once the pool is done. A failing
//! unit is recorded in [`BatchReport::errors`] and the batch carries on.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use onu_io::{DiscoverOptions, IoError, discover_inputs, read_text_lossy, write_backup, write_text};
use rayon::prelude::*;
use serde::Serialize;

use crate::diff::generate_unified_diff;
use crate::error::RewriteError;
use crate::pipeline::RewritePipeline;
use crate::types::{OutcomeRecord, OutcomeStatus, RewriteConfig};

/// Configuration for a batch run.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Directory holding the input scripts.
    pub input_dir: PathBuf,
    /// Directory receiving rewritten scripts (created when absent).
    pub output_dir: PathBuf,
    /// File name glob selecting inputs (e.g., `*.txt`).
    pub file_pattern: String,
    /// Number of parallel workers (0 = auto-detect)
    pub workers: usize,
    /// Rewrite in memory only and collect diffs instead of writing.
    pub dry_run: bool,
    /// Write `<name>.bak` next to each input before rewriting.
    pub backup: bool,
    /// Maximum input size in bytes; larger files fail their unit.
    pub max_file_size: u64,
    /// Document rewrite parameters.
    pub rewrite: RewriteConfig,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("configs"),
            output_dir: PathBuf::from("output"),
            file_pattern: "*.txt".to_string(),
            workers: 0,
            dry_run: false,
            backup: true,
            max_file_size: 8 * 1024 * 1024, // 8MB
            rewrite: RewriteConfig::default(),
        }
    }
}

/// Aggregated result of a batch run.
#[derive(Debug, Default, Serialize)]
pub struct BatchReport {
    /// Number of input files found
    pub files_scanned: usize,
    /// Number of files whose text changed
    pub files_changed: usize,
    /// Outcome records of every processed file, in file order
    pub outcomes: Vec<OutcomeRecord>,
    /// Failed files (path -> error message)
    pub errors: BTreeMap<String, String>,
    /// Dry-run diffs (file name -> unified diff), changed files only
    pub previews: BTreeMap<String, String>,
}

impl BatchReport {
    /// Number of renamed interfaces.
    #[must_use]
    pub fn renamed(&self) -> usize {
        self.count(OutcomeStatus::Ok)
    }

    /// Number of skipped interfaces.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.count(OutcomeStatus::Skip)
    }

    /// True when at least one file failed.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    fn count(&self, status: OutcomeStatus) -> usize {
        self.outcomes.iter().filter(|o| o.status == status).count()
    }
}

/// Result of one unit of work.
struct FileRewrite {
    label: String,
    outcomes: Vec<OutcomeRecord>,
    changed: bool,
    preview: Option<String>,
}

/// Rewrite every matching file under `config.input_dir`.
///
/// # Errors
/// Only batch-level failures: input discovery, creating the output
/// directory, or starting the worker pool. Per-file failures end up in
/// [`BatchReport::errors`].
pub fn rewrite_batch(config: &BatchConfig) -> Result<BatchReport, RewriteError> {
    let options = DiscoverOptions {
        pattern: config.file_pattern.clone(),
        skip_hidden: true,
    };
    let files = discover_inputs(&config.input_dir, &options)?;

    if !config.dry_run {
        fs::create_dir_all(&config.output_dir).map_err(IoError::from)?;
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.workers)
        .build()
        .map_err(|e| RewriteError::WorkerPool(e.to_string()))?;

    tracing::info!(
        input = %config.input_dir.display(),
        files = files.len(),
        workers = pool.current_num_threads(),
        dry_run = config.dry_run,
        "batch started"
    );

    let pipeline = RewritePipeline::new(config.rewrite.clone());
    let results: Vec<(PathBuf, Result<FileRewrite, RewriteError>)> = pool.install(|| {
        files
            .par_iter()
            .map(|path| (path.clone(), rewrite_file(path, config, &pipeline)))
            .collect()
    });

    let mut report = BatchReport {
        files_scanned: files.len(),
        ..BatchReport::default()
    };

    for (path, result) in results {
        match result {
            Ok(file) => {
                if file.changed {
                    report.files_changed += 1;
                }
                if let Some(preview) = file.preview
                    && !preview.is_empty()
                {
                    report.previews.insert(file.label, preview);
                }
                report.outcomes.extend(file.outcomes);
            }
            Err(error) => {
                tracing::warn!(path = %path.display(), error = %error, "file failed");
                report.errors.insert(path.display().to_string(), error.to_string());
            }
        }
    }

    tracing::info!(
        scanned = report.files_scanned,
        changed = report.files_changed,
        renamed = report.renamed(),
        skipped = report.skipped(),
        failed = report.errors.len(),
        "batch finished"
    );

    Ok(report)
}

fn rewrite_file(
    path: &Path,
    config: &BatchConfig,
    pipeline: &RewritePipeline,
) -> Result<FileRewrite, RewriteError> {
    let label = file_label(path);
    let text = read_text_lossy(path, config.max_file_size)?;

    if config.backup && !config.dry_run {
        write_backup(path)?;
    }

    let result = pipeline.rewrite(&text, &label);

    let preview = if config.dry_run {
        Some(generate_unified_diff(&label, &text, &result.text))
    } else {
        write_text(config.output_dir.join(&label), &result.text)?;
        None
    };

    tracing::info!(
        file = %label,
        interfaces = result.outcomes.len(),
        changed = result.changed,
        "file processed"
    );

    Ok(FileRewrite {
        label,
        outcomes: result.outcomes,
        changed: result.changed,
        preview,
    })
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
