#![allow(missing_docs)]

//! onu-rewrite CLI: batch rewrite of OLT provisioning scripts.
//!
//! Logging: set `RUST_LOG=onu_rewrite=debug` to see per-block decisions on
//! stderr.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::json;
use tracing_subscriber::EnvFilter;

use onu_rewrite::{
    BatchReport, DEFAULT_MAX_NAME_LEN, RewriteSettings, build_canonical_name, load_settings,
    rewrite_batch, write_outcome_log,
};

#[derive(Parser, Debug)]
#[command(
    name = "onu-rewrite",
    version,
    about = "Normalize ONU interface names and inject TR-069 management into OLT scripts",
    arg_required_else_help = true
)]
struct Cli {
    /// Settings file (YAML). Defaults to `onu-rewrite.yaml` when present.
    #[arg(long = "config", short = 'c', value_name = "FILE", global = true)]
    config_file: Option<PathBuf>,

    /// Output format.
    #[arg(long, short = 'o', value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    /// Debug logging (overridden by RUST_LOG).
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rewrite every matching script in the input directory.
    Run {
        /// Directory holding the scripts.
        #[arg(long, short = 'i', value_name = "DIR")]
        input: Option<PathBuf>,
        /// Directory receiving rewritten scripts.
        #[arg(long, value_name = "DIR")]
        output: Option<PathBuf>,
        /// CSV outcome log path.
        #[arg(long, value_name = "FILE")]
        log: Option<PathBuf>,
        /// File name glob selecting inputs.
        #[arg(long, value_name = "GLOB")]
        pattern: Option<String>,
        /// Parallel workers (0 = one per core).
        #[arg(long, short = 'j')]
        workers: Option<usize>,
        /// Upper bound for canonical names.
        #[arg(long)]
        max_name_len: Option<usize>,
        /// Print diffs; write nothing.
        #[arg(long, default_value_t = false)]
        dry_run: bool,
        /// Do not write `.bak` copies of the inputs.
        #[arg(long, default_value_t = false)]
        no_backup: bool,
    },
    /// Print the canonical name for a base label and slot/port code.
    Name {
        base: String,
        code: String,
        #[arg(long)]
        max_len: Option<usize>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings =
        load_settings(cli.config_file.as_deref()).context("failed to load settings")?;

    match cli.command {
        Command::Run {
            input,
            output,
            log,
            pattern,
            workers,
            max_name_len,
            dry_run,
            no_backup,
        } => {
            let overlay = RewriteSettings {
                input_dir: input,
                output_dir: output,
                log_path: log,
                file_pattern: pattern,
                workers,
                max_name_len,
                backup: no_backup.then_some(false),
                ..Default::default()
            };
            run(&settings.merge(overlay), dry_run, cli.format)
        }
        Command::Name {
            base,
            code,
            max_len,
        } => {
            let max_len = max_len
                .or(settings.max_name_len)
                .unwrap_or(DEFAULT_MAX_NAME_LEN);
            let name = build_canonical_name(&base, &code, max_len);
            match cli.format {
                OutputFormat::Text => println!("{name}"),
                OutputFormat::Json => println!(
                    "{}",
                    json!({ "base": base, "code": code, "max_len": max_len, "name": name })
                ),
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose {
            "onu_rewrite=debug,onu_io=debug"
        } else {
            "onu_rewrite=info,onu_io=info"
        })
    });
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(settings: &RewriteSettings, dry_run: bool, format: OutputFormat) -> Result<ExitCode> {
    let mut config = settings.batch_config();
    config.dry_run = dry_run;

    let report = rewrite_batch(&config)
        .with_context(|| format!("batch over {} failed", config.input_dir.display()))?;

    let log_path = settings.resolved_log_path();
    if !dry_run {
        write_outcome_log(&log_path, &report.outcomes)
            .with_context(|| format!("failed to write {}", log_path.display()))?;
    }

    match format {
        OutputFormat::Text => print_text(&report, (!dry_run).then_some(log_path.as_path())),
        OutputFormat::Json => {
            let payload = json!({
                "dry_run": dry_run,
                "log": (!dry_run).then(|| log_path.display().to_string()),
                "report": report,
            });
            println!(
                "{}",
                serde_json::to_string_pretty(&payload).context("failed to encode report")?
            );
        }
    }

    Ok(if report.has_errors() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn print_text(report: &BatchReport, log_path: Option<&Path>) {
    for preview in report.previews.values() {
        print!("{preview}");
    }
    println!(
        "scanned: {}  changed: {}  renamed: {}  skipped: {}  failed: {}",
        report.files_scanned,
        report.files_changed,
        report.renamed(),
        report.skipped(),
        report.errors.len()
    );
    for (path, error) in &report.errors {
        println!("FAILED {path}: {error}");
    }
    if let Some(path) = log_path {
        println!("log: {}", path.display());
    }
}
