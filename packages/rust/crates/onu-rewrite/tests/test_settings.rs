//! Tests for settings loading and resolution.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use onu_rewrite::{RewriteError, RewriteSettings, load_settings};

#[test]
fn test_explicit_file() {
    let dir = TempDir::new().expect("Create temp dir");
    let path = dir.path().join("site.yaml");
    fs::write(
        &path,
        "input_dir: scripts\noutput_dir: rewritten\nlog_path: logs/run.csv\n\
         file_pattern: \"*.cfg\"\nworkers: 3\nbackup: false\n\
         tr069:\n  acs_url: http://10.0.0.1:7547\n",
    )
    .expect("Write settings");

    let settings = load_settings(Some(&path)).expect("Load settings");
    let config = settings.batch_config();

    assert_eq!(config.input_dir, PathBuf::from("scripts"));
    assert_eq!(config.output_dir, PathBuf::from("rewritten"));
    assert_eq!(config.file_pattern, "*.cfg");
    assert_eq!(config.workers, 3);
    assert!(!config.backup);
    assert!(!config.dry_run);
    assert_eq!(config.rewrite.tr069.acs_url, "http://10.0.0.1:7547");
    assert_eq!(config.rewrite.tr069.vlan, 100);
    assert_eq!(settings.resolved_log_path(), PathBuf::from("logs/run.csv"));
}

#[test]
fn test_missing_explicit_file() {
    let dir = TempDir::new().expect("Create temp dir");
    let result = load_settings(Some(&dir.path().join("absent.yaml")));
    assert!(matches!(result, Err(RewriteError::Settings(_))));
}

#[test]
fn test_malformed_explicit_file() {
    let dir = TempDir::new().expect("Create temp dir");
    let path = dir.path().join("bad.yaml");
    fs::write(&path, "max_name_len: [1, 2]\n").expect("Write settings");

    let Err(RewriteError::Settings(message)) = load_settings(Some(&path)) else {
        panic!("expected settings error");
    };
    assert!(message.contains("bad.yaml"));
}

#[test]
fn test_cli_overlay_on_file() {
    let file = RewriteSettings::from_yaml_str("workers: 8\nbackup: false\n").expect("Parse yaml");
    let cli = RewriteSettings {
        workers: Some(2),
        output_dir: Some(PathBuf::from("out")),
        ..Default::default()
    };

    let config = file.merge(cli).batch_config();

    assert_eq!(config.workers, 2);
    assert!(!config.backup);
    assert_eq!(config.output_dir, PathBuf::from("out"));
    assert_eq!(config.input_dir, PathBuf::from("configs"));
}
