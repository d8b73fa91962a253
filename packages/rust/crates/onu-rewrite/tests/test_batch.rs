//! Tests for batch rewriting over a directory.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use onu_rewrite::{BatchConfig, OutcomeRecord, OutcomeStatus, rewrite_batch, write_outcome_log};

fn script(onu: &str, name: &str, code: &str) -> String {
    format!(
        "interface {onu}\n  name {name}\n  description ODP-SITE-{code}\n!\n\
         pon-onu-mng {onu}\n  wan-ip 1 mode pppoe user old password old\n  vlan port wifi_0/1 mode tag vlan 10\n!\n"
    )
}

fn seed(dir: &Path, count: usize) {
    fs::create_dir_all(dir).expect("Create input dir");
    for idx in 0..count {
        let body = script(
            &format!("gpon-onu_1/1/{idx}:1"),
            &format!("CUSTOMER-{idx}"),
            &format!("{idx}/1"),
        );
        fs::write(dir.join(format!("olt-{idx:02}.txt")), body).expect("Write script");
    }
    fs::write(dir.join("README.md"), "not a script\n").expect("Write readme");
}

fn config(root: &Path, output: &str, workers: usize) -> BatchConfig {
    BatchConfig {
        input_dir: root.join("configs"),
        output_dir: root.join(output),
        workers,
        ..Default::default()
    }
}

#[test]
fn test_batch_writes_outputs_and_backups() {
    let dir = TempDir::new().expect("Create temp dir");
    let input = dir.path().join("configs");
    seed(&input, 3);
    let original = fs::read_to_string(input.join("olt-01.txt")).expect("Read input");

    let report = rewrite_batch(&config(dir.path(), "output", 2)).expect("Run batch");

    assert_eq!(report.files_scanned, 3);
    assert_eq!(report.files_changed, 3);
    assert_eq!(report.renamed(), 3);
    assert_eq!(report.skipped(), 0);
    assert!(!report.has_errors());

    // Input untouched, backup verbatim, output rewritten.
    assert_eq!(fs::read_to_string(input.join("olt-01.txt")).expect("Read input"), original);
    assert_eq!(
        fs::read_to_string(input.join("olt-01.txt.bak")).expect("Read backup"),
        original
    );
    let output = fs::read_to_string(dir.path().join("output").join("olt-01.txt"))
        .expect("Read output");
    assert!(output.contains("  name JMP-CUSTOMER-1-1/1\n"));
    assert!(output.contains("user JMP-CUSTOMER-1-1/1 password JMP-CUSTOMER-1-1/1"));
    assert!(output.contains("  tr069-mgmt 1 state unlock\n"));
    assert!(!dir.path().join("output").join("README.md").exists());
}

#[test]
fn test_dry_run_writes_nothing() {
    let dir = TempDir::new().expect("Create temp dir");
    let input = dir.path().join("configs");
    seed(&input, 2);

    let mut cfg = config(dir.path(), "output", 0);
    cfg.dry_run = true;
    let report = rewrite_batch(&cfg).expect("Run batch");

    assert_eq!(report.files_changed, 2);
    assert_eq!(report.previews.len(), 2);
    let preview = &report.previews["olt-00.txt"];
    assert!(preview.contains("+  name JMP-CUSTOMER-0-0/1\n"));
    assert!(!dir.path().join("output").exists());
    assert!(!input.join("olt-00.txt.bak").exists());
}

#[test]
fn test_failed_file_does_not_abort_batch() {
    let dir = TempDir::new().expect("Create temp dir");
    let input = dir.path().join("configs");
    seed(&input, 2);
    // A directory where the output file should go makes the write fail.
    fs::create_dir_all(dir.path().join("output").join("olt-00.txt")).expect("Create blocker");

    let report = rewrite_batch(&config(dir.path(), "output", 2)).expect("Run batch");

    assert_eq!(report.files_scanned, 2);
    assert_eq!(report.errors.len(), 1);
    assert!(report.errors.keys().all(|path| path.ends_with("olt-00.txt")));
    assert!(report.has_errors());
    assert_eq!(report.outcomes.len(), 1);
    assert_eq!(report.outcomes[0].file, "olt-01.txt");
    assert!(dir.path().join("output").join("olt-01.txt").is_file());
}

#[test]
fn test_parallel_matches_sequential() {
    let dir = TempDir::new().expect("Create temp dir");
    seed(&dir.path().join("configs"), 12);

    let mut sequential = config(dir.path(), "out-seq", 1);
    sequential.backup = false;
    let mut parallel = config(dir.path(), "out-par", 4);
    parallel.backup = false;

    let seq = rewrite_batch(&sequential).expect("Sequential batch");
    let par = rewrite_batch(&parallel).expect("Parallel batch");

    let mut seq_rows = seq.outcomes.clone();
    let mut par_rows = par.outcomes.clone();
    let key = |r: &OutcomeRecord| (r.file.clone(), r.interface.clone());
    seq_rows.sort_by_key(key);
    par_rows.sort_by_key(key);
    assert_eq!(seq_rows, par_rows);
    assert_eq!(seq_rows.len(), 12);

    for idx in 0..12 {
        let name = format!("olt-{idx:02}.txt");
        let a = fs::read_to_string(dir.path().join("out-seq").join(&name)).expect("Read seq");
        let b = fs::read_to_string(dir.path().join("out-par").join(&name)).expect("Read par");
        assert_eq!(a, b, "{name} differs");
    }
}

#[test]
fn test_log_from_batch() {
    let dir = TempDir::new().expect("Create temp dir");
    let input = dir.path().join("configs");
    seed(&input, 1);
    fs::write(
        input.join("olt-99.txt"),
        "interface gpon-onu_9/9/9:9\n  name ORPHAN\n!\n",
    )
    .expect("Write skip script");

    let report = rewrite_batch(&config(dir.path(), "output", 0)).expect("Run batch");
    let log = dir.path().join("data_log.csv");
    write_outcome_log(&log, &report.outcomes).expect("Write log");

    let statuses: Vec<_> = report.outcomes.iter().map(|o| o.status).collect();
    assert_eq!(statuses, vec![OutcomeStatus::Ok, OutcomeStatus::Skip]);
    assert_eq!(
        fs::read_to_string(&log).expect("Read log"),
        "filename,interface,old_name,new_name,status\n\
         olt-00.txt,gpon-onu_1/1/0:1,CUSTOMER-0,JMP-CUSTOMER-0-0/1,OK\n\
         olt-99.txt,gpon-onu_9/9/9:9,,,SKIP\n"
    );
}

#[test]
fn test_oversized_file_is_reported() {
    let dir = TempDir::new().expect("Create temp dir");
    let input = dir.path().join("configs");
    seed(&input, 1);
    let big = script("gpon-onu_2/2/2:2", "CUSTOMER-BIG", "2/2").repeat(100);
    fs::write(input.join("big.txt"), &big).expect("Write big script");

    let mut cfg = config(dir.path(), "output", 2);
    cfg.max_file_size = 1024;
    let report = rewrite_batch(&cfg).expect("Run batch");

    assert_eq!(report.files_scanned, 2);
    assert!(report.has_errors());
    assert_eq!(report.errors.len(), 1);
    let (path, message) = report.errors.iter().next().expect("One error");
    assert!(path.ends_with("big.txt"));
    assert!(message.contains("too large"), "{message}");
    assert!(!dir.path().join("output").join("big.txt").exists());

    assert_eq!(report.outcomes.len(), 1);
    assert_eq!(report.outcomes[0].file, "olt-00.txt");
}
