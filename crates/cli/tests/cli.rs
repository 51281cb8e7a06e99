//! Integration tests for the CLI entry point

use arsync::{Cli, Status, run};
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn write_config(dir: &TempDir, yaml: &str) -> PathBuf {
    let path = dir.path().join("arsync.conf");
    fs::write(&path, yaml).unwrap();
    path
}

fn cli(config: &std::path::Path, args: &[&str]) -> Cli {
    let mut argv = vec!["arsync", "--config", config.to_str().unwrap()];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv).unwrap()
}

const CONFIG: &str = r#"
variables:
  - DISK=usb
sync:
  documents:
    src: /home/alice/Documents/
    dest: /mnt/${DISK}/documents
  photos:
    src: nas:/srv/photos/
    dest: /home/alice/Pictures
"#;

#[test]
fn test_refresh_ignores_configuration() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("missing.conf");

    let status = run(cli(&missing, &["refresh"])).unwrap();
    assert_eq!(status, Status::Success);
}

#[test]
fn test_missing_config_is_error() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("missing.conf");

    let err = run(cli(&missing, &["--list"])).unwrap_err();
    assert!(err.to_string().contains("Configuration file not found"));
}

#[test]
fn test_missing_sync_section_is_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_config(&temp_dir, "variables:\n  - A=1\n");

    let err = run(cli(&path, &[])).unwrap_err();
    assert!(err.to_string().contains("'sync' section"));
}

#[test]
fn test_list() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_config(&temp_dir, CONFIG);

    assert_eq!(run(cli(&path, &["--list"])).unwrap(), Status::Success);
}

#[test]
fn test_no_syncs_defined() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_config(&temp_dir, "sync: {}\n");

    let err = run(cli(&path, &[])).unwrap_err();
    assert_eq!(err.to_string(), "No sync operations defined in configuration");
}

#[test]
fn test_dry_run_succeeds_with_unknown_name() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_config(&temp_dir, CONFIG);

    let status = run(cli(&path, &["--dry-run", "documents", "nope", "photos"])).unwrap();
    assert_eq!(status, Status::Success);
}

#[test]
fn test_unknown_sync_fails_run() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_config(&temp_dir, CONFIG);

    let status = run(cli(&path, &["--no-parallel", "nope"])).unwrap();
    assert_eq!(status, Status::Failure);
}

#[test]
fn test_log_file_written() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_config(&temp_dir, CONFIG);
    let log = temp_dir.path().join("arsync.log");

    run(cli(&path, &["--log-file", log.to_str().unwrap(), "--list"])).unwrap();
    assert!(log.exists());
}
