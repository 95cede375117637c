/// End-to-end tests for config file loading and CLI option merging.
///
/// These tests exercise the full flow from config file on disk through CLI invocation
/// to correct output, using `assert_cmd` and `tempfile` for isolated test environments.
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// ============================================================================
// Helper Functions
// ============================================================================

/// Copy the sample inventory into a fresh directory.
fn write_inventory(dir: &Path) -> PathBuf {
    let path = dir.join("inventory.json");
    fs::copy("tests/fixtures/sample-inventory.json", &path).unwrap();
    path
}

fn write_config(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("sbom-graph.config.yml");
    fs::write(&path, content).unwrap();
    path
}

// ============================================================================
// Discovery
// ============================================================================

#[test]
fn test_config_discovered_next_to_inventory() {
    let dir = TempDir::new().unwrap();
    let inventory = write_inventory(dir.path());
    write_config(dir.path(), "format: markdown\n");

    cargo_bin_cmd!("sbom-graph")
        .arg(&inventory)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("# Dependency Paths"));
}

#[test]
fn test_cli_format_overrides_config() {
    let dir = TempDir::new().unwrap();
    let inventory = write_inventory(dir.path());
    write_config(dir.path(), "format: markdown\n");

    cargo_bin_cmd!("sbom-graph")
        .args(["-f", "json"])
        .arg(&inventory)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("{"));
}

#[test]
fn test_explicit_config_path() {
    let dir = TempDir::new().unwrap();
    let inventory = write_inventory(dir.path());
    let config_dir = TempDir::new().unwrap();
    let config = config_dir.path().join("custom.yml");
    fs::write(&config, "format: md\n").unwrap();

    cargo_bin_cmd!("sbom-graph")
        .arg("-c")
        .arg(&config)
        .arg(&inventory)
        .assert()
        .success()
        .stdout(predicate::str::contains("## Summary"));
}

#[test]
fn test_missing_explicit_config_fails() {
    let dir = TempDir::new().unwrap();
    let inventory = write_inventory(dir.path());

    cargo_bin_cmd!("sbom-graph")
        .arg("-c")
        .arg(dir.path().join("missing.yml"))
        .arg(&inventory)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Failed to read config file"));
}

// ============================================================================
// Values
// ============================================================================

#[test]
fn test_config_store_dir_relative_to_config() {
    let dir = TempDir::new().unwrap();
    let inventory = write_inventory(dir.path());
    write_config(dir.path(), "store_dir: paths\n");

    cargo_bin_cmd!("sbom-graph").arg(&inventory).assert().success();

    assert!(dir.path().join("paths/project-42/CURRENT").exists());
}

#[test]
fn test_config_max_depth_applies() {
    let dir = TempDir::new().unwrap();
    let inventory = write_inventory(dir.path());
    write_config(dir.path(), "max_depth: 1\n");

    cargo_bin_cmd!("sbom-graph")
        .arg(&inventory)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("maximum depth of 1"));
}

#[test]
fn test_cli_max_depth_overrides_config() {
    let dir = TempDir::new().unwrap();
    let inventory = write_inventory(dir.path());
    write_config(dir.path(), "max_depth: 1\n");

    cargo_bin_cmd!("sbom-graph")
        .args(["--max-depth", "16"])
        .arg(&inventory)
        .assert()
        .success();
}

#[test]
fn test_config_zero_batch_size_rejected() {
    let dir = TempDir::new().unwrap();
    let inventory = write_inventory(dir.path());
    write_config(dir.path(), "batch_size: 0\n");

    cargo_bin_cmd!("sbom-graph")
        .arg(&inventory)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("batch_size must be greater than zero"));
}

#[test]
fn test_unknown_config_field_warns() {
    let dir = TempDir::new().unwrap();
    let inventory = write_inventory(dir.path());
    write_config(dir.path(), "check_cve: true\n");

    cargo_bin_cmd!("sbom-graph")
        .arg(&inventory)
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "Unknown config field 'check_cve' will be ignored",
        ));
}

#[test]
fn test_invalid_yaml_fails() {
    let dir = TempDir::new().unwrap();
    let inventory = write_inventory(dir.path());
    write_config(dir.path(), "format: [oops\n");

    cargo_bin_cmd!("sbom-graph")
        .arg(&inventory)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Failed to parse config file"));
}

#[test]
fn test_config_max_walks_applies() {
    let dir = TempDir::new().unwrap();
    let inventory = dir.path().join("inventory.json");
    fs::copy("tests/fixtures/dense-cycle.json", &inventory).unwrap();
    write_config(dir.path(), "max_walks: 20\n");

    cargo_bin_cmd!("sbom-graph")
        .arg(&inventory)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("after 20 walks"));
}
