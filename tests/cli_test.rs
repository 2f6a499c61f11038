//! Integration tests for the staffel binary

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};
use tempfile::TempDir;

fn sample_table() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("demos/tarieven.csv")
}

fn run_staffel(dir: &Path, args: &[&str]) -> (ExitStatus, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_staffel"))
        .args(args)
        .current_dir(dir)
        .env_remove("STAFFEL_CONFIG")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute staffel");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    (output.status, stdout, stderr)
}

#[test]
fn test_cmd_quote_success() {
    let dir = TempDir::new().unwrap();
    let table = sample_table();
    let (status, stdout, stderr) = run_staffel(
        dir.path(),
        &["quote", table.to_str().unwrap(), "-p", "10115", "-w", "12,5", "-u", "ton"],
    );

    assert!(status.success(), "stderr: {}", stderr);
    assert!(stdout.contains("13 ton"), "stdout: {}", stdout);
    assert!(stdout.contains("€ 326,00"), "stdout: {}", stdout);
}

#[test]
fn test_cmd_quote_invalid_postcode() {
    let dir = TempDir::new().unwrap();
    let table = sample_table();
    let (status, stdout, stderr) = run_staffel(
        dir.path(),
        &["quote", table.to_str().unwrap(), "-p", "a", "-w", "12,5", "-u", "ton"],
    );

    assert_eq!(status.code(), Some(1));
    assert!(stdout.is_empty(), "stdout: {}", stdout);
    assert!(
        stderr.starts_with("Error: Enter a valid postcode"),
        "stderr: {}",
        stderr
    );
}

#[test]
fn test_cmd_quote_negative_surcharge_is_clamped() {
    let dir = TempDir::new().unwrap();
    let table = sample_table();
    let (status, stdout, stderr) = run_staffel(
        dir.path(),
        &[
            "quote",
            table.to_str().unwrap(),
            "-p",
            "10115",
            "-w",
            "12,5",
            "-u",
            "ton",
            "--surcharge",
            "-3",
            "--deliveries",
            "-2",
            "--json",
        ],
    );

    assert!(status.success(), "stderr: {}", stderr);
    let quote: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(quote["surcharge_per_delivery"], 0.0);
    assert_eq!(quote["deliveries"], 1.0);
    assert_eq!(quote["total"], 291.0);
}

#[test]
fn test_cmd_quote_uses_config_defaults() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("staffel.yaml"),
        "version: 1\ndefaults:\n  unit: ton\n  method: floor\n  surcharge: 10\n",
    )
    .unwrap();
    let table = sample_table();
    let (status, stdout, stderr) = run_staffel(
        dir.path(),
        &["quote", table.to_str().unwrap(), "-p", "10115", "-w", "12,5"],
    );

    assert!(status.success(), "stderr: {}", stderr);
    assert!(stdout.contains("12 ton"), "stdout: {}", stdout);
    assert!(stdout.contains("€ 289,00"), "stdout: {}", stdout);
}

#[test]
fn test_cmd_check_strict_fails_on_duplicate_prefix() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dup.csv");
    fs::write(&path, "Postcode,1 ton\n10115,5\n10999,6\n").unwrap();
    let file = path.to_str().unwrap();

    let (status, stdout, _) = run_staffel(dir.path(), &["check", file]);
    assert!(status.success());
    assert!(stdout.contains("[T005]"), "stdout: {}", stdout);

    let (status, stdout, stderr) = run_staffel(dir.path(), &["check", file, "--strict"]);
    assert_eq!(status.code(), Some(1));
    assert!(stdout.contains("[T005]"), "stdout: {}", stdout);
    assert!(stderr.contains("Error: Table check failed"), "stderr: {}", stderr);
}

#[test]
fn test_cmd_demo() {
    let dir = TempDir::new().unwrap();
    let table = sample_table();
    let (status, stdout, stderr) = run_staffel(dir.path(), &["demo", table.to_str().unwrap()]);

    assert!(status.success(), "stderr: {}", stderr);
    assert!(stdout.contains("Test: 10115 • 12,5 t"), "stdout: {}", stdout);
    assert!(stdout.contains("€ 326,00"), "stdout: {}", stdout);
    assert!(stdout.contains("Test: 50667 • 8,2 t"), "stdout: {}", stdout);
    assert!(stdout.contains("€ 224,00"), "stdout: {}", stdout);
}
