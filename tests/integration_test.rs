// tests/integration_test.rs
use std::process::Command;

#[test]
fn test_cbs_publish_help() {
    let output = Command::new("cargo")
        .args(["run", "--bin", "cbs-publish", "--", "--help"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("cbs-publish"));
    assert!(stdout.contains("--dry-run"));
}

#[test]
fn test_cbs_publish_version() {
    let output = Command::new("cargo")
        .args(["run", "--bin", "cbs-publish", "--", "--version"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("cbs-publish"));
}

#[test]
fn test_cbs_publish_list_default_mappings() {
    let output = Command::new("cargo")
        .args(["run", "--bin", "cbs-publish", "--", "--list"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("v2"));
    assert!(stdout.contains("v3"));
}
