//! Integration tests for install runs that fail or finish before a device
//! session is needed.

#![allow(clippy::expect_used)]

use std::path::{Path, PathBuf};

use predicates::prelude::*;
use tempfile::TempDir;

use crate::cli_tests::installer;

/// Write `content` to `apps.json` in a fresh directory.
fn app_list(content: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("apps.json");
    std::fs::write(&path, content).expect("write");
    (dir, path)
}

/// Config path inside `dir` that does not exist, so defaults apply.
fn no_config(dir: &Path) -> PathBuf {
    dir.join("config.yaml")
}

#[test]
fn test_missing_file_fails() {
    let dir = TempDir::new().expect("tempdir");
    installer()
        .arg(dir.path().join("absent.json"))
        .arg("--config")
        .arg(no_config(dir.path()))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("absent.json"));
}

#[test]
fn test_empty_array_has_nothing_to_do() {
    let (dir, path) = app_list("[]");
    installer()
        .arg(&path)
        .arg("--config")
        .arg(no_config(dir.path()))
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to do"));
}

#[test]
fn test_empty_array_json_mode_prints_zero_summary() {
    let (dir, path) = app_list("[]");
    let output = installer()
        .arg(&path)
        .arg("--json")
        .arg("--config")
        .arg(no_config(dir.path()))
        .output()
        .expect("run");

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json stdout");
    assert_eq!(value["sources"].as_array().map(Vec::len), Some(4));
    assert_eq!(value["sources"][0]["total"], 0);
    assert_eq!(value["skipped_entries"], 0);
}

#[test]
fn test_malformed_json_fails() {
    let (dir, path) = app_list("[{\"label\": ");
    installer()
        .arg(&path)
        .arg("--config")
        .arg(no_config(dir.path()))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not valid JSON"));
}

#[test]
fn test_top_level_object_fails() {
    let (dir, path) = app_list("{\"apps\": []}");
    installer()
        .arg(&path)
        .arg("--config")
        .arg(no_config(dir.path()))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("JSON array"));
}

#[test]
fn test_unknown_source_fails_before_connecting() {
    let (dir, path) = app_list(
        r#"[{"label": "Kindle", "packageName": "com.amazon.kindle", "source": "AmazonAppstore"}]"#,
    );
    installer()
        .arg(&path)
        .arg("--config")
        .arg(no_config(dir.path()))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("AmazonAppstore"))
        .stdout(predicate::str::contains("connecting").not());
}

#[test]
fn test_invalid_endpoint_fails() {
    let (dir, path) = app_list(
        r#"[{"label": "Telegram", "packageName": "org.telegram.messenger", "source": 0}]"#,
    );
    installer()
        .arg(&path)
        .args(["--endpoint", "localhost:4723"])
        .arg("--config")
        .arg(no_config(dir.path()))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid endpoint"));
}

#[test]
fn test_only_rejected_entries_has_nothing_to_do() {
    let (dir, path) = app_list(
        r#"[{"label": "", "packageName": "org.telegram.messenger", "source": "GooglePlay"}]"#,
    );
    installer()
        .arg(&path)
        .arg("--config")
        .arg(no_config(dir.path()))
        .assert()
        .success()
        .stdout(predicate::str::contains("label is empty"))
        .stdout(predicate::str::contains("Nothing to do"));
}

#[test]
fn test_unreachable_endpoint_fails_with_connection_error() {
    let (dir, path) = app_list(
        r#"[{"label": "Telegram", "packageName": "org.telegram.messenger", "source": "GooglePlay"}]"#,
    );
    installer()
        .arg(&path)
        .args(["--endpoint", "http://127.0.0.1:1/", "--connect-timeout", "1"])
        .arg("--config")
        .arg(no_config(dir.path()))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Cannot start a session"));
}

#[test]
fn test_unreachable_endpoint_json_mode_prints_error_object() {
    let (dir, path) = app_list(
        r#"[{"label": "Telegram", "packageName": "org.telegram.messenger", "source": "GooglePlay"}]"#,
    );
    let output = installer()
        .arg(&path)
        .args(["--endpoint", "http://127.0.0.1:1/", "--connect-timeout", "1", "--json"])
        .arg("--config")
        .arg(no_config(dir.path()))
        .output()
        .expect("run");

    assert_eq!(output.status.code(), Some(1));
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json stdout");
    assert_eq!(value["error"], true);
    assert_eq!(value["code"], "CONNECTION");
}
