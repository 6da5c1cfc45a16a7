//! Integration tests for the bkt CLI
//!
//! These tests require a running S3-compatible server, configured through
//! environment variables:
//!
//! ```bash
//! export TEST_S3_ENDPOINT=http://localhost:9000
//! export TEST_S3_ACCESS_KEY=minioadmin
//! export TEST_S3_SECRET_KEY=minioadmin
//! cargo test --features integration
//! ```

#![cfg(feature = "integration")]

use std::process::{Command, Output};
use tempfile::TempDir;

/// Get the path to the bkt binary
fn bkt_binary() -> std::path::PathBuf {
    if let Ok(path) = std::env::var("CARGO_BIN_EXE_bkt") {
        return std::path::PathBuf::from(path);
    }

    let debug = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("target/debug/bkt");

    if debug.exists() {
        return debug;
    }

    std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("target/release/bkt")
}

/// Run bkt with an isolated config directory
fn run_bkt(args: &[&str], config_dir: &std::path::Path) -> Output {
    let mut cmd = Command::new(bkt_binary());
    cmd.args(args);
    cmd.env("BKT_CONFIG_DIR", config_dir);
    cmd.output().expect("Failed to execute bkt command")
}

/// Get S3 test configuration from environment
fn get_test_config() -> Option<(String, String, String)> {
    let endpoint = std::env::var("TEST_S3_ENDPOINT").ok()?;
    let access_key = std::env::var("TEST_S3_ACCESS_KEY").ok()?;
    let secret_key = std::env::var("TEST_S3_SECRET_KEY").ok()?;
    Some((endpoint, access_key, secret_key))
}

fn unique_suffix() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .subsec_nanos();
    format!("{}-{nanos}", std::process::id())
}

/// Write a config file pointing at the test endpoint
fn setup_config() -> Option<TempDir> {
    let (endpoint, access_key, secret_key) = get_test_config()?;
    let config_dir = tempfile::tempdir().ok()?;

    let content = format!(
        r#"
schema_version = 1
endpoint = "{endpoint}"
force_path_style = true

[defaults]
region = "us-west-2"

[credentials]
access_key = "{access_key}"
secret_key = "{secret_key}"
"#
    );
    std::fs::write(config_dir.path().join("config.toml"), content).ok()?;

    Some(config_dir)
}

#[test]
fn test_bucket_lifecycle() {
    let Some(config_dir) = setup_config() else {
        eprintln!("Skipping: TEST_S3_* environment not set");
        return;
    };
    let bucket = format!("bkt-it-lifecycle-{}", unique_suffix());

    let output = run_bkt(&["mb", &bucket], config_dir.path());
    assert!(
        output.status.success(),
        "mb failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    // creating the same bucket again conflicts
    let output = run_bkt(&["mb", &bucket], config_dir.path());
    assert_eq!(output.status.code(), Some(6));

    // but is tolerated with --ignore-existing
    let output = run_bkt(&["mb", &bucket, "--ignore-existing"], config_dir.path());
    assert!(output.status.success());

    let output = run_bkt(&["ls", "--json"], config_dir.path());
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains(&bucket));

    let output = run_bkt(&["rb", &bucket], config_dir.path());
    assert!(output.status.success());
}

#[test]
fn test_object_round_trip() {
    let Some(config_dir) = setup_config() else {
        eprintln!("Skipping: TEST_S3_* environment not set");
        return;
    };
    let bucket = format!("bkt-it-objects-{}", unique_suffix());
    let work_dir = tempfile::tempdir().unwrap();

    let src = work_dir.path().join("payload.bin");
    let content: Vec<u8> = (0..=u8::MAX).collect();
    std::fs::write(&src, &content).unwrap();

    assert!(run_bkt(&["mb", &bucket], config_dir.path()).status.success());

    // upload with key defaulting to the file name
    let output = run_bkt(&["put", src.to_str().unwrap(), &bucket], config_dir.path());
    assert!(
        output.status.success(),
        "put failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    // listing shows the object; an empty bucket earlier would have shown none
    let output = run_bkt(&["ls", &bucket, "--json"], config_dir.path());
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("payload.bin"));

    // download and compare bytes
    let dst = work_dir.path().join("out.bin");
    let source = format!("{bucket}/payload.bin");
    let output = run_bkt(
        &["get", &source, dst.to_str().unwrap()],
        config_dir.path(),
    );
    assert!(
        output.status.success(),
        "get failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(std::fs::read(&dst).unwrap(), content);

    // remove the object, then the bucket
    assert!(run_bkt(&["rm", &source], config_dir.path()).status.success());
    assert!(run_bkt(&["rb", &bucket], config_dir.path()).status.success());
}

#[test]
fn test_rb_force_purges_versioned_bucket() {
    let Some(config_dir) = setup_config() else {
        eprintln!("Skipping: TEST_S3_* environment not set");
        return;
    };
    let bucket = format!("bkt-it-versioned-{}", unique_suffix());
    let work_dir = tempfile::tempdir().unwrap();

    assert!(run_bkt(&["mb", &bucket], config_dir.path()).status.success());
    assert!(run_bkt(&["version", "enable", &bucket], config_dir.path())
        .status
        .success());

    let output = run_bkt(&["version", "status", &bucket], config_dir.path());
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Enabled"));

    // two writes to the same key produce two versions
    let src = work_dir.path().join("doc.txt");
    for content in ["v1", "v2"] {
        std::fs::write(&src, content).unwrap();
        assert!(
            run_bkt(&["put", src.to_str().unwrap(), &bucket], config_dir.path())
                .status
                .success()
        );
    }

    // plain rb refuses a non-empty bucket
    let output = run_bkt(&["rb", &bucket], config_dir.path());
    assert_eq!(output.status.code(), Some(6));

    // --force deletes versions, objects, then the bucket
    let output = run_bkt(&["rb", &bucket, "--force"], config_dir.path());
    assert!(
        output.status.success(),
        "rb --force failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn test_get_missing_object_is_not_found() {
    let Some(config_dir) = setup_config() else {
        eprintln!("Skipping: TEST_S3_* environment not set");
        return;
    };
    let bucket = format!("bkt-it-missing-{}", unique_suffix());
    let work_dir = tempfile::tempdir().unwrap();

    assert!(run_bkt(&["mb", &bucket], config_dir.path()).status.success());

    let dst = work_dir.path().join("never.bin");
    let source = format!("{bucket}/does-not-exist");
    let output = run_bkt(
        &["get", &source, dst.to_str().unwrap()],
        config_dir.path(),
    );
    assert_eq!(output.status.code(), Some(5));
    assert!(!dst.exists());

    assert!(run_bkt(&["rb", &bucket], config_dir.path()).status.success());
}
