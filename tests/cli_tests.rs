//! CLI integration tests using the real sync-dependency binary

mod common;

use common::sync_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

#[test]
fn test_help_output() {
    sync_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("consumer"))
        .stdout(predicate::str::contains("verify"))
        .stdout(predicate::str::contains("--dry-run"))
        .stdout(predicate::str::contains("--remotes"));
}

#[test]
fn test_version_output() {
    sync_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("sync-dependency"));
}

#[test]
fn test_completions_bash() {
    sync_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sync-dependency"));
}

#[test]
fn test_completions_unknown_shell() {
    sync_cmd()
        .args(["completions", "tcsh"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown shell"));
}

#[test]
fn test_sync_outside_repository_fails() {
    let temp = TempDir::new().unwrap();
    sync_cmd()
        .current_dir(temp.path())
        .args(["-y", "--ref", "bond", "--consumers", "a/bond"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not in a git repository"))
        .stderr(predicate::str::contains("help:"));
}

#[test]
fn test_missing_explicit_config_fails() {
    let temp = TempDir::new().unwrap();
    git2::Repository::init(temp.path()).unwrap();
    sync_cmd()
        .current_dir(temp.path())
        .args(["-y", "--config", "nowhere.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config step"))
        .stderr(predicate::str::contains("nowhere.yaml"));
}

#[test]
fn test_no_dependency_configured_fails() {
    let temp = TempDir::new().unwrap();
    git2::Repository::init(temp.path()).unwrap();
    sync_cmd()
        .current_dir(temp.path())
        .arg("-y")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no dependency configured"));
}

#[test]
fn test_mirror_plain_directory() {
    let temp = TempDir::new().unwrap();
    common::write_file(temp.path(), "vendor-src/lib.txt", "shared\n");

    sync_cmd()
        .current_dir(temp.path())
        .args([
            "-y",
            "--no-fetch",
            "--no-publish",
            "--ref",
            "vendor-src",
            "--consumers",
            "app/vendor",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created app/vendor"));

    let copied = std::fs::read_to_string(temp.path().join("app/vendor/lib.txt")).unwrap();
    assert_eq!(copied, "shared\n");
}

#[test]
fn test_no_publish_conflicts_with_no_push() {
    sync_cmd()
        .args(["--no-publish", "--no-push"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}
