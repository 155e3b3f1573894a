//! Verify command tests

mod common;

use common::{SyncFixture, sync_cmd};
use predicates::prelude::*;

#[test]
fn test_verify_reports_drift() {
    let fixture = SyncFixture::new();

    sync_cmd()
        .current_dir(&fixture.path)
        .arg("verify")
        .assert()
        .failure()
        .stdout(predicate::str::contains("producer/bond"))
        .stdout(predicate::str::contains("out of sync"))
        .stderr(predicate::str::contains("verify step"))
        .stderr(predicate::str::contains("2 consumer(s) out of sync"));
}

#[test]
fn test_verify_after_sync_succeeds() {
    let fixture = SyncFixture::new();

    sync_cmd()
        .current_dir(&fixture.path)
        .args(["-y", "--no-fetch", "--no-publish"])
        .assert()
        .success();

    sync_cmd()
        .current_dir(&fixture.path)
        .arg("verify")
        .assert()
        .success()
        .stdout(predicate::str::contains("in sync"))
        .stdout(predicate::str::contains("out of sync").not());
}

#[test]
fn test_verify_json_output() {
    let fixture = SyncFixture::new();
    std::fs::remove_dir_all(fixture.path.join("consumer/bond")).unwrap();

    let output = sync_cmd()
        .current_dir(&fixture.path)
        .args(["verify", "--json"])
        .output()
        .unwrap();
    assert!(!output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["source"], "bond");
    assert_eq!(report["consumers"][0]["state"], "out_of_sync");
    assert_eq!(report["consumers"][1]["state"], "missing");
    assert!(report["source_hash"].as_str().unwrap().starts_with("blake3:"));
}

#[test]
fn test_verify_subset_of_consumers() {
    let fixture = SyncFixture::new();
    sync_cmd()
        .current_dir(&fixture.path)
        .args(["-y", "--no-fetch", "--no-publish", "--consumers", "consumer/bond"])
        .assert()
        .success();

    sync_cmd()
        .current_dir(&fixture.path)
        .args(["verify", "--consumers", "consumer/bond"])
        .assert()
        .success();
}
