mod common;

use predicates::prelude::*;
use serde_json::Value;
use tempfile::tempdir;

use common::{FINGERPRINT, GESTURES, MAIL, SAMPLE_CATALOG, nudge, robot, suggestion_ids, write_catalog};

#[test]
fn test_cli_help() {
    let dir = tempdir().unwrap();
    nudge(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn test_cli_version() {
    let dir = tempdir().unwrap();
    nudge(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_suggest_vets_and_dedups_catalog() {
    let dir = tempdir().unwrap();
    write_catalog(dir.path(), SAMPLE_CATALOG);

    let json = robot(dir.path(), &["suggest"]);
    assert_eq!(json["status"], "ok");
    // Offline maps needs network, the third party offer isn't privileged and
    // gestures isn't due for five days but is admitted outside exclusivity.
    assert_eq!(suggestion_ids(&json), vec![FINGERPRINT, MAIL, GESTURES]);

    let fingerprint = &json["data"]["suggestions"][0];
    assert_eq!(fingerprint["title"], "Set up fingerprint");
    assert_eq!(fingerprint["summary"], "Unlock with a touch");
}

#[test]
fn test_dismiss_removes_suggestion() {
    let dir = tempdir().unwrap();
    write_catalog(dir.path(), SAMPLE_CATALOG);

    let dismissed = robot(dir.path(), &["dismiss", MAIL]);
    assert_eq!(dismissed["data"]["dismissed"], true);

    let json = robot(dir.path(), &["suggest"]);
    assert!(!suggestion_ids(&json).contains(&MAIL.to_string()));

    let history = robot(dir.path(), &["history", MAIL]);
    assert_eq!(history["data"]["dismissed"], true);
    assert_eq!(history["data"]["summary"]["dismissed"]["count"], 1);
    assert_eq!(history["data"]["features"]["is_dismissed"], 1.0);
}

#[test]
fn test_launch_reorders_suggestions() {
    let dir = tempdir().unwrap();
    write_catalog(dir.path(), SAMPLE_CATALOG);

    robot(dir.path(), &["launch", GESTURES]);
    let json = robot(dir.path(), &["suggest"]);
    assert_eq!(suggestion_ids(&json)[0], GESTURES);
}

#[test]
fn test_record_shown_appends_events() {
    let dir = tempdir().unwrap();
    write_catalog(dir.path(), SAMPLE_CATALOG);

    let all = robot(dir.path(), &["suggest", "--record-shown"]);
    let top = robot(dir.path(), &["suggest", "--record-shown", "-n", "1"]);
    let top_ids = suggestion_ids(&top);
    assert_eq!(top_ids.len(), 1);

    for id in suggestion_ids(&all) {
        let history = robot(dir.path(), &["history", id.as_str(), "--events"]);
        let events = history["data"]["events"].as_array().unwrap();
        let expected = if id == top_ids[0] { 2 } else { 1 };
        assert_eq!(events.len(), expected, "events for {id}");
        assert!(events.iter().all(|event| event["kind"] == "shown"));
        assert_eq!(history["data"]["summary"]["shown"]["count"], expected);
    }
}

#[test]
fn test_unknown_id_is_a_robot_error() {
    let dir = tempdir().unwrap();
    write_catalog(dir.path(), SAMPLE_CATALOG);

    let output = nudge(dir.path())
        .args(["--robot", "dismiss", "com.unknown/Thing"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["status"]["error"]["code"], "not_found");
}

#[test]
fn test_categories_lists_default_registry() {
    let dir = tempdir().unwrap();
    let json = robot(dir.path(), &["categories"]);
    assert_eq!(json["data"]["count"], 10);
    assert_eq!(
        json["data"]["categories"][0]["tag"],
        "suggested.category.deferred_setup"
    );
    assert_eq!(json["data"]["categories"][0]["exclusive"], true);
}

#[test]
fn test_human_output_lists_titles() {
    let dir = tempdir().unwrap();
    write_catalog(dir.path(), SAMPLE_CATALOG);

    nudge(dir.path())
        .arg("suggest")
        .assert()
        .success()
        .stdout(predicate::str::contains("Set up fingerprint"))
        .stdout(predicate::str::contains("Try swipe navigation"));
}

#[test]
fn test_invalid_env_override_fails() {
    let dir = tempdir().unwrap();
    nudge(dir.path())
        .env("NUDGE_RECENCY_HORIZON_DAYS", "soon")
        .arg("categories")
        .assert()
        .failure()
        .stderr(predicate::str::contains("NUDGE_RECENCY_HORIZON_DAYS"));
}
