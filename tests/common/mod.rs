//! Common test utilities shared across integration tests.
//!
//! Helpers here only use the public API of the crate plus the binary, so the
//! CLI tests, e2e workflows and property tests can all include this module.

#![allow(dead_code)]

use std::path::Path;

use assert_cmd::Command;
use serde_json::Value;

/// Offline device with a fingerprint sensor and a mail account. Two of the
/// five candidates fail eligibility (network, privilege) and one is listed
/// under two categories.
pub const SAMPLE_CATALOG: &str = r#"
[device]
network_connected = false
features = ["fingerprint"]
account_types = ["com.example.mail"]

[[candidates]]
categories = ["suggested.category.lock_screen", "suggested.category.default"]
system_app = true
label = "Set up fingerprint"
component = { package = "com.example.setup", class = "Fingerprint" }
metadata = { "suggestion.require_feature" = "fingerprint", "suggestion.summary" = 7 }

[[candidates]]
categories = ["suggested.category.email"]
system_app = true
label = "Sync your mail"
component = { package = "com.example.mail", class = "Sync" }
metadata = { "suggestion.require_account" = "com.example.mail" }

[[candidates]]
categories = ["suggested.category.default"]
system_app = true
label = "Download offline maps"
component = { package = "com.example.maps", class = "Offline" }
metadata = { "suggestion.is_connection_required" = true }

[[candidates]]
categories = ["suggested.category.default"]
label = "Third party offer"
component = { package = "com.thirdparty", class = "Offer" }

[[candidates]]
categories = ["suggested.category.gesture"]
system_app = true
label = "Try swipe navigation"
component = { package = "com.example.setup", class = "Gestures" }
metadata = { "suggestion.dismiss" = "5,10" }

[resources."com.example.setup"]
7 = "Unlock with a touch"
"#;

pub const FINGERPRINT: &str = "com.example.setup/Fingerprint";
pub const MAIL: &str = "com.example.mail/Sync";
pub const GESTURES: &str = "com.example.setup/Gestures";

/// `nudge` bound to an isolated root with an empty config file.
pub fn nudge(root: &Path) -> Command {
    let config = root.join("config.toml");
    if !config.exists() {
        std::fs::write(&config, "").unwrap();
    }
    let mut cmd = Command::cargo_bin("nudge").unwrap();
    cmd.env("NUDGE_ROOT", root)
        .env("NUDGE_CONFIG", &config)
        .env_remove("NUDGE_ROBOT")
        .env_remove("RUST_LOG")
        .arg("--quiet");
    cmd
}

pub fn write_catalog(root: &Path, catalog: &str) {
    std::fs::write(root.join("catalog.toml"), catalog).unwrap();
}

/// Run `nudge --robot <args>` and parse the JSON envelope from stdout.
pub fn robot(root: &Path, args: &[&str]) -> Value {
    let output = nudge(root).arg("--robot").args(args).output().unwrap();
    assert!(
        output.status.success(),
        "nudge {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

pub fn suggestion_ids(envelope: &Value) -> Vec<String> {
    envelope["data"]["suggestions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_str().unwrap().to_string())
        .collect()
}
