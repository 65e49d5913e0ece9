//! Integration tests for the `wifidash` CLI binary.
//!
//! Every test runs against the built-in demo household or a temporary seed,
//! with config lookups pointed away from the user's real files.
#![allow(clippy::unwrap_used)]

use std::io::Write;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `wifidash` binary with env isolation.
fn wifidash_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("wifidash");
    cmd.env("HOME", "/tmp/wifidash-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/wifidash-cli-test-nonexistent")
        .env_remove("WIFIDASH_SEED")
        .env_remove("WIFIDASH_CONFIG")
        .env_remove("WIFIDASH_OUTPUT")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

fn write_temp(dir: &tempfile::TempDir, name: &str, body: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut f = std::fs::File::create(&path).unwrap();
    f.write_all(body.as_bytes()).unwrap();
    path
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = wifidash_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    wifidash_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("WiFi")
            .and(predicate::str::contains("devices"))
            .and(predicate::str::contains("usage"))
            .and(predicate::str::contains("controls")),
    );
}

#[test]
fn test_version_flag() {
    wifidash_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("wifidash"));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    wifidash_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    wifidash_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("wifidash"));
}

// ── Devices ─────────────────────────────────────────────────────────

#[test]
fn test_devices_list_plain_keeps_order() {
    wifidash_cmd()
        .args(["devices", "list", "-o", "plain"])
        .assert()
        .success()
        .stdout("1\n2\n3\n4\n5\n6\n7\n");
}

#[test]
fn test_devices_search_by_ip() {
    wifidash_cmd()
        .args(["devices", "list", "--search", "192.168.1.102"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Living Room TV").and(predicate::str::contains("Gaming PC").not()));
}

#[test]
fn test_devices_get_json() {
    let output = wifidash_cmd().args(["devices", "get", "3", "-o", "json"]).output().unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["name"], "Gaming PC");
    assert_eq!(value["dataUsed"], 12.5);
}

#[test]
fn test_pause_offline_device_is_conflict() {
    let output = wifidash_cmd().args(["devices", "pause", "6"]).output().unwrap();
    assert_eq!(output.status.code(), Some(6));
    assert!(combined_output(&output).contains("offline"));
}

#[test]
fn test_unknown_device_is_not_found() {
    let output = wifidash_cmd().args(["devices", "get", "99"]).output().unwrap();
    assert_eq!(output.status.code(), Some(4));
    assert!(combined_output(&output).contains("devices list"));
}

#[test]
fn test_rename_to_empty_is_usage_error() {
    let output = wifidash_cmd().args(["devices", "rename", "1", ""]).output().unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_rename_prints_new_name() {
    wifidash_cmd()
        .args(["devices", "rename", "5", "Smart Plug"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Name:      Smart Plug"));
}

// ── Status & usage ──────────────────────────────────────────────────

#[test]
fn test_status_counts_online() {
    wifidash_cmd()
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("5 devices connected to your WiFi"));
}

#[test]
fn test_usage_total() {
    wifidash_cmd()
        .arg("usage")
        .assert()
        .success()
        .stdout(predicate::str::contains("Today's usage: 35.9 GB"));
}

#[test]
fn test_usage_top_plain() {
    wifidash_cmd()
        .args(["usage", "--top", "2", "-o", "plain"])
        .assert()
        .success()
        .stdout("3\n2\n");
}

// ── Seeds & config ──────────────────────────────────────────────────

#[test]
fn test_seed_file_replaces_demo() {
    let dir = tempfile::tempdir().unwrap();
    let seed = write_temp(
        &dir,
        "seed.toml",
        r#"
[[devices]]
id = "p1"
name = "Hall Printer"
mac = "00:11:22:33:44:55"
ip = "10.0.0.9"
type = "unknown"
status = "online"
dataUsed = 0.2
"#,
    );
    wifidash_cmd()
        .args(["devices", "list", "-o", "plain", "--seed"])
        .arg(&seed)
        .assert()
        .success()
        .stdout("p1\n");
}

#[test]
fn test_malformed_seed_fails() {
    let dir = tempfile::tempdir().unwrap();
    let seed = write_temp(&dir, "seed.json", "{ nope");
    let output = wifidash_cmd().args(["status", "--seed"]).arg(&seed).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(combined_output(&output).contains("seed"));
}

#[test]
fn test_controls_active_with_config() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_temp(
        &dir,
        "config.toml",
        r#"
[[controls.schedules]]
name = "Bedtime Mode"
kind = "bedtime"
start = "22:00"
end = "07:00"
enabled = true
"#,
    );
    wifidash_cmd()
        .args(["controls", "active", "--at", "23:00", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Bedtime Mode"));

    wifidash_cmd()
        .args(["controls", "active", "--at", "12:00", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("No schedules active at 12:00"));
}

#[test]
fn test_config_init_then_show() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");

    wifidash_cmd()
        .args(["config", "init", "--config"])
        .arg(&path)
        .assert()
        .success();
    assert!(path.exists());

    // Existing file without --force or --yes cannot prompt on a pipe
    let output = wifidash_cmd().args(["config", "init", "--config"]).arg(&path).output().unwrap();
    assert_eq!(output.status.code(), Some(2));

    wifidash_cmd()
        .args(["config", "show", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Bedtime Mode").and(predicate::str::contains("enforce_preconditions")));
}

// ── Session ─────────────────────────────────────────────────────────

#[test]
fn test_session_keeps_state_between_lines() {
    let output = wifidash_cmd()
        .arg("session")
        .write_stdin("pause 1\nblock 1\npause 1\nget 1\nquit\nstatus\n")
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Blocked:   true"), "{stdout}");
    assert!(stdout.contains("Paused:    false"), "{stdout}");
    assert!(!stdout.contains("devices connected"), "nothing runs after quit");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("blocked"), "{stderr}");
}
