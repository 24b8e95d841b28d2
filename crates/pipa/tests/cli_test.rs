//! Integration tests for the `pipa` CLI binary.
//!
//! Argument parsing, help output, shell completions, config management, and
//! error exit codes. None of these reach a live codec.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `pipa` binary with env isolation.
///
/// Clears all `PIPA_*` env vars and points config directories at `home`
/// so tests never touch the user's real configuration or keyring.
fn pipa_cmd_in(home: &str) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("pipa");
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home)
        .env("NO_COLOR", "1")
        .env_remove("DBUS_SESSION_BUS_ADDRESS")
        .env_remove("RUST_LOG")
        .env_remove("PIPA_PROFILE")
        .env_remove("PIPA_HOST")
        .env_remove("PIPA_COMMUNITY")
        .env_remove("PIPA_SNMP_VERSION")
        .env_remove("PIPA_RETRIES")
        .env_remove("PIPA_TIMEOUT")
        .env_remove("PIPA_OUTPUT");
    cmd
}

fn pipa_cmd() -> assert_cmd::Command {
    pipa_cmd_in("/tmp/pipa-cli-test-nonexistent")
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = pipa_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    pipa_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("PIPA audio codecs")
            .and(predicate::str::contains("streams"))
            .and(predicate::str::contains("counters"))
            .and(predicate::str::contains("status")),
    );
}

#[test]
fn test_version_flag() {
    pipa_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("pipa"));
}

#[test]
fn test_streams_help_mentions_all() {
    pipa_cmd()
        .args(["streams", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--all"));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    pipa_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    pipa_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pipa"));
}

#[test]
fn test_completions_fish() {
    pipa_cmd()
        .args(["completions", "fish"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

// ── Argument validation ─────────────────────────────────────────────

#[test]
fn test_snmp_version_out_of_range_is_usage_error() {
    pipa_cmd()
        .args(["--snmp-version", "3", "unit"])
        .assert()
        .code(2);
}

#[test]
fn test_unknown_subcommand_fails() {
    pipa_cmd().arg("reboot").assert().code(2);
}

// ── Connection setup errors ─────────────────────────────────────────

#[test]
fn test_no_host_and_no_config() {
    let output = pipa_cmd().arg("streams").output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    let text = combined_output(&output);
    assert!(text.contains("No codec configured"), "Unexpected output:\n{text}");
    assert!(text.contains("config init"), "Unexpected output:\n{text}");
}

#[test]
fn test_missing_community_is_auth_error() {
    let output = pipa_cmd()
        .args(["--host", "192.0.2.10", "unit"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3));
    assert!(combined_output(&output).contains("No community configured"));
}

#[test]
fn test_blank_host_is_usage_error() {
    pipa_cmd()
        .args(["--host", " ", "--community", "public", "streams"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("host"));
}

#[test]
fn test_zero_timeout_is_rejected_before_polling() {
    pipa_cmd()
        .args(["--host", "192.0.2.10", "--community", "public", "--timeout", "0", "counters"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("timeout"));
}

#[test]
fn test_unknown_profile() {
    pipa_cmd()
        .args(["--profile", "nowhere", "streams"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Profile 'nowhere' not found"));
}

// ── Config management ───────────────────────────────────────────────

#[test]
fn test_config_init_requires_host() {
    let home = tempfile::tempdir().unwrap();
    pipa_cmd_in(home.path().to_str().unwrap())
        .args(["config", "init"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--host"));
}

#[cfg(target_os = "linux")]
#[test]
fn test_config_path_follows_xdg() {
    let home = tempfile::tempdir().unwrap();
    let home_str = home.path().to_str().unwrap();
    pipa_cmd_in(home_str)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(home_str).and(predicate::str::contains("config.toml")));
}

#[cfg(target_os = "linux")]
#[test]
fn test_config_init_then_show() {
    let home = tempfile::tempdir().unwrap();
    let home_str = home.path().to_str().unwrap();

    pipa_cmd_in(home_str)
        .args([
            "--profile",
            "studio",
            "--host",
            "10.20.0.15",
            "--snmp-version",
            "1",
            "config",
            "init",
            "--community-env",
            "STUDIO_COMMUNITY",
        ])
        .assert()
        .success();

    pipa_cmd_in(home_str)
        .args(["--output", "json-compact", "config", "show"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains(r#""default_profile":"studio""#)
                .and(predicate::str::contains(r#""host":"10.20.0.15""#))
                .and(predicate::str::contains(r#""community_env":"STUDIO_COMMUNITY""#))
                .and(predicate::str::contains(r#""version":1"#)),
        );

    pipa_cmd_in(home_str)
        .args(["config", "profiles"])
        .assert()
        .success()
        .stdout("studio *\n");
}

#[cfg(target_os = "linux")]
#[test]
fn test_plaintext_community_is_masked_in_show() {
    let home = tempfile::tempdir().unwrap();
    let home_str = home.path().to_str().unwrap();

    pipa_cmd_in(home_str)
        .args(["--host", "10.20.0.15", "config", "init"])
        .assert()
        .success();

    pipa_cmd_in(home_str)
        .args(["config", "set-community", "--plaintext", "s3cret"])
        .assert()
        .success();

    pipa_cmd_in(home_str)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("********").and(predicate::str::contains("s3cret").not()));
}

#[cfg(target_os = "linux")]
#[test]
fn test_config_use_unknown_profile() {
    let home = tempfile::tempdir().unwrap();
    let home_str = home.path().to_str().unwrap();

    pipa_cmd_in(home_str)
        .args(["--host", "10.20.0.15", "config", "init"])
        .assert()
        .success();

    pipa_cmd_in(home_str)
        .args(["config", "use", "ob"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Available profiles: default"));
}
