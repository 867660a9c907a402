//! Basic CLI E2E tests.
//!
//! Commands that need live service credentials are not exercised here; these
//! tests stick to surfaces that work with an empty configuration.

use std::process::Command;

fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_teampulse"))
        .args(args)
        .output()
        .expect("failed to execute CLI");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_help() {
    let (stdout, _, code) = run_cli(&["--help"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("workload"));
    assert!(stdout.contains("sprint"));
}

#[test]
fn test_config_path() {
    let (stdout, _, code) = run_cli(&["config", "path"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("config.toml"));
}

#[test]
fn test_unknown_subcommand_fails() {
    let (_, _, code) = run_cli(&["bogus"]);
    assert_ne!(code, 0);
}

#[test]
fn test_unknown_report_format_rejected() {
    let (_, stderr, code) = run_cli(&["workload", "report", "--format", "pdf"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("Unknown report format"));
}

#[test]
fn test_workload_report_runs_without_sources() {
    // With nothing configured every adapter is skipped and the report
    // renders an empty team.
    let (stdout, _, code) = run_cli(&["workload", "report"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("TEAM WORKLOAD REPORT"));
    assert!(stdout.contains("Team: 0 member(s)"));
}
