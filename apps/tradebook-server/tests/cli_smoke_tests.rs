//! CLI smoke tests for the tradebook-server binary.

use std::process::{Command, Stdio};
use tempfile::TempDir;

fn run_tradebook_server(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_tradebook-server"))
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .expect("Failed to execute tradebook-server")
}

#[test]
fn test_cli_help_command() {
    let output = run_tradebook_server(&["--help"]);

    assert!(output.status.success(), "Help command should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("tradebook-server") || stdout.contains("Tradebook"),
        "Should contain binary name"
    );
    assert!(
        stdout.contains("Usage:") || stdout.contains("USAGE:"),
        "Should contain usage information"
    );
    assert!(stdout.contains("run"), "Should contain 'run' subcommand");
    assert!(
        stdout.contains("check"),
        "Should contain 'check' subcommand"
    );
    assert!(stdout.contains("--config"), "Should mention config option");
}

#[test]
fn test_cli_version_command() {
    let output = run_tradebook_server(&["--version"]);

    assert!(output.status.success(), "Version command should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("tradebook-server"),
        "Should contain binary name"
    );
    assert!(
        stdout.chars().any(|c| c.is_ascii_digit()),
        "Should contain version numbers"
    );
}

#[test]
fn test_cli_invalid_command() {
    let output = run_tradebook_server(&["invalid-command"]);

    assert!(!output.status.success(), "Invalid command should fail");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("error") || stderr.contains("invalid") || stderr.contains("unexpected"),
        "Should contain error message about invalid command"
    );
}

#[test]
fn test_cli_check_with_valid_config() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("valid.yaml");

    let config_content = r#"
server:
  host: 127.0.0.1
  port: 9091

auth:
  username: ops
  password: secret

logging:
  console_level: error
"#;

    std::fs::write(&config_path, config_content).expect("Failed to write config file");

    let output = run_tradebook_server(&["--config", config_path.to_str().unwrap(), "check"]);

    if !output.status.success() {
        eprintln!("STDERR: {}", String::from_utf8_lossy(&output.stderr));
        eprintln!("STDOUT: {}", String::from_utf8_lossy(&output.stdout));
    }
    assert!(output.status.success(), "Should succeed with valid config");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("Configuration check passed"),
        "Should report a passing check: {stdout}"
    );
    assert!(
        stdout.contains("127.0.0.1:9091"),
        "Should echo the effective bind address: {stdout}"
    );
}

#[test]
fn test_cli_check_rejects_unknown_fields() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("unknown.yaml");

    std::fs::write(&config_path, "server:\n  hostname: oops\n").expect("Failed to write file");

    let output = run_tradebook_server(&["--config", config_path.to_str().unwrap(), "check"]);

    assert!(
        !output.status.success(),
        "Should fail on unknown config fields"
    );
}

#[test]
fn test_cli_port_override() {
    let output = run_tradebook_server(&["--port", "7070", "--print-config"]);

    assert!(output.status.success(), "print-config should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("7070"),
        "CLI port should show up in the printed config: {stdout}"
    );
}

#[test]
fn test_cli_config_flag_short_form() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("short.yaml");
    std::fs::write(&config_path, "server:\n  port: 8099\n").expect("Failed to write file");

    let output = run_tradebook_server(&["-c", config_path.to_str().unwrap(), "check"]);

    assert!(output.status.success(), "Short config flag should work");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("8099"), "Should use the file's port: {stdout}");
}

#[test]
fn test_cli_subcommand_help() {
    let output = run_tradebook_server(&["run", "--help"]);
    assert!(
        output.status.success(),
        "Run subcommand help should succeed"
    );

    let output = run_tradebook_server(&["check", "--help"]);
    assert!(
        output.status.success(),
        "Check subcommand help should succeed"
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("check") || stdout.contains("configuration"),
        "Should contain information about check command"
    );
}
