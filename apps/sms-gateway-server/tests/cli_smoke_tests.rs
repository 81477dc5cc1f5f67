//! CLI smoke tests for sms-gateway-server binary
//!
//! These tests verify that the CLI commands work correctly, including
//! configuration validation, help output, and server start-up.

use std::path::Path;
use std::process::{Command, Stdio};
use std::time::Duration;
use tempfile::TempDir;
use tokio::time::timeout;

/// Helper to run the sms-gateway-server binary with given arguments
fn run_sms_gateway_server(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_sms-gateway-server"))
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .expect("Failed to execute sms-gateway-server")
}

/// Helper to run the sms-gateway-server binary with timeout
async fn run_sms_gateway_server_with_timeout(
    args: &[&str],
    timeout_duration: Duration,
) -> Result<std::process::Output, Box<dyn std::error::Error>> {
    let mut cmd = tokio::process::Command::new(env!("CARGO_BIN_EXE_sms-gateway-server"));
    cmd.args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    match timeout(timeout_duration, cmd.output()).await {
        Ok(result) => result.map_err(|e| e.into()),
        Err(elapsed) => Err(elapsed.into()),
    }
}

/// Write `body` under a `server` section rooted in the temp dir.
fn write_config(dir: &Path, name: &str, body: &str) -> String {
    let home = dir.join("home").to_string_lossy().replace('\\', "/");
    let content = format!(
        r#"
server:
  home_dir: "{home}"
  host: "127.0.0.1"
  port: 0
{body}
"#
    );
    let path = dir.join(name);
    std::fs::write(&path, content).expect("Failed to write config file");
    path.to_string_lossy().to_string()
}

#[test]
fn test_cli_help_command() {
    let output = run_sms_gateway_server(&["--help"]);

    assert!(output.status.success(), "Help command should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("sms-gateway-server"), "Should contain binary name");
    assert!(stdout.contains("Usage:"), "Should contain usage information");
    assert!(stdout.contains("run"), "Should contain 'run' subcommand");
    assert!(stdout.contains("check"), "Should contain 'check' subcommand");
    assert!(stdout.contains("--config"), "Should mention config option");
    assert!(stdout.contains("--mock"), "Should mention mock option");
}

#[test]
fn test_cli_version_command() {
    let output = run_sms_gateway_server(&["--version"]);

    assert!(output.status.success(), "Version command should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("sms-gateway-server"));
    assert!(stdout.contains("0.1.0"));
}

#[test]
fn test_cli_invalid_command() {
    let output = run_sms_gateway_server(&["invalid-command"]);

    assert!(!output.status.success(), "Invalid command should fail");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("error") || stderr.contains("unrecognized"),
        "Should contain error message about invalid command: {stderr}"
    );
}

#[test]
fn test_cli_config_validation_missing_file() {
    let output = run_sms_gateway_server(&["--config", "/nonexistent/config.yaml", "check"]);

    assert!(!output.status.success(), "Should fail with missing config");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("config file not found"),
        "Should mention config file issue: {stderr}"
    );
}

#[test]
fn test_cli_config_flag_short_form() {
    let output = run_sms_gateway_server(&["-c", "/nonexistent/config.yaml", "check"]);

    assert!(!output.status.success(), "Should fail with missing config file");
}

#[test]
fn test_cli_config_validation_invalid_yaml() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("invalid.yaml");
    std::fs::write(&config_path, "invalid: yaml: content: [unclosed")
        .expect("Failed to write file");

    let output = run_sms_gateway_server(&["--config", config_path.to_str().unwrap(), "check"]);

    assert!(!output.status.success(), "Should fail with invalid YAML");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("yaml") || stderr.contains("parse"),
        "Should mention YAML parsing issue: {stderr}"
    );
}

#[test]
fn test_cli_config_validation_valid_config() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(
        temp_dir.path(),
        "valid.yaml",
        r#"
logging:
  default:
    console_level: info
    file: "logs/sms-gateway.log"
    file_level: info

modules:
  sms_dispatch:
    processing_delay: 250ms
    worker_pool_size: 8
"#,
    );

    let output = run_sms_gateway_server(&["--config", &config_path, "check"]);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        output.status.success(),
        "Should succeed with valid config: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(stdout.contains("Configuration check passed"));
}

#[test]
fn test_cli_rejects_unknown_module_setting() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(
        temp_dir.path(),
        "typo.yaml",
        r#"
modules:
  sms_dispatch:
    worker_pool_sise: 8
"#,
    );

    let output = run_sms_gateway_server(&["--config", &config_path, "check"]);

    assert!(!output.status.success(), "Should fail on unknown field");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("sms_dispatch"), "{stderr}");
}

#[test]
fn test_cli_print_config() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(temp_dir.path(), "print.yaml", "");

    let output = run_sms_gateway_server(&["--config", &config_path, "--port", "9191", "--print-config"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("port: 9191"), "CLI port should win: {stdout}");
}

#[tokio::test]
async fn test_cli_run_command_with_memory_backends() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(temp_dir.path(), "run.yaml", "");

    let result = run_sms_gateway_server_with_timeout(
        &["--config", &config_path, "run"],
        Duration::from_secs(5),
    )
    .await;

    match result {
        // still serving when the timeout hit
        Err(err) => assert!(err.to_string().contains("elapsed"), "{err}"),
        Ok(output) => panic!(
            "Server exited early: {}",
            String::from_utf8_lossy(&output.stderr)
        ),
    }
}

#[tokio::test]
async fn test_cli_mock_flag_overrides_backends() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(
        temp_dir.path(),
        "mock.yaml",
        r#"
modules:
  sms_dispatch:
    blocklist:
      kind: redis
      url: "redis://127.0.0.1:1"
    event_log:
      kind: kafka
      brokers: "127.0.0.1:1"
"#,
    );

    let result = run_sms_gateway_server_with_timeout(
        &["--config", &config_path, "--mock", "run"],
        Duration::from_secs(5),
    )
    .await;

    match result {
        Err(err) => assert!(err.to_string().contains("elapsed"), "{err}"),
        Ok(output) => panic!(
            "Server with --mock exited early: {}",
            String::from_utf8_lossy(&output.stderr)
        ),
    }
}

#[cfg(not(feature = "kafka"))]
#[test]
fn test_cli_kafka_backend_requires_feature() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(
        temp_dir.path(),
        "kafka.yaml",
        r#"
modules:
  sms_dispatch:
    event_log:
      kind: kafka
"#,
    );

    let output = run_sms_gateway_server(&["--config", &config_path, "run"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("kafka"), "{stderr}");
}

#[test]
fn test_cli_subcommand_help() {
    let output = run_sms_gateway_server(&["run", "--help"]);
    assert!(output.status.success(), "Run subcommand help should succeed");

    let output = run_sms_gateway_server(&["check", "--help"]);
    assert!(output.status.success(), "Check subcommand help should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("configuration"));
}
