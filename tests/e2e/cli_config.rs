//! CLI settings loading E2E tests.

use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn fixture_path(relative: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("tests")
        .join("e2e")
        .join("fixtures")
        .join(relative)
}

fn command() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_sheet-render"));
    command
        .env_remove("SHEET_RENDER_LOG")
        .env_remove("SHEET_RENDER_LOG_FORMAT")
        .env_remove("SHEET_RENDER_MAX_BODY_BYTES");
    command
}

fn stdout_json(output: &Output) -> io::Result<serde_json::Value> {
    serde_json::from_slice(&output.stdout).map_err(io::Error::other)
}

#[test]
fn defaults_are_shown_without_a_file() -> io::Result<()> {
    let output = command().args(["--json", "config", "show"]).output()?;
    assert!(output.status.success());

    let value = stdout_json(&output)?;
    assert_eq!(value["logging"]["level"], "warn");
    assert_eq!(value["logging"]["format"], "text");
    assert!(value["limits"].get("maxBodyBytes").is_none());
    Ok(())
}

#[test]
fn env_overrides_file_values() -> io::Result<()> {
    let output = command()
        .env("SHEET_RENDER_LOG", "info")
        .args(["--json", "config", "show", "--config"])
        .arg(fixture_path("settings.valid.toml"))
        .output()?;
    assert!(output.status.success());

    let value = stdout_json(&output)?;
    assert_eq!(value["logging"]["level"], "info");
    assert_eq!(value["logging"]["format"], "json");
    assert_eq!(value["limits"]["maxBodyBytes"], 32);
    Ok(())
}

#[test]
fn text_output_is_toml() -> io::Result<()> {
    let output = command()
        .args(["config", "show", "--config"])
        .arg(fixture_path("settings.valid.toml"))
        .output()?;
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("[logging]"));
    assert!(stdout.contains("maxBodyBytes = 32"));
    Ok(())
}

#[test]
fn invalid_settings_emit_structured_errors() -> io::Result<()> {
    let output = command()
        .args(["--json", "config", "show", "--config"])
        .arg(fixture_path("settings.invalid.json"))
        .output()?;
    assert_eq!(output.status.code(), Some(2));

    let value = stdout_json(&output)?;
    assert_eq!(value["ok"], false);
    assert_eq!(value["error"]["code"], "ERR_CONFIG_INVALID_JSON");
    Ok(())
}

#[test]
fn invalid_env_is_rejected() -> io::Result<()> {
    let output = command()
        .env("SHEET_RENDER_LOG_FORMAT", "xml")
        .args(["config", "show"])
        .output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("SHEET_RENDER_LOG_FORMAT"));
    Ok(())
}

#[test]
fn missing_settings_file_is_an_io_error() -> io::Result<()> {
    let output = command()
        .args(["config", "show", "--config"])
        .arg(fixture_path("missing.toml"))
        .output()?;
    assert_eq!(output.status.code(), Some(3));
    Ok(())
}
