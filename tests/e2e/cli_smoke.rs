//! CLI smoke tests: info, schema, and version output.

use std::io;
use std::process::{Command, Output};

fn run(args: &[&str]) -> io::Result<Output> {
    Command::new(env!("CARGO_BIN_EXE_sheet-render"))
        .args(args)
        .env_remove("SHEET_RENDER_LOG")
        .env_remove("SHEET_RENDER_LOG_FORMAT")
        .env_remove("SHEET_RENDER_MAX_BODY_BYTES")
        .output()
}

fn stdout_json(output: &Output) -> io::Result<serde_json::Value> {
    serde_json::from_slice(&output.stdout).map_err(io::Error::other)
}

#[test]
fn info_json_is_deterministic() -> io::Result<()> {
    let first = run(&["--json", "info"])?;
    let second = run(&["--json", "info"])?;
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout, "info output should be deterministic");

    let value = stdout_json(&first)?;
    assert_eq!(value["status"], "ok");
    assert!(value["build"]["version"].is_string());
    assert!(value["build"]["pipelineVersion"].is_string());
    Ok(())
}

#[test]
fn info_text_names_the_binary() -> io::Result<()> {
    let output = run(&["info"])?;
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("status: ok\n"));
    assert!(stdout.contains("pipeline: "));
    Ok(())
}

#[test]
fn schema_targets_print_json_schemas() -> io::Result<()> {
    let output = run(&["schema"])?;
    assert!(output.status.success());
    let metadata = stdout_json(&output)?;
    assert!(metadata["properties"]["schemaVersion"].is_object());
    assert!(metadata["properties"]["mappings"].is_object());

    let output = run(&["schema", "--target", "settings"])?;
    assert!(output.status.success());
    let settings = stdout_json(&output)?;
    assert!(settings["properties"]["logging"].is_object());

    let output = run(&["--output", "ndjson", "schema", "--target", "error"])?;
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().count(), 1, "ndjson schema is one line");
    Ok(())
}

#[test]
fn unknown_subcommand_fails_with_usage() -> io::Result<()> {
    let output = run(&["render"])?;
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Usage"));
    Ok(())
}
