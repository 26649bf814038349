//! CLI parse command E2E tests.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

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

fn parse_with_stdin(body: &str, args: &[&str]) -> io::Result<Output> {
    let mut child = command()
        .args(args)
        .args(["parse", "--stdin"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;
    child
        .stdin
        .take()
        .ok_or_else(|| io::Error::other("stdin not captured"))?
        .write_all(body.as_bytes())?;
    child.wait_with_output()
}

#[test]
fn valid_request_file_is_normalized() -> io::Result<()> {
    let output = command()
        .args(["--json", "parse", "--input"])
        .arg(fixture_path("request.valid.json"))
        .output()?;
    assert_eq!(output.status.code(), Some(0));

    let value = stdout_json(&output)?;
    assert_eq!(value["ok"], true);
    let metadata = &value["data"]["metadata"];
    assert_eq!(metadata["schemaVersion"], "spreadsheet-render-1.2");
    assert_eq!(metadata["defaults"]["sheet"]["name"], "Orders");
    assert_eq!(metadata["defaults"]["nullDisplay"], "-");
    assert_eq!(metadata["defaults"]["emptyArrayDisplay"], "[empty array]");
    assert_eq!(metadata["mappings"][0]["match"], "prefix");
    assert_eq!(value["data"]["data"]["orders"][0]["total"], 12.5);
    Ok(())
}

#[test]
fn rejected_request_exits_with_invalid_input() -> io::Result<()> {
    let output = command()
        .args(["--json", "parse", "--input"])
        .arg(fixture_path("request.bad-version.json"))
        .output()?;
    assert_eq!(output.status.code(), Some(2));

    let value = stdout_json(&output)?;
    assert_eq!(value["ok"], false);
    assert_eq!(value["error"]["errorType"], "SCHEMA_VALIDATION_ERROR");
    assert_eq!(value["error"]["path"], "/$spreadsheet/schemaVersion");
    assert_eq!(value["error"]["fieldName"], "schemaVersion");
    assert_eq!(value["error"]["actualValue"], "v1");
    Ok(())
}

#[test]
fn stdin_syntax_error_reports_location() -> io::Result<()> {
    let output = parse_with_stdin("{\n  \"$data\": {},\n  oops\n}", &["--json"])?;
    assert_eq!(output.status.code(), Some(2));

    let value = stdout_json(&output)?;
    assert_eq!(value["error"]["errorType"], "PARSING_ERROR");
    assert_eq!(value["error"]["details"]["line"], 3);
    assert_eq!(value["error"]["details"]["column"], 3);
    Ok(())
}

#[test]
fn event_mode_validates_the_envelope() -> io::Result<()> {
    let output = command()
        .args(["--json", "parse", "--event", "--input"])
        .arg(fixture_path("event.valid.json"))
        .output()?;
    assert_eq!(output.status.code(), Some(0));

    let output = command()
        .args(["--json", "parse", "--event", "--input"])
        .arg(fixture_path("event.missing-post-data.json"))
        .output()?;
    assert_eq!(output.status.code(), Some(2));
    let value = stdout_json(&output)?;
    assert_eq!(value["error"]["errorType"], "HTTP_EVENT_ERROR");
    assert_eq!(value["error"]["path"], "/postData");
    assert_eq!(value["error"]["actualType"], "undefined");
    Ok(())
}

#[test]
fn body_limit_flag_and_env_reject_large_bodies() -> io::Result<()> {
    let output = command()
        .args(["--json", "parse", "--max-body-bytes", "16", "--input"])
        .arg(fixture_path("request.valid.json"))
        .output()?;
    assert_eq!(output.status.code(), Some(2));
    let value = stdout_json(&output)?;
    assert_eq!(value["error"]["status"], 413);
    assert_eq!(value["error"]["limitBytes"], 16);

    let output = command()
        .env("SHEET_RENDER_MAX_BODY_BYTES", "16")
        .args(["--json", "parse", "--input"])
        .arg(fixture_path("request.valid.json"))
        .output()?;
    assert_eq!(output.status.code(), Some(2));
    let value = stdout_json(&output)?;
    assert_eq!(value["error"]["status"], 413);
    Ok(())
}

#[test]
fn text_output_summarizes_the_request() -> io::Result<()> {
    let output = command()
        .args(["parse", "--input"])
        .arg(fixture_path("request.valid.json"))
        .output()?;
    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("schemaVersion: spreadsheet-render-1.2\n"));
    assert!(stdout.contains("mappings: 1 (orders)\n"));
    Ok(())
}

#[test]
fn debug_logging_goes_to_stderr_only() -> io::Result<()> {
    let output = command()
        .env("SHEET_RENDER_LOG", "debug")
        .env("SHEET_RENDER_LOG_FORMAT", "json")
        .args(["--output", "ndjson", "parse", "--input"])
        .arg(fixture_path("request.valid.json"))
        .output()?;
    assert_eq!(output.status.code(), Some(0));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().count(), 1, "stdout carries only the result");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("request accepted"));
    assert!(!stderr.contains("Orders"), "request bodies are never logged");
    Ok(())
}

#[test]
fn missing_input_file_is_an_io_error() -> io::Result<()> {
    let output = command()
        .args(["parse", "--input"])
        .arg(fixture_path("does-not-exist.json"))
        .output()?;
    assert_eq!(output.status.code(), Some(3));
    Ok(())
}
