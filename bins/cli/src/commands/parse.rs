//! Parse command handler.

use crate::CliOutput;
use crate::error::{CliError, ExitCode};
use crate::format::OutputMode;
use serde_json::Value;
use sheet_render_api::v1::{
    ApiV1ErrorDto, parse_result_to_api_v1_result, request_error_to_api_v1,
};
use sheet_render_request::{
    HttpEvent, ParseOptions, ParsedPayload, RequestResult, parse_http_event_with,
};
use std::fmt::Write as _;
use std::io::{self, Read};
use std::path::Path;

/// Where the request comes from and how to interpret it.
#[derive(Debug, Clone, Copy)]
pub struct ParseCommandInput<'a> {
    /// File holding the input.
    pub input: Option<&'a Path>,
    /// Read the input from stdin instead.
    pub stdin: bool,
    /// Treat the input as a complete transport envelope instead of a body.
    pub event: bool,
}

/// Run the parse command.
///
/// A rejected request is a normal outcome: the diagnostic goes to stdout
/// and the exit code is `InvalidInput`.
pub fn run_parse(
    mode: OutputMode,
    input: ParseCommandInput<'_>,
    options: &ParseOptions,
) -> Result<CliOutput, CliError> {
    let text = read_source(input)?;
    let event = if input.event {
        serde_json::from_str::<Value>(&text)
            .map_err(|error| CliError::InvalidInput(format!("event is not valid JSON: {error}")))?
    } else {
        HttpEvent::post(text).to_value()
    };

    let result = parse_http_event_with(&event, options);
    let exit_code = if result.is_ok() {
        ExitCode::Ok
    } else {
        ExitCode::InvalidInput
    };
    tracing::debug!(accepted = result.is_ok(), "parse finished");

    let stdout = if mode.is_json() || mode.is_ndjson() {
        mode.render_json(&parse_result_to_api_v1_result(&result))?
    } else {
        format_parse_text(&result)
    };

    Ok(CliOutput { stdout, exit_code })
}

fn read_source(input: ParseCommandInput<'_>) -> Result<String, CliError> {
    if input.stdin {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        return Ok(buf);
    }
    let path = input
        .input
        .ok_or_else(|| CliError::InvalidInput("missing --input or --stdin".to_string()))?;
    Ok(std::fs::read_to_string(path)?)
}

fn format_parse_text(result: &RequestResult<ParsedPayload>) -> String {
    match result {
        Ok(payload) => format_accepted_text(payload),
        Err(error) => format_rejected_text(&request_error_to_api_v1(error)),
    }
}

fn format_accepted_text(payload: &ParsedPayload) -> String {
    let metadata = &payload.metadata;
    let ids: Vec<&str> = metadata
        .mappings
        .iter()
        .map(|mapping| mapping.id.as_str())
        .collect();

    let mut output = String::from("status: ok\n");
    let _ = writeln!(output, "schemaVersion: {}", metadata.schema_version);
    if ids.is_empty() {
        output.push_str("mappings: 0\n");
    } else {
        let _ = writeln!(output, "mappings: {} ({})", ids.len(), ids.join(", "));
    }
    let _ = writeln!(
        output,
        "pathSyntax: {}",
        metadata.path_syntax.type_name().unwrap_or("custom")
    );
    let data_keys = payload
        .data
        .as_object()
        .map(|object| object.keys().map(String::as_str).collect::<Vec<_>>().join(", "))
        .unwrap_or_default();
    let _ = writeln!(output, "dataKeys: {data_keys}");
    output
}

fn format_rejected_text(error: &ApiV1ErrorDto) -> String {
    let mut output = String::from("status: error\n");
    let _ = writeln!(output, "code: {}", error.code);
    let _ = writeln!(output, "httpStatus: {}", error.status);
    let _ = writeln!(output, "message: {}", error.message);
    for (key, value) in &error.fields {
        let rendered = match value {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        };
        let _ = writeln!(output, "{key}: {rendered}");
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::OutputFormat;
    use serde_json::json;
    use sheet_render_request::parse_http_event;
    use std::error::Error;

    #[test]
    fn accepted_text_lists_mappings_and_data_keys() -> Result<(), Box<dyn Error>> {
        let body = json!({
            "$spreadsheet": {
                "schemaVersion": "spreadsheet-render-1.0",
                "mappings": [{"id": "orders", "path": "/orders"}]
            },
            "$data": {"orders": []}
        })
        .to_string();
        let result = parse_http_event(&HttpEvent::post(body).to_value());
        let text = format_parse_text(&result);

        assert!(text.starts_with("status: ok\n"));
        assert!(text.contains("schemaVersion: spreadsheet-render-1.0\n"));
        assert!(text.contains("mappings: 1 (orders)\n"));
        assert!(text.contains("pathSyntax: json-pointer-wildcard\n"));
        assert!(text.contains("dataKeys: orders\n"));
        Ok(())
    }

    #[test]
    fn rejected_text_shows_code_and_path() {
        let result = parse_http_event(&HttpEvent::post("").to_value());
        let text = format_parse_text(&result);

        assert!(text.starts_with("status: error\n"));
        assert!(text.contains("code: ERR_REQUEST_HTTP_EVENT_ERROR\n"));
        assert!(text.contains("path: /postData/contents\n"));
        assert!(text.contains("errorType: HTTP_EVENT_ERROR\n"));
    }

    #[test]
    fn missing_source_is_invalid_input() {
        let mode = OutputMode {
            format: OutputFormat::Text,
        };
        let input = ParseCommandInput {
            input: None,
            stdin: false,
            event: false,
        };
        let error = run_parse(mode, input, &ParseOptions::default()).err();
        assert!(matches!(error, Some(CliError::InvalidInput(_))));
    }
}
