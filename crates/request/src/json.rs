//! Fault-tolerant JSON parsing with line/column diagnostics.

use crate::error::{ParsingDetails, RequestError, RequestResult};
use serde_json::Value;
use serde_json::error::Category;
use sheet_render_domain::JsonType;
use sheet_render_shared::ROOT_PATH;

/// Location of a decode failure inside the input text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    /// 1-based line.
    pub line: usize,
    /// 1-based column, counted in characters.
    pub column: usize,
    /// 0-based character offset.
    pub position: usize,
}

/// Parse an arbitrary JSON value that is expected to hold the body text.
pub fn parse_json_input(input: &Value) -> RequestResult<Value> {
    match input {
        Value::String(raw) => parse_json_safe(raw),
        other => Err(RequestError::parsing(
            "Invalid input: raw must be a string",
            ROOT_PATH,
            Some(ParsingDetails::InputType {
                expected_type: "string".to_owned(),
                actual_type: JsonType::of(other).as_str().to_owned(),
            }),
        )),
    }
}

/// Parse body text into an object or array.
///
/// Empty or whitespace-only input, syntax errors, and scalar roots are all
/// reported as [`RequestError::Parsing`] at `/`.
pub fn parse_json_safe(raw: &str) -> RequestResult<Value> {
    let trimmed_length = raw.trim().chars().count();
    if trimmed_length == 0 {
        return Err(RequestError::parsing(
            "Invalid JSON: empty or whitespace-only string",
            ROOT_PATH,
            Some(ParsingDetails::EmptyInput {
                input_length: raw.chars().count(),
                trimmed_length,
            }),
        ));
    }

    let parsed: Value =
        serde_json::from_str(raw).map_err(|error| decode_error(raw, &error))?;

    match parsed {
        Value::Object(_) | Value::Array(_) => Ok(parsed),
        scalar => {
            let actual_type = JsonType::of(&scalar);
            Err(RequestError::parsing(
                format!("Invalid JSON: root must be an object or array, got {actual_type}"),
                ROOT_PATH,
                Some(ParsingDetails::RootType {
                    expected_type: "object or array".to_owned(),
                    actual_type: actual_type.as_str().to_owned(),
                    actual_value: scalar,
                }),
            ))
        },
    }
}

fn decode_error(raw: &str, error: &serde_json::Error) -> RequestError {
    match error.classify() {
        Category::Syntax | Category::Eof => syntax_error(raw, error),
        Category::Data | Category::Io => {
            let original_error = error.to_string();
            RequestError::parsing(
                format!("JSON parsing failed: {original_error}"),
                ROOT_PATH,
                Some(ParsingDetails::Decoder { original_error }),
            )
        },
    }
}

fn syntax_error(raw: &str, error: &serde_json::Error) -> RequestError {
    let original_error = strip_location(error);
    let Some(location) = locate(raw, error.line(), error.column()) else {
        return RequestError::parsing(
            format!("JSON syntax error: {original_error}"),
            ROOT_PATH,
            Some(ParsingDetails::Syntax {
                line: None,
                column: None,
                position: None,
                original_error,
            }),
        );
    };

    RequestError::parsing(
        format!(
            "JSON syntax error: {original_error} (line {}, column {})",
            location.line, location.column
        ),
        ROOT_PATH,
        Some(ParsingDetails::Syntax {
            line: Some(location.line),
            column: Some(location.column),
            position: Some(location.position),
            original_error,
        }),
    )
}

/// The decoder's message with its trailing ` at line L column C` removed.
fn strip_location(error: &serde_json::Error) -> String {
    let rendered = error.to_string();
    if error.line() == 0 {
        return rendered;
    }
    let suffix = format!(" at line {} column {}", error.line(), error.column());
    let stripped = rendered.strip_suffix(suffix.as_str()).map(str::to_owned);
    stripped.unwrap_or(rendered)
}

/// Translate the decoder's line/column into a character location.
///
/// The decoder reports a 1-based line and a byte column within that line,
/// where `column - 1` addresses the offending byte. Line 0 means the decoder
/// had no location.
fn locate(raw: &str, line: usize, column: usize) -> Option<SourceLocation> {
    if line == 0 {
        return None;
    }
    let line_start = if line == 1 {
        0
    } else {
        raw.match_indices('\n')
            .nth(line - 2)
            .map(|(index, _)| index + 1)?
    };
    let offset = line_start
        .saturating_add(column.saturating_sub(1))
        .min(raw.len());
    let offset = (0..=offset)
        .rev()
        .find(|&index| raw.is_char_boundary(index))
        .unwrap_or(0);
    Some(location_of(raw, offset))
}

/// Character location of a byte offset.
///
/// Offsets past the end or inside a multi-byte character are clamped back to
/// the nearest preceding boundary.
#[must_use]
pub fn location_of(raw: &str, byte_offset: usize) -> SourceLocation {
    let mut end = byte_offset.min(raw.len());
    while end > 0 && !raw.is_char_boundary(end) {
        end -= 1;
    }
    let prefix = raw.get(..end).unwrap_or_default();
    let tail = prefix.rsplit('\n').next().unwrap_or_default();
    SourceLocation {
        line: prefix.matches('\n').count() + 1,
        column: tail.chars().count() + 1,
        position: prefix.chars().count(),
    }
}
