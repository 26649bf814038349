//! # sheet-render-request
//!
//! Validation and normalization pipeline for spreadsheet render requests.
//!
//! ```text
//! envelope -> validate_http_event -> parse_json_safe -> extract_sections
//!          -> check_schema_version -> normalize_metadata -> ParsedPayload
//! ```
//!
//! Every stage is a pure function. The first failure aborts the pipeline and
//! is returned unchanged as a [`RequestError`].

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod envelope;
pub mod error;
pub mod json;
pub mod normalize;
pub mod options;
pub mod schema;
pub mod schema_version;
pub mod sections;

pub use envelope::{HttpEvent, PostData, ValidatedEvent, validate_http_event};
pub use error::{ParsingDetails, RequestError, RequestResult};
pub use json::{SourceLocation, location_of, parse_json_input, parse_json_safe};
pub use normalize::{normalize_metadata, normalize_spreadsheet_metadata};
pub use options::ParseOptions;
pub use schema::spreadsheet_metadata_schema;
pub use schema_version::check_schema_version;
pub use sections::{DATA_KEY, SPREADSHEET_KEY, Sections, extract_sections};

use serde::Serialize;
use serde_json::Value;
use sheet_render_domain::SpreadsheetMetadata;

/// Outcome of a successful pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedPayload {
    /// Normalized `$spreadsheet` section.
    pub metadata: SpreadsheetMetadata,
    /// `$data` exactly as supplied.
    pub data: Value,
    /// The request body, byte-for-byte.
    pub raw: String,
}

/// Run the full pipeline over a transport envelope with default options.
pub fn parse_http_event(event: &Value) -> RequestResult<ParsedPayload> {
    parse_http_event_with(event, &ParseOptions::default())
}

/// Run the full pipeline over a transport envelope.
pub fn parse_http_event_with(
    event: &Value,
    options: &ParseOptions,
) -> RequestResult<ParsedPayload> {
    let result = run_pipeline(event, options);
    match &result {
        Ok(payload) => tracing::debug!(
            body_len = payload.raw.len(),
            mapping_count = payload.metadata.mappings.len(),
            schema_version = %payload.metadata.schema_version,
            "request accepted"
        ),
        Err(error) => tracing::debug!(
            error_type = error.error_type(),
            path = error.path(),
            "request rejected"
        ),
    }
    result
}

fn run_pipeline(event: &Value, options: &ParseOptions) -> RequestResult<ParsedPayload> {
    let body = validate_http_event(event, options)?.body();
    let document = parse_json_safe(body)?;
    let Sections { metadata, data } = extract_sections(document)?;

    Ok(ParsedPayload {
        metadata,
        data,
        raw: body.to_owned(),
    })
}

/// Returns the request crate version.
#[must_use]
pub const fn request_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
