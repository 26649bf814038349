//! Extraction of the `$spreadsheet` and `$data` sections.

use crate::error::{RequestError, RequestResult};
use crate::normalize::normalize_metadata;
use crate::schema_version::check_schema_version;
use serde::Serialize;
use serde_json::Value;
use sheet_render_domain::SpreadsheetMetadata;
use sheet_render_shared::ROOT_PATH;

/// Key of the metadata section.
pub const SPREADSHEET_KEY: &str = "$spreadsheet";
/// Key of the data section.
pub const DATA_KEY: &str = "$data";

/// The two sections of a request document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sections {
    /// Normalized `$spreadsheet` section.
    pub metadata: SpreadsheetMetadata,
    /// `$data` exactly as supplied. An explicit `null` is valid data.
    pub data: Value,
}

/// Split a parsed document into normalized metadata and raw data.
///
/// The root must be an object with both keys present. `$spreadsheet` must
/// be an object; it is gated on its schema version and then normalized.
/// `$data` is moved out without being inspected.
pub fn extract_sections(document: Value) -> RequestResult<Sections> {
    let Value::Object(mut root) = document else {
        return Err(RequestError::validation(
            "Invalid JSON structure: root must be an object",
            ROOT_PATH,
        ));
    };

    if !root.contains_key(SPREADSHEET_KEY) {
        return Err(RequestError::validation(
            "Missing required '$spreadsheet' metadata object",
            "/$spreadsheet",
        ));
    }
    if !root.contains_key(DATA_KEY) {
        return Err(RequestError::validation(
            "Missing required '$data' object",
            "/$data",
        ));
    }

    let Some(Value::Object(raw_metadata)) = root.remove(SPREADSHEET_KEY) else {
        return Err(RequestError::validation(
            "Invalid '$spreadsheet': must be an object",
            "/$spreadsheet",
        ));
    };
    let data = root.remove(DATA_KEY).unwrap_or(Value::Null);

    let schema_version = check_schema_version(&raw_metadata)?;
    let metadata = normalize_metadata(raw_metadata, schema_version)?;

    Ok(Sections { metadata, data })
}
