//! `$spreadsheet` metadata normalization.
//!
//! Normalization never mutates the caller's mapping. It fills in every field
//! downstream code relies on, validates the mapping list, and carries all
//! other keys through untouched.

mod defaults;
mod mappings;
mod path_syntax;

pub use defaults::normalize_defaults;
pub use mappings::normalize_mappings;
pub use path_syntax::normalize_path_syntax;

use crate::error::RequestResult;
use crate::schema_version::check_schema_version;
use serde_json::{Map, Value};
use sheet_render_domain::{SchemaVersion, SpreadsheetMetadata};

/// Gate and normalize a borrowed `$spreadsheet` mapping.
///
/// The mapping is deep-copied; the caller's value is left as it was.
pub fn normalize_spreadsheet_metadata(
    raw: &Map<String, Value>,
) -> RequestResult<SpreadsheetMetadata> {
    let schema_version = check_schema_version(raw)?;
    normalize_metadata(raw.clone(), schema_version)
}

/// Normalize an owned, already-gated `$spreadsheet` mapping.
pub fn normalize_metadata(
    mut raw: Map<String, Value>,
    schema_version: SchemaVersion,
) -> RequestResult<SpreadsheetMetadata> {
    raw.remove("schemaVersion");
    let defaults = normalize_defaults(raw.remove("defaults"));
    let mappings = normalize_mappings(raw.remove("mappings"))?;
    let path_syntax = normalize_path_syntax(raw.remove("pathSyntax"));

    Ok(SpreadsheetMetadata {
        schema_version,
        defaults,
        mappings,
        path_syntax,
        extra: raw,
    })
}
