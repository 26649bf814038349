//! JSON Schema export for the normalized model.

use schemars::{Schema, schema_for};
use sheet_render_domain::SpreadsheetMetadata;

/// JSON Schema for normalized `SpreadsheetMetadata`.
#[must_use]
pub fn spreadsheet_metadata_schema() -> Schema {
    schema_for!(SpreadsheetMetadata)
}
