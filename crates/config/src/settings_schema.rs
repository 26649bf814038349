//! JSON Schema export for the settings file.

use crate::Settings;
use schemars::{Schema, schema_for};

/// JSON Schema for `Settings`.
#[must_use]
pub fn settings_schema() -> Schema {
    schema_for!(Settings)
}
