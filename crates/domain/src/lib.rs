//! # sheet-render-domain
//!
//! Domain model for spreadsheet render requests:
//!
//! - **JSON types** - `JsonType`, loose truthiness helpers
//! - **Primitives** - `SchemaVersion`
//! - **Metadata** - `SpreadsheetMetadata`, `SpreadsheetDefaults`, `MappingSpec`, `PathSyntax`
//!
//! ## Dependency Rules
//!
//! - Depends only on `shared` crate
//! - Pure domain logic with no I/O

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

// Re-export shared types for convenience
pub use sheet_render_shared::shared_crate_version;

pub mod json_type;
pub mod metadata;
pub mod primitives;

pub use json_type::{
    JsonType, UNDEFINED_TYPE_NAME, is_container, is_present_and_truthy, is_truthy, type_name_of,
};
pub use metadata::{
    DEFAULT_EMPTY_ARRAY_DISPLAY, DEFAULT_EMPTY_OBJECT_DISPLAY, DEFAULT_EMPTY_STRING_DISPLAY,
    DEFAULT_NULL_DISPLAY, DEFAULT_PATH_SYNTAX_TYPE, DEFAULT_SECTION_KEYS, DISPLAY_DEFAULTS,
    MAX_SAFE_INTEGER, MappingSpec, NUMBER_PRECISION_THRESHOLD_KEY, PathSyntax, SpreadsheetDefaults,
    SpreadsheetMetadata,
};
pub use primitives::{PrimitiveError, SCHEMA_VERSION_FORMAT, SCHEMA_VERSION_PREFIX, SchemaVersion};

/// Returns the domain crate version.
#[must_use]
pub const fn domain_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
