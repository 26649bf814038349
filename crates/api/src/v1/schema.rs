//! JSON Schema exports for API v1 DTOs.

use crate::v1::{ApiV1ErrorDto, ApiV1ParsedRequestDto};
use schemars::{Schema, schema_for};

/// JSON Schema for `ApiV1ErrorDto`.
#[must_use]
pub fn api_v1_error_schema() -> Schema {
    schema_for!(ApiV1ErrorDto)
}

/// JSON Schema for `ApiV1ParsedRequestDto`.
#[must_use]
pub fn api_v1_parsed_request_schema() -> Schema {
    schema_for!(ApiV1ParsedRequestDto)
}
