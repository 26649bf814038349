//! API v1 DTO types.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// HTTP status suggested for rejected requests.
pub const STATUS_BAD_REQUEST: u16 = 400;
/// HTTP status suggested when the request body exceeds the configured limit.
pub const STATUS_PAYLOAD_TOO_LARGE: u16 = 413;
/// HTTP status suggested for internal failures.
pub const STATUS_INTERNAL_ERROR: u16 = 500;

/// Error kind exposed in API v1 responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApiV1ErrorKind {
    /// Expected, user-facing errors (rejected requests, bad settings).
    Expected,
    /// Invariant violations that indicate a bug.
    Invariant,
}

/// API v1 error code string (stable contract value).
pub type ApiV1ErrorCode = String;

/// Metadata map attached to API v1 errors.
pub type ApiV1ErrorMeta = BTreeMap<String, String>;

/// API v1 error payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiV1ErrorDto {
    /// Stable error code (e.g. `ERR_REQUEST_PARSING_ERROR`).
    pub code: ApiV1ErrorCode,
    /// Human-readable message for the caller.
    pub message: String,
    /// Error category.
    pub kind: ApiV1ErrorKind,
    /// Suggested HTTP status.
    pub status: u16,
    /// Optional metadata for debugging and correlation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<ApiV1ErrorMeta>,
    /// Kind-specific diagnostic fields (`errorType`, `path`, `details`, ...).
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// API v1 result wrapper for success or failure payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ApiV1Result<T> {
    /// Success response.
    Ok {
        /// Indicates success.
        ok: bool,
        /// Success payload.
        data: T,
    },
    /// Error response.
    Err {
        /// Indicates failure.
        ok: bool,
        /// Error payload.
        error: ApiV1ErrorDto,
    },
}

impl<T> ApiV1Result<T> {
    /// Build a success response wrapper.
    #[must_use]
    pub const fn ok(data: T) -> Self {
        Self::Ok { ok: true, data }
    }

    /// Build an error response wrapper.
    #[must_use]
    pub const fn err(error: ApiV1ErrorDto) -> Self {
        Self::Err { ok: false, error }
    }

    /// Suggested HTTP status for the whole response.
    #[must_use]
    pub const fn status(&self) -> u16 {
        match self {
            Self::Ok { .. } => 200,
            Self::Err { error, .. } => error.status,
        }
    }
}

/// API v1 payload for an accepted render request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiV1ParsedRequestDto {
    /// Normalized `$spreadsheet` section.
    pub metadata: Value,
    /// `$data` exactly as supplied.
    pub data: Value,
}
