//! Structured request errors.
//!
//! Every failure in the pipeline is one of four kinds, discriminated by the
//! `errorType` tag when serialized. Each carries a message and a JSON-Pointer
//! path that is never empty.
//!
//! | Kind | `errorType` | Extra fields |
//! |------|-------------|--------------|
//! | [`HttpEvent`](RequestError::HttpEvent) | `HTTP_EVENT_ERROR` | `expectedType`, `actualType` |
//! | [`Parsing`](RequestError::Parsing) | `PARSING_ERROR` | `details` |
//! | [`SchemaValidation`](RequestError::SchemaValidation) | `SCHEMA_VALIDATION_ERROR` | `fieldName`, `expectedValue`, `actualValue` |
//! | [`Validation`](RequestError::Validation) | `VALIDATION_ERROR` | none |

use serde::Serialize;
use serde_json::Value;
use sheet_render_shared::{ErrorCode, ErrorEnvelope, normalize_error_path};

/// Result alias for pipeline stages.
pub type RequestResult<T> = Result<T, RequestError>;

/// Structured pipeline failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize)]
#[serde(tag = "errorType")]
pub enum RequestError {
    /// Malformed transport envelope.
    #[error("{message}")]
    #[serde(rename = "HTTP_EVENT_ERROR", rename_all = "camelCase")]
    HttpEvent {
        /// Human-readable description.
        message: String,
        /// Location of the offending envelope field.
        path: String,
        /// Type the field should have had.
        expected_type: String,
        /// Type the field actually had (`undefined` when absent).
        actual_type: String,
        /// Configured body limit, set only when the body exceeded it.
        #[serde(skip_serializing_if = "Option::is_none")]
        limit_bytes: Option<u64>,
    },
    /// Body is not valid JSON or its root type is not allowed.
    #[error("{message}")]
    #[serde(rename = "PARSING_ERROR")]
    Parsing {
        /// Human-readable description.
        message: String,
        /// Always `/` for parse failures.
        path: String,
        /// Diagnostic context.
        #[serde(skip_serializing_if = "Option::is_none")]
        details: Option<ParsingDetails>,
    },
    /// A named field is missing or malformed.
    #[error("{message}")]
    #[serde(rename = "SCHEMA_VALIDATION_ERROR", rename_all = "camelCase")]
    SchemaValidation {
        /// Human-readable description.
        message: String,
        /// Location of the offending field.
        path: String,
        /// Name of the offending field.
        field_name: String,
        /// Expected value or format.
        expected_value: String,
        /// Offending value, omitted when the field is absent.
        #[serde(skip_serializing_if = "Option::is_none")]
        actual_value: Option<Value>,
    },
    /// Generic structural violation.
    #[error("{message}")]
    #[serde(rename = "VALIDATION_ERROR")]
    Validation {
        /// Human-readable description.
        message: String,
        /// Location of the violation.
        path: String,
    },
}

/// Diagnostic context attached to [`RequestError::Parsing`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ParsingDetails {
    /// Decoder rejected the text.
    #[serde(rename_all = "camelCase")]
    Syntax {
        /// 1-based line of the failure.
        #[serde(skip_serializing_if = "Option::is_none")]
        line: Option<usize>,
        /// 1-based column of the failure, in characters.
        #[serde(skip_serializing_if = "Option::is_none")]
        column: Option<usize>,
        /// 0-based character offset of the failure.
        #[serde(skip_serializing_if = "Option::is_none")]
        position: Option<usize>,
        /// Decoder message without its location suffix.
        original_error: String,
    },
    /// Decoded root is not an object or array.
    #[serde(rename_all = "camelCase")]
    RootType {
        /// Always `object or array`.
        expected_type: String,
        /// Runtime type of the decoded root.
        actual_type: String,
        /// The decoded root itself.
        actual_value: Value,
    },
    /// Input handed to the parser was not a string.
    #[serde(rename_all = "camelCase")]
    InputType {
        /// Always `string`.
        expected_type: String,
        /// Runtime type of the input.
        actual_type: String,
    },
    /// Input was empty after trimming whitespace.
    #[serde(rename_all = "camelCase")]
    EmptyInput {
        /// Character count of the raw input.
        input_length: usize,
        /// Character count after trimming.
        trimmed_length: usize,
    },
    /// Decoder failed for a reason other than syntax.
    #[serde(rename_all = "camelCase")]
    Decoder {
        /// Decoder message.
        original_error: String,
    },
}

// =============================================================================
// FACTORY
// =============================================================================

impl RequestError {
    /// Generic structural violation at `path` (empty path means `/`).
    pub fn validation(message: impl Into<String>, path: impl AsRef<str>) -> Self {
        Self::Validation {
            message: message.into(),
            path: normalize_error_path(Some(path.as_ref())),
        }
    }

    /// Parse failure with optional diagnostics.
    pub fn parsing(
        message: impl Into<String>,
        path: impl AsRef<str>,
        details: Option<ParsingDetails>,
    ) -> Self {
        Self::Parsing {
            message: message.into(),
            path: normalize_error_path(Some(path.as_ref())),
            details,
        }
    }

    /// Transport envelope failure.
    pub fn http_event(
        message: impl Into<String>,
        path: impl AsRef<str>,
        expected_type: impl Into<String>,
        actual_type: impl Into<String>,
    ) -> Self {
        Self::HttpEvent {
            message: message.into(),
            path: normalize_error_path(Some(path.as_ref())),
            expected_type: expected_type.into(),
            actual_type: actual_type.into(),
            limit_bytes: None,
        }
    }

    /// Named-field failure.
    pub fn schema_validation(
        message: impl Into<String>,
        path: impl AsRef<str>,
        field_name: impl Into<String>,
        expected_value: impl Into<String>,
        actual_value: Option<Value>,
    ) -> Self {
        Self::SchemaValidation {
            message: message.into(),
            path: normalize_error_path(Some(path.as_ref())),
            field_name: field_name.into(),
            expected_value: expected_value.into(),
            actual_value,
        }
    }

    /// Attach the configured body limit to an envelope failure.
    #[must_use]
    pub fn with_limit_bytes(mut self, limit: u64) -> Self {
        if let Self::HttpEvent { limit_bytes, .. } = &mut self {
            *limit_bytes = Some(limit);
        }
        self
    }

    /// Human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::HttpEvent { message, .. }
            | Self::Parsing { message, .. }
            | Self::SchemaValidation { message, .. }
            | Self::Validation { message, .. } => message,
        }
    }

    /// JSON-Pointer location of the failure.
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::HttpEvent { path, .. }
            | Self::Parsing { path, .. }
            | Self::SchemaValidation { path, .. }
            | Self::Validation { path, .. } => path,
        }
    }

    /// Serialized discriminator, e.g. `PARSING_ERROR`.
    #[must_use]
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::HttpEvent { .. } => "HTTP_EVENT_ERROR",
            Self::Parsing { .. } => "PARSING_ERROR",
            Self::SchemaValidation { .. } => "SCHEMA_VALIDATION_ERROR",
            Self::Validation { .. } => "VALIDATION_ERROR",
        }
    }

    /// True when the body was rejected for exceeding the configured limit.
    #[must_use]
    pub const fn is_body_limit(&self) -> bool {
        matches!(
            self,
            Self::HttpEvent {
                limit_bytes: Some(_),
                ..
            }
        )
    }

    /// Parsing details, if any.
    #[must_use]
    pub const fn details(&self) -> Option<&ParsingDetails> {
        match self {
            Self::Parsing { details, .. } => details.as_ref(),
            _ => None,
        }
    }

    fn error_code(&self) -> ErrorCode {
        match self {
            Self::HttpEvent { .. } => ErrorCode::new("request", "http_event_error"),
            Self::Parsing { .. } => ErrorCode::new("request", "parsing_error"),
            Self::SchemaValidation { .. } => ErrorCode::new("request", "schema_validation_error"),
            Self::Validation { .. } => ErrorCode::new("request", "validation_error"),
        }
    }
}

impl ParsingDetails {
    /// Character offset for syntax failures with a recoverable location.
    #[must_use]
    pub const fn position(&self) -> Option<usize> {
        match self {
            Self::Syntax { position, .. } => *position,
            _ => None,
        }
    }
}

impl From<RequestError> for ErrorEnvelope {
    fn from(error: RequestError) -> Self {
        let envelope = Self::expected(error.error_code(), error.message())
            .with_metadata("path", error.path());

        match error {
            RequestError::HttpEvent {
                expected_type,
                actual_type,
                limit_bytes,
                ..
            } => {
                let envelope = envelope
                    .with_metadata("expected_type", expected_type)
                    .with_metadata("actual_type", actual_type);
                match limit_bytes {
                    Some(limit) => envelope.with_metadata("limit_bytes", limit.to_string()),
                    None => envelope,
                }
            },
            RequestError::Parsing { details, .. } => match details {
                Some(ParsingDetails::Syntax {
                    line,
                    column,
                    position,
                    ..
                }) => {
                    let mut envelope = envelope;
                    let located = [("line", line), ("column", column), ("position", position)];
                    for (key, value) in located {
                        if let Some(value) = value {
                            envelope = envelope.with_metadata(key, value.to_string());
                        }
                    }
                    envelope
                },
                Some(
                    ParsingDetails::RootType { actual_type, .. }
                    | ParsingDetails::InputType { actual_type, .. },
                ) => envelope.with_metadata("actual_type", actual_type),
                Some(ParsingDetails::EmptyInput {
                    input_length,
                    trimmed_length,
                }) => envelope
                    .with_metadata("input_length", input_length.to_string())
                    .with_metadata("trimmed_length", trimmed_length.to_string()),
                Some(ParsingDetails::Decoder { .. }) | None => envelope,
            },
            RequestError::SchemaValidation {
                field_name,
                expected_value,
                ..
            } => envelope
                .with_metadata("field_name", field_name)
                .with_metadata("expected_value", expected_value),
            RequestError::Validation { .. } => envelope,
        }
    }
}
