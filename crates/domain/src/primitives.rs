//! Domain primitives with validated constructors.

use serde::{Serialize, Serializer};
use sheet_render_shared::{ErrorCode, ErrorEnvelope};
use std::fmt;

/// Literal prefix every schema version tag starts with.
pub const SCHEMA_VERSION_PREFIX: &str = "spreadsheet-render-";

/// Human-readable shape of an accepted schema version tag.
pub const SCHEMA_VERSION_FORMAT: &str = "spreadsheet-render-X.Y";

/// Validation failures for domain primitives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrimitiveError {
    /// Schema version tag does not match `spreadsheet-render-<digits>.<digits>`.
    InvalidSchemaVersion {
        /// Tag that failed validation.
        input: String,
    },
}

impl PrimitiveError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::InvalidSchemaVersion { .. } => {
                ErrorCode::new("domain", "invalid_schema_version")
            },
        }
    }
}

impl fmt::Display for PrimitiveError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSchemaVersion { .. } => write!(
                formatter,
                "SchemaVersion must match {SCHEMA_VERSION_FORMAT} with decimal X and Y"
            ),
        }
    }
}

impl std::error::Error for PrimitiveError {}

impl From<PrimitiveError> for ErrorEnvelope {
    fn from(error: PrimitiveError) -> Self {
        let envelope = Self::expected(error.error_code(), error.to_string());
        match error {
            PrimitiveError::InvalidSchemaVersion { input } => {
                envelope.with_metadata("input", input)
            },
        }
    }
}

/// Configuration contract revision, e.g. `spreadsheet-render-1.0`.
///
/// Major and minor are kept as digit strings: no upper bound applies and
/// leading zeros are preserved verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SchemaVersion {
    raw: Box<str>,
    dot: usize,
}

impl SchemaVersion {
    /// Parse a schema version tag. No trimming is applied.
    pub fn parse(input: impl AsRef<str>) -> Result<Self, PrimitiveError> {
        let raw = input.as_ref();
        let invalid = || PrimitiveError::InvalidSchemaVersion {
            input: raw.to_owned(),
        };

        let numbers = raw.strip_prefix(SCHEMA_VERSION_PREFIX).ok_or_else(invalid)?;
        let (major, minor) = numbers.split_once('.').ok_or_else(invalid)?;
        if !is_decimal(major) || !is_decimal(minor) {
            return Err(invalid());
        }

        Ok(Self {
            raw: raw.into(),
            dot: SCHEMA_VERSION_PREFIX.len() + major.len(),
        })
    }

    /// Full tag as supplied.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Major component digits.
    #[must_use]
    pub fn major(&self) -> &str {
        self.raw
            .get(SCHEMA_VERSION_PREFIX.len()..self.dot)
            .unwrap_or_default()
    }

    /// Minor component digits.
    #[must_use]
    pub fn minor(&self) -> &str {
        self.raw.get(self.dot + 1..).unwrap_or_default()
    }
}

impl AsRef<str> for SchemaVersion {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl Serialize for SchemaVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl TryFrom<&str> for SchemaVersion {
    type Error = PrimitiveError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

fn is_decimal(input: &str) -> bool {
    !input.is_empty() && input.bytes().all(|byte| byte.is_ascii_digit())
}
