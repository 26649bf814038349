//! Settings schema, defaults, and validation.
//!
//! Deserialization uses `serde` (JSON or TOML). Validation is manual and
//! returns typed errors mapped to `ErrorEnvelope`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use sheet_render_request::ParseOptions;
use sheet_render_shared::{ErrorCode, ErrorEnvelope};
use std::fmt;
use std::str::FromStr;

const MAX_BODY_BYTES_MIN: u64 = 1;

/// Top-level runtime settings for surfaces hosting the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct Settings {
    /// Diagnostic logging.
    pub logging: LoggingSettings,
    /// Request limits.
    pub limits: LimitSettings,
}

/// Logging settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct LoggingSettings {
    /// Minimum level emitted.
    pub level: LogLevel,
    /// Output encoding.
    pub format: LogFormat,
}

/// Request limits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct LimitSettings {
    /// Largest accepted request body in bytes. Unlimited when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_body_bytes: Option<u64>,
}

/// Log verbosity.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Everything.
    Trace,
    /// Per-request outcomes.
    Debug,
    /// Lifecycle events.
    Info,
    /// Warnings only.
    #[default]
    Warn,
    /// Errors only.
    Error,
}

impl LogLevel {
    /// Lowercase name, usable as a filter directive.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = ();

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.to_ascii_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            _ => Err(()),
        }
    }
}

/// Log output encoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

impl LogFormat {
    /// Lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
        }
    }
}

impl FromStr for LogFormat {
    type Err = ();

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(()),
        }
    }
}

impl Settings {
    /// Validate the settings.
    pub fn validate(self) -> Result<ValidatedSettings, ConfigSchemaError> {
        let below_min = self
            .limits
            .max_body_bytes
            .filter(|value| *value < MAX_BODY_BYTES_MIN);
        if let Some(value) = below_min {
            return Err(ConfigSchemaError::LimitOutOfRange {
                section: "limits",
                field: "maxBodyBytes",
                value,
                min: MAX_BODY_BYTES_MIN,
            });
        }
        Ok(ValidatedSettings { raw: self })
    }
}

/// Settings that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedSettings {
    raw: Settings,
}

impl ValidatedSettings {
    /// Pipeline options derived from the limits section.
    #[must_use]
    pub const fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            max_body_bytes: self.raw.limits.max_body_bytes,
        }
    }

    /// Borrow the settings.
    #[must_use]
    pub const fn as_ref(&self) -> &Settings {
        &self.raw
    }

    /// Consume the wrapper and return the settings.
    #[must_use]
    pub fn into_inner(self) -> Settings {
        self.raw
    }
}

impl std::ops::Deref for ValidatedSettings {
    type Target = Settings;

    fn deref(&self) -> &Self::Target {
        &self.raw
    }
}

/// Settings validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSchemaError {
    /// A numeric limit is below its minimum.
    LimitOutOfRange {
        /// Schema section (e.g. `limits`).
        section: &'static str,
        /// Field name in the settings file (e.g. `maxBodyBytes`).
        field: &'static str,
        /// Value provided.
        value: u64,
        /// Minimum allowed value.
        min: u64,
    },
}

impl fmt::Display for ConfigSchemaError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LimitOutOfRange {
                section,
                field,
                min,
                ..
            } => write!(formatter, "{section}.{field} must be >= {min}"),
        }
    }
}

impl std::error::Error for ConfigSchemaError {}

impl From<ConfigSchemaError> for ErrorEnvelope {
    fn from(error: ConfigSchemaError) -> Self {
        let message = error.to_string();
        match error {
            ConfigSchemaError::LimitOutOfRange {
                section,
                field,
                value,
                min,
            } => Self::expected(ErrorCode::new("config", "out_of_range"), message)
                .with_metadata("section", section)
                .with_metadata("field", field)
                .with_metadata("value", value.to_string())
                .with_metadata("min", min.to_string()),
        }
    }
}

/// Parse settings from JSON, applying validation.
pub fn parse_settings_json(input: &str) -> Result<ValidatedSettings, ErrorEnvelope> {
    let settings: Settings = serde_json::from_str(input).map_err(|error| {
        ErrorEnvelope::expected(
            ErrorCode::new("config", "invalid_json"),
            format!("invalid settings JSON: {error}"),
        )
    })?;

    settings.validate().map_err(Into::into)
}

/// Parse settings from TOML, applying validation.
pub fn parse_settings_toml(input: &str) -> Result<ValidatedSettings, ErrorEnvelope> {
    let settings: Settings = toml::from_str(input).map_err(|error| {
        ErrorEnvelope::expected(
            ErrorCode::new("config", "invalid_toml"),
            format!("invalid settings TOML: {error}"),
        )
    })?;

    settings.validate().map_err(Into::into)
}
