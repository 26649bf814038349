//! Environment variable parsing and env-to-settings merging.
//!
//! Env parsing is strict: a variable that is present but blank or
//! malformed fails instead of falling back to the file or default value.

use crate::schema::{LogFormat, LogLevel, Settings, ValidatedSettings};
use sheet_render_shared::{ErrorCode, ErrorEnvelope};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Env var: log level.
pub const ENV_LOG: &str = "SHEET_RENDER_LOG";
/// Env var: log output format.
pub const ENV_LOG_FORMAT: &str = "SHEET_RENDER_LOG_FORMAT";
/// Env var: request body limit in bytes.
pub const ENV_MAX_BODY_BYTES: &str = "SHEET_RENDER_MAX_BODY_BYTES";

const ENV_VARS: [&str; 3] = [ENV_LOG, ENV_LOG_FORMAT, ENV_MAX_BODY_BYTES];

/// Parsed env overrides. Unset variables stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsEnv {
    /// `SHEET_RENDER_LOG`.
    pub log_level: Option<LogLevel>,
    /// `SHEET_RENDER_LOG_FORMAT`.
    pub log_format: Option<LogFormat>,
    /// `SHEET_RENDER_MAX_BODY_BYTES`.
    pub max_body_bytes: Option<u64>,
}

impl SettingsEnv {
    /// Parse env overrides from a key/value map (useful for tests and fixtures).
    pub fn from_map(map: &BTreeMap<String, String>) -> Result<Self, EnvParseError> {
        Ok(Self {
            log_level: parse_optional_enum(map, ENV_LOG)?,
            log_format: parse_optional_enum(map, ENV_LOG_FORMAT)?,
            max_body_bytes: parse_optional_u64(map, ENV_MAX_BODY_BYTES)?,
        })
    }

    /// Parse env overrides from the current process environment.
    pub fn from_std_env() -> Result<Self, EnvParseError> {
        let mut map = BTreeMap::new();
        for name in ENV_VARS {
            if let Ok(value) = std::env::var(name) {
                map.insert(name.to_owned(), value);
            }
        }
        Self::from_map(&map)
    }

    /// True when no override is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.log_level.is_none() && self.log_format.is_none() && self.max_body_bytes.is_none()
    }
}

/// Apply env overrides to base settings (env wins over file/default values).
pub fn apply_env_overrides(
    base: Settings,
    env: &SettingsEnv,
) -> Result<ValidatedSettings, ErrorEnvelope> {
    let mut settings = base;
    if let Some(level) = env.log_level {
        settings.logging.level = level;
    }
    if let Some(format) = env.log_format {
        settings.logging.format = format;
    }
    if env.max_body_bytes.is_some() {
        settings.limits.max_body_bytes = env.max_body_bytes;
    }

    settings.validate().map_err(Into::into)
}

/// Validation failures when parsing env variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvParseError {
    /// An env var was present but empty after trimming.
    EmptyValue {
        /// Env var name.
        var: &'static str,
    },
    /// Integer env var had an invalid value.
    InvalidInt {
        /// Env var name.
        var: &'static str,
        /// Raw input value.
        value: String,
    },
    /// Enum env var had an invalid value.
    InvalidEnum {
        /// Env var name.
        var: &'static str,
        /// Raw input value.
        value: String,
    },
}

impl EnvParseError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::EmptyValue { .. } => ErrorCode::new("config", "empty_env_var"),
            Self::InvalidInt { .. } => ErrorCode::new("config", "invalid_env_int"),
            Self::InvalidEnum { .. } => ErrorCode::new("config", "invalid_env_enum"),
        }
    }
}

impl fmt::Display for EnvParseError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyValue { var } => write!(formatter, "{var} must be non-empty"),
            Self::InvalidInt { var, .. } => write!(formatter, "{var} must be an integer"),
            Self::InvalidEnum { var, .. } => write!(formatter, "{var} has an unsupported value"),
        }
    }
}

impl std::error::Error for EnvParseError {}

impl From<EnvParseError> for ErrorEnvelope {
    fn from(error: EnvParseError) -> Self {
        let code = error.error_code();
        let message = error.to_string();
        let envelope = Self::expected(code, message);

        match error {
            EnvParseError::EmptyValue { var } => envelope.with_metadata("env_var", var),
            EnvParseError::InvalidInt { var, value } | EnvParseError::InvalidEnum { var, value } => {
                envelope
                    .with_metadata("env_var", var)
                    .with_metadata("value", value)
            },
        }
    }
}

fn parse_optional_u64(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<u64>, EnvParseError> {
    let Some(raw) = map.get(var) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EnvParseError::EmptyValue { var });
    }

    trimmed
        .parse::<u64>()
        .map(Some)
        .map_err(|_| EnvParseError::InvalidInt {
            var,
            value: raw.clone(),
        })
}

fn parse_optional_enum<T: FromStr>(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<T>, EnvParseError> {
    let Some(raw) = map.get(var) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EnvParseError::EmptyValue { var });
    }

    trimmed
        .parse::<T>()
        .map(Some)
        .map_err(|_| EnvParseError::InvalidEnum {
            var,
            value: trimmed.to_owned(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    fn env_map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
            .collect()
    }

    #[test]
    fn empty_map_yields_no_overrides() -> Result<(), Box<dyn Error>> {
        let env = SettingsEnv::from_map(&BTreeMap::new())?;
        assert!(env.is_empty());
        Ok(())
    }

    #[test]
    fn values_are_trimmed_before_parsing() -> Result<(), Box<dyn Error>> {
        let env = SettingsEnv::from_map(&env_map(&[
            (ENV_LOG, " Debug "),
            (ENV_LOG_FORMAT, "json"),
            (ENV_MAX_BODY_BYTES, " 2048\n"),
        ]))?;
        assert_eq!(env.log_level, Some(LogLevel::Debug));
        assert_eq!(env.log_format, Some(LogFormat::Json));
        assert_eq!(env.max_body_bytes, Some(2048));
        Ok(())
    }

    #[test]
    fn blank_value_is_an_error() {
        let error = SettingsEnv::from_map(&env_map(&[(ENV_LOG, "  ")])).err();
        assert_eq!(error, Some(EnvParseError::EmptyValue { var: ENV_LOG }));
    }

    #[test]
    fn malformed_values_map_to_envelopes() -> Result<(), Box<dyn Error>> {
        let error = SettingsEnv::from_map(&env_map(&[(ENV_MAX_BODY_BYTES, "lots")]))
            .err()
            .ok_or("expected an error")?;
        let envelope = ErrorEnvelope::from(error);
        assert_eq!(envelope.code, ErrorCode::new("config", "invalid_env_int"));
        assert_eq!(envelope.metadata_value("env_var"), Some(ENV_MAX_BODY_BYTES));
        assert_eq!(envelope.metadata_value("value"), Some("lots"));

        let error = SettingsEnv::from_map(&env_map(&[(ENV_LOG_FORMAT, "xml")])).err();
        assert!(matches!(error, Some(EnvParseError::InvalidEnum { .. })));
        Ok(())
    }

    #[test]
    fn overrides_win_and_are_validated() -> Result<(), Box<dyn Error>> {
        let mut base = Settings::default();
        base.limits.max_body_bytes = Some(10);
        let env = SettingsEnv {
            log_level: Some(LogLevel::Trace),
            log_format: None,
            max_body_bytes: Some(99),
        };
        let merged = apply_env_overrides(base, &env)?;
        assert_eq!(merged.logging.level, LogLevel::Trace);
        assert_eq!(merged.logging.format, LogFormat::Text);
        assert_eq!(merged.limits.max_body_bytes, Some(99));

        let zero = SettingsEnv {
            max_body_bytes: Some(0),
            ..SettingsEnv::default()
        };
        let error = apply_env_overrides(Settings::default(), &zero).err();
        assert!(
            matches!(error, Some(envelope) if envelope.code == ErrorCode::new("config", "out_of_range"))
        );
        Ok(())
    }
}
