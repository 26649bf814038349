//! Settings loading helpers (env + file).
//!
//! The loader is responsible for deterministic merge order and surfacing
//! user-facing errors as typed `ErrorEnvelope`s.

use crate::{Settings, SettingsEnv, ValidatedSettings, apply_env_overrides};
use sheet_render_shared::{ErrorClass, ErrorCode, ErrorEnvelope};
use std::path::Path;

/// On-disk settings encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// `.json` or no extension.
    Json,
    /// `.toml`.
    Toml,
}

/// Load settings from sources using a deterministic precedence order.
///
/// Precedence (highest wins):
/// - env overrides (`SettingsEnv`)
/// - settings text (file content)
/// - defaults (`Settings::default()`)
pub fn load_settings_from_sources(
    config_text: Option<(&str, ConfigFormat)>,
    env: &SettingsEnv,
) -> Result<ValidatedSettings, ErrorEnvelope> {
    let settings = match config_text {
        None => Settings::default(),
        Some((input, format)) => parse_settings_unvalidated(input, format)?,
    };

    // env is applied last and also validates the merged result.
    apply_env_overrides(settings, env)
}

/// Load settings from an optional file path.
pub fn load_settings_from_path(
    config_path: Option<&Path>,
    env: &SettingsEnv,
) -> Result<ValidatedSettings, ErrorEnvelope> {
    let settings = match config_path {
        None => Settings::default(),
        Some(path) => {
            let format = detect_config_format(path)?;
            let config_text = read_config_file(path)?;
            parse_settings_unvalidated(&config_text, format)
                .map_err(|error| error.with_metadata("path", path.display().to_string()))?
        },
    };

    apply_env_overrides(settings, env)
}

/// Load settings from std env and an optional file path.
pub fn load_settings_std_env(config_path: Option<&Path>) -> Result<ValidatedSettings, ErrorEnvelope> {
    let env = SettingsEnv::from_std_env().map_err(ErrorEnvelope::from)?;
    load_settings_from_path(config_path, &env)
}

/// Serialize settings as deterministic pretty JSON (with trailing newline).
pub fn to_pretty_json(settings: &Settings) -> Result<String, ErrorEnvelope> {
    let mut output = serde_json::to_string_pretty(settings).map_err(|error| {
        ErrorEnvelope::unexpected(
            ErrorCode::internal(),
            format!("failed to serialize settings: {error}"),
            ErrorClass::NonRetriable,
        )
    })?;
    output.push('\n');
    Ok(output)
}

/// Serialize settings as deterministic pretty TOML (with trailing newline).
pub fn to_pretty_toml(settings: &Settings) -> Result<String, ErrorEnvelope> {
    let mut output = toml::to_string_pretty(settings).map_err(|error| {
        ErrorEnvelope::unexpected(
            ErrorCode::new("config", "serialize_toml"),
            format!("failed to serialize settings TOML: {error}"),
            ErrorClass::NonRetriable,
        )
    })?;
    output.push('\n');
    Ok(output)
}

/// Pick the encoding from a file extension (case-insensitive).
pub fn detect_config_format(path: &Path) -> Result<ConfigFormat, ErrorEnvelope> {
    let ext = path
        .extension()
        .and_then(|value| value.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        None | Some("json") => Ok(ConfigFormat::Json),
        Some("toml") => Ok(ConfigFormat::Toml),
        Some(other) => Err(ErrorEnvelope::expected(
            ErrorCode::new("config", "unsupported_format"),
            "unsupported config format; use .json or .toml",
        )
        .with_metadata("extension", other.to_string())),
    }
}

fn parse_settings_unvalidated(input: &str, format: ConfigFormat) -> Result<Settings, ErrorEnvelope> {
    match format {
        ConfigFormat::Json => serde_json::from_str(input).map_err(|error| {
            ErrorEnvelope::expected(
                ErrorCode::new("config", "invalid_json"),
                format!("invalid config JSON: {error}"),
            )
            .with_metadata("source", "config")
        }),
        ConfigFormat::Toml => toml::from_str(input).map_err(|error| {
            ErrorEnvelope::expected(
                ErrorCode::new("config", "invalid_toml"),
                format!("invalid config TOML: {error}"),
            )
            .with_metadata("source", "config")
        }),
    }
}

fn read_config_file(path: &Path) -> Result<String, ErrorEnvelope> {
    std::fs::read_to_string(path).map_err(|error| {
        let code = match error.kind() {
            std::io::ErrorKind::NotFound => ErrorCode::new("config", "config_file_not_found"),
            std::io::ErrorKind::PermissionDenied => {
                ErrorCode::new("config", "config_file_permission_denied")
            },
            _ => ErrorCode::new("config", "config_file_io"),
        };

        ErrorEnvelope::expected(code, format!("failed to read config file: {error}"))
            .with_metadata("path", path.to_string_lossy().to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LogFormat, LogLevel};
    use std::error::Error;

    #[test]
    fn no_sources_yield_defaults() -> Result<(), Box<dyn Error>> {
        let settings = load_settings_from_sources(None, &SettingsEnv::default())?;
        assert_eq!(settings.as_ref(), &Settings::default());
        Ok(())
    }

    #[test]
    fn env_beats_file_values() -> Result<(), Box<dyn Error>> {
        let env = SettingsEnv {
            log_level: Some(LogLevel::Error),
            ..SettingsEnv::default()
        };
        let text = "[logging]\nlevel = \"info\"\nformat = \"json\"\n";
        let settings = load_settings_from_sources(Some((text, ConfigFormat::Toml)), &env)?;
        assert_eq!(settings.logging.level, LogLevel::Error);
        assert_eq!(settings.logging.format, LogFormat::Json);
        Ok(())
    }

    #[test]
    fn format_follows_extension() -> Result<(), Box<dyn Error>> {
        assert_eq!(detect_config_format(Path::new("a.TOML"))?, ConfigFormat::Toml);
        assert_eq!(detect_config_format(Path::new("settings"))?, ConfigFormat::Json);
        let error = detect_config_format(Path::new("a.yaml")).err();
        assert!(matches!(error, Some(envelope) if envelope.metadata_value("extension") == Some("yaml")));
        Ok(())
    }

    #[test]
    fn pretty_output_ends_with_newline() -> Result<(), Box<dyn Error>> {
        let settings = Settings::default();
        let json = to_pretty_json(&settings)?;
        let toml = to_pretty_toml(&settings)?;
        assert!(json.ends_with("}\n"));
        assert!(toml.ends_with('\n'));
        assert!(toml.contains("level = \"warn\""));
        Ok(())
    }
}
