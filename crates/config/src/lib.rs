//! # sheet-render-config
//!
//! Runtime settings for surfaces that host the request pipeline: log
//! level and format, plus the request body limit. Settings come from a
//! JSON or TOML file and `SHEET_RENDER_*` env overrides.

/// Environment variable parsing and merging.
pub mod env;
/// Settings loading helpers (env + file).
pub mod load;
/// Settings schema types and validation.
pub mod schema;
/// JSON Schema export for the settings file.
pub mod settings_schema;

pub use env::{
    ENV_LOG, ENV_LOG_FORMAT, ENV_MAX_BODY_BYTES, EnvParseError, SettingsEnv, apply_env_overrides,
};
pub use load::{
    ConfigFormat, detect_config_format, load_settings_from_path, load_settings_from_sources,
    load_settings_std_env, to_pretty_json, to_pretty_toml,
};
pub use schema::{
    ConfigSchemaError, LimitSettings, LogFormat, LogLevel, LoggingSettings, Settings,
    ValidatedSettings, parse_settings_json, parse_settings_toml,
};
pub use settings_schema::settings_schema;

/// Returns the config crate version.
#[must_use]
pub const fn config_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
