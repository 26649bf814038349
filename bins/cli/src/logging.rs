//! Diagnostic logging setup.
//!
//! Logs go to stderr so stdout stays reserved for command output.

use crate::error::CliError;
use sheet_render_config::{LogFormat, LoggingSettings};
use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber for the process.
pub fn init_tracing(settings: &LoggingSettings) -> Result<(), CliError> {
    let filter = build_filter(settings)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true);

    let installed = match settings.format {
        LogFormat::Text => builder
            .with_ansi(std::io::stderr().is_terminal())
            .try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    installed.map_err(|error| CliError::Logging(error.to_string()))
}

fn build_filter(settings: &LoggingSettings) -> Result<EnvFilter, CliError> {
    EnvFilter::try_new(settings.level.as_str())
        .map_err(|error| CliError::Logging(error.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheet_render_config::LogLevel;
    use std::error::Error;

    #[test]
    fn every_level_builds_a_filter() -> Result<(), Box<dyn Error>> {
        for level in [
            LogLevel::Trace,
            LogLevel::Debug,
            LogLevel::Info,
            LogLevel::Warn,
            LogLevel::Error,
        ] {
            let settings = LoggingSettings {
                level,
                format: LogFormat::Text,
            };
            let filter = build_filter(&settings)?;
            assert!(filter.to_string().contains(level.as_str()));
        }
        Ok(())
    }
}
