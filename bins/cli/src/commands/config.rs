//! Config command handlers.

use crate::CliOutput;
use crate::error::{CliError, ExitCode};
use crate::format::OutputMode;
use sheet_render_config::{Settings, to_pretty_json, to_pretty_toml};

/// Print the effective settings after file and env merging.
///
/// Text mode prints TOML so the output can be saved as a settings file.
pub fn run_config_show(mode: OutputMode, settings: &Settings) -> Result<CliOutput, CliError> {
    let stdout = if mode.is_ndjson() {
        mode.render_json(settings)?
    } else if mode.is_json() {
        to_pretty_json(settings)?
    } else {
        to_pretty_toml(settings)?
    };

    Ok(CliOutput {
        stdout,
        exit_code: ExitCode::Ok,
    })
}
