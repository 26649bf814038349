//! Schema command handler.

use crate::CliOutput;
use crate::error::{CliError, ExitCode};
use crate::format::OutputMode;
use clap::ValueEnum;
use sheet_render_api::v1::{api_v1_error_schema, api_v1_parsed_request_schema};
use sheet_render_config::settings_schema;
use sheet_render_request::spreadsheet_metadata_schema;

/// Which JSON Schema to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SchemaTarget {
    /// The normalized `$spreadsheet` metadata.
    #[default]
    Metadata,
    /// The settings file.
    Settings,
    /// The success payload of `parse --output json`.
    Parsed,
    /// The error payload of `parse --output json`.
    Error,
}

/// Run the schema command. Schemas are always emitted as JSON.
pub fn run_schema(mode: OutputMode, target: SchemaTarget) -> Result<CliOutput, CliError> {
    let schema = match target {
        SchemaTarget::Metadata => spreadsheet_metadata_schema(),
        SchemaTarget::Settings => settings_schema(),
        SchemaTarget::Parsed => api_v1_parsed_request_schema(),
        SchemaTarget::Error => api_v1_error_schema(),
    };

    let stdout = if mode.is_ndjson() {
        mode.render_json(&schema)?
    } else {
        let mut output = serde_json::to_string_pretty(&schema)?;
        output.push('\n');
        output
    };

    Ok(CliOutput {
        stdout,
        exit_code: ExitCode::Ok,
    })
}
