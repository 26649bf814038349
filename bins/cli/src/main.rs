//! CLI binary entrypoint.

mod commands;
mod error;
mod format;
mod logging;

use clap::{Parser, Subcommand};
use commands::{
    ParseCommandInput, SchemaTarget, run_config_show, run_info, run_parse, run_schema,
};
use error::{CliError, ExitCode};
use format::{OutputArgs, OutputMode};
use sheet_render_api::v1::{ApiV1Result, error_envelope_to_api_v1_error};
use sheet_render_config::{ValidatedSettings, load_settings_std_env};
use sheet_render_shared::ErrorEnvelope;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "sheet-render",
    version,
    about = "Validate and normalize spreadsheet render requests",
    long_about = None
)]
struct Cli {
    #[command(flatten)]
    output: OutputArgs,

    /// Settings file (JSON/TOML). `SHEET_RENDER_*` env vars override it.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run a request body through the validation and normalization pipeline.
    Parse {
        /// File holding the request body.
        #[arg(long, short = 'i')]
        input: Option<PathBuf>,
        /// Read the request body from stdin.
        #[arg(long, conflicts_with = "input")]
        stdin: bool,
        /// Treat the input as a full transport envelope (`{"postData": {...}}`).
        #[arg(long)]
        event: bool,
        /// Reject bodies larger than this many bytes (overrides settings).
        #[arg(long)]
        max_body_bytes: Option<u64>,
    },
    /// Print a JSON Schema.
    Schema {
        /// Schema to print.
        #[arg(long, value_enum, default_value_t = SchemaTarget::Metadata)]
        target: SchemaTarget,
    },
    /// Settings-related commands.
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Show build and version details.
    Info,
}

#[derive(Debug, Subcommand)]
enum ConfigCommands {
    /// Print the effective settings after file and env merging.
    Show,
}

pub(crate) struct CliOutput {
    stdout: String,
    exit_code: ExitCode,
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    let mode = OutputMode::from_args(&cli.output);

    match run(&cli, mode) {
        Ok(output) => match write_output(&output) {
            Ok(()) => std::process::ExitCode::from(output.exit_code.as_u8()),
            Err(error) => exit_with_error(mode, &error),
        },
        Err(error) => exit_with_error(mode, &error),
    }
}

fn run(cli: &Cli, mode: OutputMode) -> Result<CliOutput, CliError> {
    let settings = load_settings_std_env(cli.config.as_deref())?;
    logging::init_tracing(&settings.logging)?;
    tracing::debug!(
        level = settings.logging.level.as_str(),
        max_body_bytes = ?settings.limits.max_body_bytes,
        "settings loaded"
    );

    dispatch(&cli.command, mode, &settings)
}

fn dispatch(
    command: &Commands,
    mode: OutputMode,
    settings: &ValidatedSettings,
) -> Result<CliOutput, CliError> {
    match command {
        Commands::Parse {
            input,
            stdin,
            event,
            max_body_bytes,
        } => {
            let mut options = settings.parse_options();
            if let Some(limit) = max_body_bytes {
                if *limit == 0 {
                    return Err(CliError::InvalidInput(
                        "--max-body-bytes must be >= 1".to_string(),
                    ));
                }
                options = options.with_max_body_bytes(*limit);
            }
            let input = ParseCommandInput {
                input: input.as_deref(),
                stdin: *stdin,
                event: *event,
            };
            run_parse(mode, input, &options)
        },
        Commands::Schema { target } => run_schema(mode, *target),
        Commands::Config { command } => match command {
            ConfigCommands::Show => run_config_show(mode, settings.as_ref()),
        },
        Commands::Info => run_info(mode),
    }
}

fn exit_with_error(mode: OutputMode, error: &CliError) -> std::process::ExitCode {
    let exit_code = error.exit_code();
    match error {
        CliError::Settings(envelope) if mode.is_json() || mode.is_ndjson() => {
            let rendered = format_envelope_json(mode, envelope);
            let _ = io::stdout().write_all(rendered.as_bytes());
        },
        _ => {
            let _ = writeln!(io::stderr(), "error: {error}");
        },
    }
    std::process::ExitCode::from(exit_code.as_u8())
}

fn format_envelope_json(mode: OutputMode, envelope: &ErrorEnvelope) -> String {
    let payload: ApiV1Result<()> =
        ApiV1Result::err(error_envelope_to_api_v1_error(envelope, None));

    // This is a CLI boundary, so JSON serialization errors are internal.
    mode.render_json(&payload).unwrap_or_else(|_| {
        "{\"ok\":false,\"error\":{\"code\":\"ERR_CORE_INTERNAL\",\"message\":\"internal error\",\"kind\":\"INVARIANT\",\"status\":500}}\n".to_string()
    })
}

fn write_output(output: &CliOutput) -> Result<(), CliError> {
    let mut stdout = io::stdout();
    stdout.write_all(output.stdout.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
