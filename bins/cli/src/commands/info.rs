//! Info command handler.

use crate::CliOutput;
use crate::error::{CliError, ExitCode};
use crate::format::OutputMode;
use sheet_render_core::{BuildInfo, build_info};
use sheet_render_request::request_crate_version;

/// Run the info command.
pub fn run_info(mode: OutputMode) -> Result<CliOutput, CliError> {
    let build = build_info();
    let pipeline_version = request_crate_version();

    let stdout = if mode.is_json() || mode.is_ndjson() {
        format_info_json(mode, &build, pipeline_version)?
    } else {
        format_info_text(&build, pipeline_version)
    };

    Ok(CliOutput {
        stdout,
        exit_code: ExitCode::Ok,
    })
}

fn format_info_text(build: &BuildInfo, pipeline_version: &str) -> String {
    format!(
        "status: ok\nname: {}\nversion: {}\npipeline: {}\nrust: {}\ntarget: {}-{}\nprofile: {}\ngit: {}\n",
        build.name,
        build.version,
        pipeline_version,
        build.rust_version,
        build.arch,
        build.os,
        build.profile,
        build.git_hash.unwrap_or("none"),
    )
}

fn format_info_json(
    mode: OutputMode,
    build: &BuildInfo,
    pipeline_version: &str,
) -> Result<String, CliError> {
    let payload = serde_json::json!({
        "status": "ok",
        "build": {
            "name": build.name,
            "version": build.version,
            "versionString": build.version_string(),
            "pipelineVersion": pipeline_version,
            "rustVersion": build.rust_version,
            "target": format!("{}-{}", build.arch, build.os),
            "profile": build.profile,
            "gitHash": build.git_hash,
        }
    });
    mode.render_json(&payload)
}
