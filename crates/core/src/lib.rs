//! # sheet-render-core
//!
//! Build information for the sheet-render workspace.
//!
//! This crate has no dependencies on other workspace crates, so any binary or
//! library may report its build metadata without pulling in the pipeline.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

/// Build-time information about the binary.
///
/// # Example
///
/// ```
/// use sheet_render_core::build_info;
///
/// let info = build_info();
/// println!("Running {} v{} on {}-{}", info.name, info.version, info.arch, info.os);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildInfo {
    /// Package name from Cargo.toml
    pub name: &'static str,

    /// Package version from Cargo.toml (semver)
    pub version: &'static str,

    /// Minimum supported Rust version declared by the workspace
    pub rust_version: &'static str,

    /// Target architecture (e.g. `x86_64`, `aarch64`)
    pub arch: &'static str,

    /// Target operating system (e.g. `linux`, `macos`)
    pub os: &'static str,

    /// Build profile ("debug" or "release")
    pub profile: &'static str,

    /// Git commit hash, when provided through the `GIT_HASH` build env
    pub git_hash: Option<&'static str>,
}

impl BuildInfo {
    /// Returns a human-readable version string.
    ///
    /// Format: `name version (git_hash)` or `name version` without git info.
    #[must_use]
    pub fn version_string(&self) -> String {
        self.git_hash.map_or_else(
            || format!("{} {}", self.name, self.version),
            |hash| format!("{} {} ({hash})", self.name, self.version),
        )
    }

    /// Returns true if this is a debug build.
    #[must_use]
    pub const fn is_debug(&self) -> bool {
        matches!(self.profile.as_bytes(), b"debug")
    }
}

/// Returns build-time information about the binary.
///
/// The values are captured at compile time and never change while the
/// process runs.
#[must_use]
pub const fn build_info() -> BuildInfo {
    BuildInfo {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        rust_version: env!("CARGO_PKG_RUST_VERSION"),
        arch: std::env::consts::ARCH,
        os: std::env::consts::OS,
        profile: if cfg!(debug_assertions) {
            "debug"
        } else {
            "release"
        },
        git_hash: option_env!("GIT_HASH"),
    }
}
