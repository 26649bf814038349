//! # sheet-render-api
//!
//! API data transfer objects and wire formats.
//! This crate depends only on `request` and `shared`.

/// API v1 DTOs.
pub mod v1;

/// Returns the api crate version.
#[must_use]
pub const fn api_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheet_render_request::request_crate_version;
    use sheet_render_shared::shared_crate_version;

    #[test]
    fn api_crate_compiles() {
        let version = api_crate_version();
        assert!(!version.is_empty());
    }

    #[test]
    fn api_shares_the_workspace_version() {
        assert_eq!(api_crate_version(), request_crate_version());
        assert_eq!(api_crate_version(), shared_crate_version());
    }
}
