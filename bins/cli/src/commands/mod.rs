//! Local CLI command handlers.

pub mod config;
pub mod info;
pub mod parse;
pub mod schema;

pub use config::run_config_show;
pub use info::run_info;
pub use parse::{ParseCommandInput, run_parse};
pub use schema::{SchemaTarget, run_schema};
