//! API v1 DTOs and helpers.

mod mappers;
mod schema;
mod types;

pub use mappers::{
    error_code_to_api_v1, error_envelope_to_api_v1_error, parse_result_to_api_v1_result,
    request_error_to_api_v1, result_to_api_v1_result,
};
pub use schema::{api_v1_error_schema, api_v1_parsed_request_schema};
pub use types::*;
