//! API v1 wire-shape parity tests against JSON fixtures.

use serde_json::{Value, json};
use sheet_render_api::v1::{
    ApiV1ErrorDto, ApiV1Result, api_v1_error_schema, parse_result_to_api_v1_result,
};
use sheet_render_request::{HttpEvent, ParseOptions, parse_http_event, parse_http_event_with};
use std::error::Error;
use std::fs;
use std::path::Path;

fn read_fixture(relative: &str) -> Result<Value, Box<dyn Error>> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(relative);
    Ok(serde_json::from_str(&fs::read_to_string(path)?)?)
}

fn wire(body: &str) -> Result<Value, Box<dyn Error>> {
    let event = HttpEvent::post(body).to_value();
    let result = parse_http_event(&event);
    Ok(serde_json::to_value(parse_result_to_api_v1_result(&result))?)
}

#[test]
fn missing_data_matches_fixture() -> Result<(), Box<dyn Error>> {
    let body = r#"{"$spreadsheet":{"schemaVersion":"spreadsheet-render-1.0"}}"#;
    assert_eq!(wire(body)?, read_fixture("missing-data.error.json")?);
    Ok(())
}

#[test]
fn syntax_error_matches_fixture() -> Result<(), Box<dyn Error>> {
    assert_eq!(wire("{ invalid json")?, read_fixture("syntax.error.json")?);
    Ok(())
}

#[test]
fn accepted_request_carries_normalized_metadata() -> Result<(), Box<dyn Error>> {
    let body = json!({
        "$spreadsheet": {"schemaVersion": "spreadsheet-render-2.3", "title": "Orders"},
        "$data": {"orders": []}
    })
    .to_string();
    let value = wire(&body)?;

    assert_eq!(value["ok"], true);
    let metadata = &value["data"]["metadata"];
    assert_eq!(metadata["schemaVersion"], "spreadsheet-render-2.3");
    assert_eq!(metadata["title"], "Orders");
    assert_eq!(metadata["mappings"], json!([]));
    assert_eq!(metadata["pathSyntax"]["type"], "json-pointer-wildcard");
    assert_eq!(
        metadata["defaults"]["numberPrecisionThreshold"],
        json!(9_007_199_254_740_991_u64)
    );
    assert_eq!(value["data"]["data"], json!({"orders": []}));
    Ok(())
}

#[test]
fn oversized_body_maps_to_413() -> Result<(), Box<dyn Error>> {
    let event = HttpEvent::post("{\"$spreadsheet\":{},\"$data\":{}}").to_value();
    let result = parse_http_event_with(&event, &ParseOptions::default().with_max_body_bytes(4));
    let mapped = parse_result_to_api_v1_result(&result);

    assert_eq!(mapped.status(), 413);
    let ApiV1Result::Err { error, .. } = mapped else {
        return Err("expected an error response".into());
    };
    assert_eq!(error.fields.get("limitBytes"), Some(&json!(4)));
    assert_eq!(error.fields.get("path"), Some(&json!("/postData/contents")));
    Ok(())
}

#[test]
fn error_dto_round_trips_through_json() -> Result<(), Box<dyn Error>> {
    let fixture = read_fixture("syntax.error.json")?;
    let dto: ApiV1ErrorDto = serde_json::from_value(fixture["error"].clone())?;
    assert_eq!(dto.status, 400);
    assert_eq!(dto.fields.get("errorType"), Some(&json!("PARSING_ERROR")));
    assert_eq!(serde_json::to_value(&dto)?, fixture["error"]);

    let schema = api_v1_error_schema().to_value();
    assert!(schema.get("properties").and_then(|props| props.get("status")).is_some());
    Ok(())
}
