//! Schema version gate.

use crate::error::{RequestError, RequestResult};
use serde_json::{Map, Value};
use sheet_render_domain::{JsonType, SCHEMA_VERSION_FORMAT, SchemaVersion, is_truthy};

const FIELD: &str = "schemaVersion";
const PATH: &str = "/$spreadsheet/schemaVersion";

/// Check the raw `$spreadsheet` mapping's `schemaVersion` before normalization.
///
/// Absent or falsy tags, non-string tags, and tags that do not match
/// `spreadsheet-render-<digits>.<digits>` are rejected with
/// [`RequestError::SchemaValidation`].
pub fn check_schema_version(raw: &Map<String, Value>) -> RequestResult<SchemaVersion> {
    let Some(value) = raw.get(FIELD).filter(|value| is_truthy(value)) else {
        return Err(RequestError::schema_validation(
            "Missing or invalid 'schemaVersion' in $spreadsheet metadata",
            PATH,
            FIELD,
            SCHEMA_VERSION_FORMAT,
            None,
        ));
    };

    let Value::String(tag) = value else {
        let actual_type = JsonType::of(value);
        return Err(RequestError::schema_validation(
            format!("Invalid 'schemaVersion': must be a string, got {actual_type}"),
            PATH,
            FIELD,
            "string",
            Some(Value::from(actual_type.as_str())),
        ));
    };

    SchemaVersion::parse(tag).map_err(|_| {
        RequestError::schema_validation(
            format!("Invalid schemaVersion format. Expected '{SCHEMA_VERSION_FORMAT}'"),
            PATH,
            FIELD,
            SCHEMA_VERSION_FORMAT,
            Some(Value::String(tag.clone())),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::error::Error;

    fn metadata(value: Value) -> Result<Map<String, Value>, Box<dyn Error>> {
        match value {
            Value::Object(map) => Ok(map),
            other => Err(format!("expected object, got {other}").into()),
        }
    }

    fn schema_fields(error: &RequestError) -> Option<(&str, &str, Option<&Value>)> {
        match error {
            RequestError::SchemaValidation {
                field_name,
                expected_value,
                actual_value,
                ..
            } => Some((
                field_name.as_str(),
                expected_value.as_str(),
                actual_value.as_ref(),
            )),
            _ => None,
        }
    }

    #[test]
    fn accepts_valid_tags() -> Result<(), Box<dyn Error>> {
        for tag in [
            "spreadsheet-render-1.0",
            "spreadsheet-render-10.99",
            "spreadsheet-render-0.1",
        ] {
            let version = check_schema_version(&metadata(json!({"schemaVersion": tag}))?)?;
            assert_eq!(version.as_str(), tag);
        }
        Ok(())
    }

    #[test]
    fn missing_and_falsy_tags_report_no_actual_value() -> Result<(), Box<dyn Error>> {
        for raw in [
            json!({}),
            json!({"schemaVersion": null}),
            json!({"schemaVersion": ""}),
            json!({"schemaVersion": 0}),
            json!({"schemaVersion": false}),
        ] {
            let Err(error) = check_schema_version(&metadata(raw)?) else {
                return Err("falsy tag should be rejected".into());
            };
            assert_eq!(error.path(), PATH);
            assert_eq!(
                schema_fields(&error),
                Some(("schemaVersion", "spreadsheet-render-X.Y", None))
            );
        }
        Ok(())
    }

    #[test]
    fn non_string_tags_report_their_type() -> Result<(), Box<dyn Error>> {
        let Err(error) = check_schema_version(&metadata(json!({"schemaVersion": 1.0}))?) else {
            return Err("numeric tag should be rejected".into());
        };
        assert_eq!(
            schema_fields(&error),
            Some(("schemaVersion", "string", Some(&json!("number"))))
        );
        Ok(())
    }

    #[test]
    fn malformed_tags_report_the_literal() -> Result<(), Box<dyn Error>> {
        for tag in [
            "spreadsheet-render-1",
            "spreadsheet-render-1.0.0",
            "render-1.0",
            "invalid-format",
        ] {
            let Err(error) = check_schema_version(&metadata(json!({"schemaVersion": tag}))?) else {
                return Err(format!("{tag} should be rejected").into());
            };
            assert_eq!(error.path(), "/$spreadsheet/schemaVersion");
            assert_eq!(
                schema_fields(&error),
                Some(("schemaVersion", "spreadsheet-render-X.Y", Some(&json!(tag))))
            );
        }
        Ok(())
    }
}
