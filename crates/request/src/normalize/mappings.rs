//! `mappings` list normalization.

use crate::error::{RequestError, RequestResult};
use serde_json::{Map, Value};
use sheet_render_domain::{JsonType, MappingSpec};
use sheet_render_shared::JsonPointer;

const NON_EMPTY_STRING: &str = "non-empty string";

/// Validate the `mappings` list, coercing a missing or non-array value to `[]`.
///
/// Stops at the first element that is not an object or lacks a non-empty
/// string `id` or `path`.
pub fn normalize_mappings(value: Option<Value>) -> RequestResult<Vec<MappingSpec>> {
    let items = match value {
        Some(Value::Array(items)) => items,
        _ => return Ok(Vec::new()),
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| normalize_mapping(index, item))
        .collect()
}

fn normalize_mapping(index: usize, item: Value) -> RequestResult<MappingSpec> {
    let pointer = JsonPointer::root()
        .child("$spreadsheet")
        .child("mappings")
        .index(index);

    let actual_type = JsonType::of(&item);
    let Value::Object(mut fields) = item else {
        return Err(RequestError::schema_validation(
            format!("Invalid mapping at index {index}: must be an object"),
            pointer.as_str(),
            "mappings",
            "object",
            Some(Value::from(actual_type.as_str())),
        ));
    };

    let id = take_non_empty_string(&mut fields, &pointer, index, "id")?;
    let path = take_non_empty_string(&mut fields, &pointer, index, "path")?;

    Ok(MappingSpec {
        id,
        path,
        extra: fields,
    })
}

fn take_non_empty_string(
    fields: &mut Map<String, Value>,
    pointer: &JsonPointer,
    index: usize,
    key: &str,
) -> RequestResult<String> {
    match fields.remove(key) {
        Some(Value::String(text)) if !text.is_empty() => Ok(text),
        actual => Err(RequestError::schema_validation(
            format!("Invalid mapping at index {index}: missing or invalid '{key}' property"),
            pointer.clone().child(key).as_str(),
            key,
            NON_EMPTY_STRING,
            actual,
        )),
    }
}
