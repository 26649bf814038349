//! `pathSyntax` section normalization.

use serde_json::Value;
use sheet_render_domain::{DEFAULT_PATH_SYNTAX_TYPE, PathSyntax};

/// Ensure `pathSyntax` is a mapping with a `type`.
///
/// Non-mapping values (arrays included) are replaced by the default section.
/// A mapping without `type` gains the default type and keeps its other keys.
pub fn normalize_path_syntax(value: Option<Value>) -> PathSyntax {
    match value {
        Some(Value::Object(mut fields)) => PathSyntax {
            syntax_type: fields
                .remove("type")
                .unwrap_or_else(|| Value::from(DEFAULT_PATH_SYNTAX_TYPE)),
            extra: fields,
        },
        _ => PathSyntax::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn non_mapping_values_become_default() {
        for raw in [None, Some(json!(null)), Some(json!("glob")), Some(json!([]))] {
            assert_eq!(normalize_path_syntax(raw), PathSyntax::default());
        }
    }

    #[test]
    fn missing_type_is_filled_and_other_keys_kept() {
        let syntax = normalize_path_syntax(Some(json!({"escape": "~"})));
        assert_eq!(syntax.type_name(), Some("json-pointer-wildcard"));
        assert_eq!(syntax.extra.get("escape"), Some(&json!("~")));
    }

    #[test]
    fn explicit_type_is_kept() {
        let syntax = normalize_path_syntax(Some(json!({"type": "jsonpath"})));
        assert_eq!(syntax.type_name(), Some("jsonpath"));
    }
}
