//! `defaults` section normalization.

use serde_json::{Map, Value};
use sheet_render_domain::{
    DEFAULT_SECTION_KEYS, DISPLAY_DEFAULTS, MAX_SAFE_INTEGER, NUMBER_PRECISION_THRESHOLD_KEY,
    SpreadsheetDefaults, is_container, is_truthy,
};

/// Fill in the `defaults` section.
///
/// A non-mapping section (arrays included) becomes an empty mapping. Each of
/// the five sub-sections is replaced by an empty mapping unless it already
/// holds a mapping or an array. The precision threshold is only added when
/// absent. Display fields keep truthy values and explicit empty strings.
pub fn normalize_defaults(value: Option<Value>) -> SpreadsheetDefaults {
    let mut defaults = match value {
        Some(Value::Object(map)) => map,
        _ => Map::new(),
    };

    for key in DEFAULT_SECTION_KEYS {
        if !defaults.get(key).is_some_and(is_container) {
            defaults.insert(key.to_owned(), Value::Object(Map::new()));
        }
    }

    if !defaults.contains_key(NUMBER_PRECISION_THRESHOLD_KEY) {
        defaults.insert(
            NUMBER_PRECISION_THRESHOLD_KEY.to_owned(),
            Value::from(MAX_SAFE_INTEGER),
        );
    }

    for (key, fallback) in DISPLAY_DEFAULTS {
        if !defaults.get(key).is_some_and(keeps_display_value) {
            defaults.insert(key.to_owned(), Value::from(fallback));
        }
    }

    SpreadsheetDefaults::from_map(defaults)
}

fn keeps_display_value(value: &Value) -> bool {
    is_truthy(value) || value.as_str() == Some("")
}
