//! Normalized spreadsheet render metadata.
//!
//! These types describe the `$spreadsheet` section after normalization: every
//! field downstream code relies on is present, and every key the caller
//! supplied that is not modelled here is carried verbatim in `extra`.

use crate::SchemaVersion;
use schemars::JsonSchema;
use serde::Serialize;
use serde_json::{Map, Value};

/// Largest integer exactly representable by an IEEE-754 double (2^53 - 1).
pub const MAX_SAFE_INTEGER: u64 = 9_007_199_254_740_991;

/// Path syntax assumed when the caller does not name one.
pub const DEFAULT_PATH_SYNTAX_TYPE: &str = "json-pointer-wildcard";

/// Default rendering of `null` values.
pub const DEFAULT_NULL_DISPLAY: &str = "";
/// Default rendering of empty arrays.
pub const DEFAULT_EMPTY_ARRAY_DISPLAY: &str = "[empty array]";
/// Default rendering of empty objects.
pub const DEFAULT_EMPTY_OBJECT_DISPLAY: &str = "{ }";
/// Default rendering of empty strings.
pub const DEFAULT_EMPTY_STRING_DISPLAY: &str = "";

/// Sub-sections of `defaults` that are always present after normalization.
pub const DEFAULT_SECTION_KEYS: [&str; 5] = [
    "sheet",
    "cellStyle",
    "headerStyle",
    "typeDefaults",
    "globalHeader",
];

/// Display fields of `defaults` paired with their fixed default values.
pub const DISPLAY_DEFAULTS: [(&str, &str); 4] = [
    ("nullDisplay", DEFAULT_NULL_DISPLAY),
    ("emptyArrayDisplay", DEFAULT_EMPTY_ARRAY_DISPLAY),
    ("emptyObjectDisplay", DEFAULT_EMPTY_OBJECT_DISPLAY),
    ("emptyStringDisplay", DEFAULT_EMPTY_STRING_DISPLAY),
];

/// Key of the numeric precision threshold inside `defaults`.
pub const NUMBER_PRECISION_THRESHOLD_KEY: &str = "numberPrecisionThreshold";

/// Normalized `$spreadsheet` configuration.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SpreadsheetMetadata {
    /// Configuration contract revision.
    #[schemars(with = "String")]
    pub schema_version: SchemaVersion,
    /// Rendering defaults.
    pub defaults: SpreadsheetDefaults,
    /// Mapping rules in declaration order.
    pub mappings: Vec<MappingSpec>,
    /// Path pattern syntax configuration.
    pub path_syntax: PathSyntax,
    /// Caller-supplied keys not modelled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SpreadsheetMetadata {
    /// Render the metadata back into a JSON mapping.
    ///
    /// The result is the exact normalized mapping, including passthrough keys.
    #[must_use]
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = self.extra.clone();
        map.insert(
            "schemaVersion".to_owned(),
            Value::String(self.schema_version.as_str().to_owned()),
        );
        map.insert("defaults".to_owned(), Value::Object(self.defaults.to_map()));
        map.insert(
            "mappings".to_owned(),
            Value::Array(
                self.mappings
                    .iter()
                    .map(|mapping| Value::Object(mapping.to_map()))
                    .collect(),
            ),
        );
        map.insert(
            "pathSyntax".to_owned(),
            Value::Object(self.path_syntax.to_map()),
        );
        map
    }

    /// Render the metadata as a JSON value.
    #[must_use]
    pub fn to_value(&self) -> Value {
        Value::Object(self.to_map())
    }

    /// Look up a mapping rule by id. The first match wins.
    #[must_use]
    pub fn mapping(&self, id: &str) -> Option<&MappingSpec> {
        self.mappings.iter().find(|mapping| mapping.id == id)
    }
}

/// Rendering defaults.
///
/// The five sections are JSON mappings, except that an array supplied by the
/// caller is kept as-is. Display fields hold either the caller's truthy value,
/// an explicit empty string, or the fixed default.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SpreadsheetDefaults {
    /// Sheet-level defaults.
    pub sheet: Value,
    /// Default cell styling.
    pub cell_style: Value,
    /// Default header styling.
    pub header_style: Value,
    /// Type-specific defaults.
    pub type_defaults: Value,
    /// Global header configuration.
    pub global_header: Value,
    /// Threshold above which numbers lose precision.
    pub number_precision_threshold: Value,
    /// Display value for `null` fields.
    pub null_display: Value,
    /// Display value for empty arrays.
    pub empty_array_display: Value,
    /// Display value for empty objects.
    pub empty_object_display: Value,
    /// Display value for empty strings.
    pub empty_string_display: Value,
    /// Caller-supplied keys not modelled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for SpreadsheetDefaults {
    fn default() -> Self {
        Self {
            sheet: Value::Object(Map::new()),
            cell_style: Value::Object(Map::new()),
            header_style: Value::Object(Map::new()),
            type_defaults: Value::Object(Map::new()),
            global_header: Value::Object(Map::new()),
            number_precision_threshold: Value::from(MAX_SAFE_INTEGER),
            null_display: Value::from(DEFAULT_NULL_DISPLAY),
            empty_array_display: Value::from(DEFAULT_EMPTY_ARRAY_DISPLAY),
            empty_object_display: Value::from(DEFAULT_EMPTY_OBJECT_DISPLAY),
            empty_string_display: Value::from(DEFAULT_EMPTY_STRING_DISPLAY),
            extra: Map::new(),
        }
    }
}

impl SpreadsheetDefaults {
    /// Build defaults from a mapping in which every modelled key is present.
    ///
    /// Missing keys fall back to [`SpreadsheetDefaults::default`]; remaining
    /// keys become `extra`.
    #[must_use]
    pub fn from_map(mut map: Map<String, Value>) -> Self {
        let fallback = Self::default();
        let mut take = |key: &str, fallback: Value| map.remove(key).unwrap_or(fallback);

        let sheet = take("sheet", fallback.sheet);
        let cell_style = take("cellStyle", fallback.cell_style);
        let header_style = take("headerStyle", fallback.header_style);
        let type_defaults = take("typeDefaults", fallback.type_defaults);
        let global_header = take("globalHeader", fallback.global_header);
        let number_precision_threshold = take(
            NUMBER_PRECISION_THRESHOLD_KEY,
            fallback.number_precision_threshold,
        );
        let null_display = take("nullDisplay", fallback.null_display);
        let empty_array_display = take("emptyArrayDisplay", fallback.empty_array_display);
        let empty_object_display = take("emptyObjectDisplay", fallback.empty_object_display);
        let empty_string_display = take("emptyStringDisplay", fallback.empty_string_display);

        Self {
            sheet,
            cell_style,
            header_style,
            type_defaults,
            global_header,
            number_precision_threshold,
            null_display,
            empty_array_display,
            empty_object_display,
            empty_string_display,
            extra: map,
        }
    }

    /// Render the defaults back into a JSON mapping.
    #[must_use]
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = self.extra.clone();
        let fields = [
            ("sheet", &self.sheet),
            ("cellStyle", &self.cell_style),
            ("headerStyle", &self.header_style),
            ("typeDefaults", &self.type_defaults),
            ("globalHeader", &self.global_header),
            (NUMBER_PRECISION_THRESHOLD_KEY, &self.number_precision_threshold),
            ("nullDisplay", &self.null_display),
            ("emptyArrayDisplay", &self.empty_array_display),
            ("emptyObjectDisplay", &self.empty_object_display),
            ("emptyStringDisplay", &self.empty_string_display),
        ];
        for (key, value) in fields {
            map.insert(key.to_owned(), value.clone());
        }
        map
    }
}

/// A single mapping rule.
///
/// Only `id` and `path` are validated. Everything else passes through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct MappingSpec {
    /// Rule identifier (non-empty, uniqueness not enforced).
    pub id: String,
    /// JSON-Pointer-like pattern (non-empty, syntax not validated).
    pub path: String,
    /// Optional fields such as `match`, `display`, and `behaviorHints`.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MappingSpec {
    /// Match mode, e.g. `exact` or `prefix`, when given as a string.
    #[must_use]
    pub fn match_mode(&self) -> Option<&str> {
        self.extra.get("match").and_then(Value::as_str)
    }

    /// Human-friendly description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.extra.get("description").and_then(Value::as_str)
    }

    /// Display instruction object.
    #[must_use]
    pub fn display(&self) -> Option<&Map<String, Value>> {
        self.extra.get("display").and_then(Value::as_object)
    }

    /// Behavior hints, passed through unvalidated.
    #[must_use]
    pub fn behavior_hints(&self) -> Option<&Value> {
        self.extra.get("behaviorHints")
    }

    /// Render the rule back into a JSON mapping.
    #[must_use]
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = self.extra.clone();
        map.insert("id".to_owned(), Value::String(self.id.clone()));
        map.insert("path".to_owned(), Value::String(self.path.clone()));
        map
    }
}

/// Path pattern syntax configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct PathSyntax {
    /// Syntax identifier. Kept verbatim when supplied, whatever its type.
    #[serde(rename = "type")]
    pub syntax_type: Value,
    /// Remaining caller-supplied keys.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for PathSyntax {
    fn default() -> Self {
        Self {
            syntax_type: Value::from(DEFAULT_PATH_SYNTAX_TYPE),
            extra: Map::new(),
        }
    }
}

impl PathSyntax {
    /// Syntax identifier when it is a string.
    #[must_use]
    pub fn type_name(&self) -> Option<&str> {
        self.syntax_type.as_str()
    }

    /// Render the section back into a JSON mapping.
    #[must_use]
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = self.extra.clone();
        map.insert("type".to_owned(), self.syntax_type.clone());
        map
    }
}
