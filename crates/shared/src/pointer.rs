//! JSON-Pointer error paths.
//!
//! Errors identify the offending input location with an RFC 6901 pointer.
//! The document root is rendered as `/` rather than the empty string.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Root path used when an error concerns the whole input.
pub const ROOT_PATH: &str = "/";

/// Owned JSON-Pointer built up one segment at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JsonPointer(String);

impl JsonPointer {
    /// Pointer addressing the document root.
    #[must_use]
    pub const fn root() -> Self {
        Self(String::new())
    }

    /// Build a pointer from unescaped segments.
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        segments
            .into_iter()
            .fold(Self::root(), |pointer, segment| pointer.child(segment))
    }

    /// Append an object key or array index, escaping `~` and `/`.
    pub fn push(&mut self, segment: impl AsRef<str>) {
        self.0.push('/');
        for ch in segment.as_ref().chars() {
            match ch {
                '~' => self.0.push_str("~0"),
                '/' => self.0.push_str("~1"),
                other => self.0.push(other),
            }
        }
    }

    /// Return a new pointer with one more segment.
    #[must_use]
    pub fn child(mut self, segment: impl AsRef<str>) -> Self {
        self.push(segment);
        self
    }

    /// Return a new pointer addressing an array element.
    #[must_use]
    pub fn index(self, index: usize) -> Self {
        self.child(index.to_string())
    }

    /// True when the pointer addresses the document root.
    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Rendered pointer, with the root shown as `/`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        if self.is_root() { ROOT_PATH } else { &self.0 }
    }
}

impl fmt::Display for JsonPointer {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl From<JsonPointer> for String {
    fn from(pointer: JsonPointer) -> Self {
        pointer.as_str().to_owned()
    }
}

/// Normalize a caller-supplied error path.
///
/// Missing or empty paths become [`ROOT_PATH`].
#[must_use]
pub fn normalize_error_path(path: Option<&str>) -> String {
    match path {
        Some(path) if !path.is_empty() => path.to_owned(),
        _ => ROOT_PATH.to_owned(),
    }
}
