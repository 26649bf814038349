//! Pipeline options.

use serde::{Deserialize, Serialize};

/// Tunables for [`parse_http_event_with`](crate::parse_http_event_with).
///
/// The default applies no limits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseOptions {
    /// Reject bodies whose UTF-8 length exceeds this many bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_body_bytes: Option<u64>,
}

impl ParseOptions {
    /// Options with a body size limit.
    #[must_use]
    pub const fn with_max_body_bytes(mut self, limit: u64) -> Self {
        self.max_body_bytes = Some(limit);
        self
    }
}
