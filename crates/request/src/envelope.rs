//! Transport envelope validation.
//!
//! The envelope is untrusted: it is accepted as an arbitrary JSON value and
//! checked in a fixed order, reporting only the first violation.

use crate::error::{RequestError, RequestResult};
use crate::options::ParseOptions;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sheet_render_domain::{JsonType, type_name_of};
use std::collections::BTreeMap;

const POST_DATA_KEY: &str = "postData";
const CONTENTS_KEY: &str = "contents";
const POST_DATA_PATH: &str = "/postData";
const CONTENTS_PATH: &str = "/postData/contents";

/// An envelope that passed validation, with its body borrowed out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedEvent<'a> {
    event: &'a Value,
    body: &'a str,
}

impl<'a> ValidatedEvent<'a> {
    /// The envelope, unchanged.
    #[must_use]
    pub const fn event(&self) -> &'a Value {
        self.event
    }

    /// The non-empty request body.
    #[must_use]
    pub const fn body(&self) -> &'a str {
        self.body
    }
}

/// Validate a transport envelope and borrow its body.
///
/// Checks, in order: the event is an object, `postData` is an object,
/// `postData.contents` is a string, and that string is non-empty. A body
/// limit from `options` is enforced last.
pub fn validate_http_event<'a>(
    event: &'a Value,
    options: &ParseOptions,
) -> RequestResult<ValidatedEvent<'a>> {
    let Value::Object(fields) = event else {
        return Err(RequestError::http_event(
            "Invalid HTTP event: event object is null or not an object",
            "/",
            "object",
            JsonType::of(event).as_str(),
        ));
    };

    let raw_post_data = fields.get(POST_DATA_KEY);
    let Some(Value::Object(post_data)) = raw_post_data else {
        return Err(RequestError::http_event(
            "Invalid HTTP event: postData is required for POST requests",
            POST_DATA_PATH,
            "object",
            type_name_of(raw_post_data),
        ));
    };

    let contents = post_data.get(CONTENTS_KEY);
    let Some(Value::String(body)) = contents else {
        return Err(RequestError::http_event(
            "Invalid HTTP event: postData.contents must be a string",
            CONTENTS_PATH,
            "string",
            type_name_of(contents),
        ));
    };

    if body.is_empty() {
        return Err(RequestError::http_event(
            "Invalid HTTP event: empty request body",
            CONTENTS_PATH,
            "non-empty string",
            "string",
        ));
    }

    if let Some(limit) = options.max_body_bytes {
        let length = u64::try_from(body.len()).unwrap_or(u64::MAX);
        if length > limit {
            return Err(RequestError::http_event(
                format!("Invalid HTTP event: request body exceeds {limit} bytes"),
                CONTENTS_PATH,
                "string",
                "string",
            )
            .with_limit_bytes(limit));
        }
    }

    Ok(ValidatedEvent { event, body })
}

/// Typed transport envelope, for callers that build requests locally.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpEvent {
    /// POST body and its content type.
    pub post_data: PostData,
    /// HTTP method, usually `POST`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    /// Request headers.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
}

/// POST payload carried by an [`HttpEvent`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostData {
    /// Raw request body.
    pub contents: String,
    /// Content type, e.g. `application/json`.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

impl HttpEvent {
    /// A JSON `POST` carrying `body`.
    pub fn post(body: impl Into<String>) -> Self {
        Self {
            post_data: PostData {
                contents: body.into(),
                content_type: Some("application/json".to_owned()),
            },
            method: Some("POST".to_owned()),
            headers: BTreeMap::new(),
        }
    }

    /// Add a request header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Raw envelope value as the validator sees it.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let mut post_data = Map::new();
        post_data.insert(
            CONTENTS_KEY.to_owned(),
            Value::String(self.post_data.contents.clone()),
        );
        if let Some(content_type) = &self.post_data.content_type {
            post_data.insert("type".to_owned(), Value::String(content_type.clone()));
        }

        let mut event = Map::new();
        event.insert(POST_DATA_KEY.to_owned(), Value::Object(post_data));
        if let Some(method) = &self.method {
            event.insert("method".to_owned(), Value::String(method.clone()));
        }
        if !self.headers.is_empty() {
            let headers = self
                .headers
                .iter()
                .map(|(name, value)| (name.clone(), Value::String(value.clone())))
                .collect();
            event.insert("headers".to_owned(), Value::Object(headers));
        }
        Value::Object(event)
    }
}
