//! API v1 DTO mapping helpers.

use crate::v1::{
    ApiV1ErrorCode, ApiV1ErrorDto, ApiV1ErrorKind, ApiV1ErrorMeta, ApiV1ParsedRequestDto,
    ApiV1Result, STATUS_BAD_REQUEST, STATUS_INTERNAL_ERROR, STATUS_PAYLOAD_TOO_LARGE,
};
use serde_json::{Map, Value};
use sheet_render_request::{ParsedPayload, RequestError, RequestResult};
use sheet_render_shared::{ErrorCode, ErrorEnvelope, ErrorKind};

/// Convert a shared `ErrorCode` into an API v1 error code string.
#[must_use]
pub fn error_code_to_api_v1(code: &ErrorCode) -> ApiV1ErrorCode {
    let namespace = sanitize_code_segment(code.namespace());
    let detail = sanitize_code_segment(code.code());
    format!("ERR_{namespace}_{detail}")
}

/// Map an `ErrorEnvelope` into an API v1 error DTO.
#[must_use]
pub fn error_envelope_to_api_v1_error(
    envelope: &ErrorEnvelope,
    extra_meta: Option<ApiV1ErrorMeta>,
) -> ApiV1ErrorDto {
    let mut merged = ApiV1ErrorMeta::new();
    for (key, value) in &envelope.metadata {
        merged.insert(key.clone(), value.clone());
    }
    if let Some(extra) = extra_meta {
        merged.extend(extra);
    }
    let meta = if merged.is_empty() { None } else { Some(merged) };

    ApiV1ErrorDto {
        code: error_code_to_api_v1(&envelope.code),
        message: envelope.message.clone(),
        kind: map_error_kind(envelope.kind),
        status: status_for_kind(envelope.kind),
        meta,
        fields: Map::new(),
    }
}

/// Map a pipeline rejection into an API v1 error DTO.
///
/// The serialized error (`errorType`, `path`, kind-specific fields and
/// `details`) is flattened into the DTO. Body-limit rejections suggest 413,
/// every other rejection 400.
#[must_use]
pub fn request_error_to_api_v1(error: &RequestError) -> ApiV1ErrorDto {
    let code = ErrorEnvelope::from(error.clone()).code;
    let mut fields = match serde_json::to_value(error) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    };
    fields.remove("message");

    let status = if error.is_body_limit() {
        STATUS_PAYLOAD_TOO_LARGE
    } else {
        STATUS_BAD_REQUEST
    };

    ApiV1ErrorDto {
        code: error_code_to_api_v1(&code),
        message: error.message().to_owned(),
        kind: ApiV1ErrorKind::Expected,
        status,
        meta: None,
        fields,
    }
}

/// Map a shared result into an API v1 result wrapper.
#[must_use]
pub fn result_to_api_v1_result<T>(
    result: Result<T, ErrorEnvelope>,
    extra_meta: Option<ApiV1ErrorMeta>,
) -> ApiV1Result<T> {
    match result {
        Ok(data) => ApiV1Result::ok(data),
        Err(error) => ApiV1Result::err(error_envelope_to_api_v1_error(&error, extra_meta)),
    }
}

/// Map a pipeline outcome into an API v1 result wrapper.
#[must_use]
pub fn parse_result_to_api_v1_result(
    result: &RequestResult<ParsedPayload>,
) -> ApiV1Result<ApiV1ParsedRequestDto> {
    match result {
        Ok(payload) => ApiV1Result::ok(ApiV1ParsedRequestDto {
            metadata: payload.metadata.to_value(),
            data: payload.data.clone(),
        }),
        Err(error) => ApiV1Result::err(request_error_to_api_v1(error)),
    }
}

const fn map_error_kind(kind: ErrorKind) -> ApiV1ErrorKind {
    match kind {
        ErrorKind::Expected | ErrorKind::Unexpected => ApiV1ErrorKind::Expected,
        ErrorKind::Invariant => ApiV1ErrorKind::Invariant,
    }
}

const fn status_for_kind(kind: ErrorKind) -> u16 {
    match kind {
        ErrorKind::Expected => STATUS_BAD_REQUEST,
        ErrorKind::Invariant | ErrorKind::Unexpected => STATUS_INTERNAL_ERROR,
    }
}

fn sanitize_code_segment(segment: &str) -> String {
    segment
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() {
                ch.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect()
}
