use reqwest::StatusCode;
use serde_json::Value;

/// Client-specific result type
pub type Result<T> = std::result::Result<T, GenerationError>;

/// Message used when the backend gives no usable reason
pub const GENERIC_FAILURE: &str = "Failed to generate images";

/// Errors from a generation round-trip
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend answered with a non-success status
    ///
    /// `message` is already the text meant for the user
    #[error("{message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Resolved human-readable reason
        message: String,
    },

    /// Success body did not match the expected shape
    #[error("failed to parse response: {0}")]
    Parse(String),

    /// Invalid client configuration
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl GenerationError {
    /// Build an `Api` error from a failed response's status and raw body
    pub fn from_response_body(status: StatusCode, body: Option<&str>) -> Self {
        Self::Api {
            status: status.as_u16(),
            message: resolve_error_message(status, body),
        }
    }
}

/// Turn an error body into the message shown to the user
///
/// A string `detail` wins; a structured `detail` contributes its `message`.
/// Parseable JSON without either yields the generic message, and an
/// unreadable or non-JSON body appends the status reason phrase to it.
pub fn resolve_error_message(status: StatusCode, body: Option<&str>) -> String {
    let parsed = body.and_then(|b| serde_json::from_str::<Value>(b).ok());

    let Some(json) = parsed else {
        return format!("{GENERIC_FAILURE}: {}", status_text(status));
    };

    detail_message(&json["detail"]).unwrap_or_else(|| GENERIC_FAILURE.to_owned())
}

/// Reason phrase of `status`, or its code when it has none
fn status_text(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map_or_else(|| status.as_str().to_owned(), str::to_owned)
}

fn detail_message(detail: &Value) -> Option<String> {
    let text = match detail {
        Value::String(s) => s.as_str(),
        Value::Object(map) => map.get("message")?.as_str()?,
        _ => return None,
    };

    (!text.is_empty()).then(|| text.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_detail_is_used_verbatim() {
        let msg = resolve_error_message(StatusCode::BAD_REQUEST, Some(r#"{"detail":"bad size"}"#));
        assert_eq!(msg, "bad size");
    }

    #[test]
    fn structured_detail_contributes_its_message() {
        let body = r#"{"detail":{"error":true,"message":"Invalid request parameters","details":[]}}"#;
        let msg = resolve_error_message(StatusCode::BAD_REQUEST, Some(body));
        assert_eq!(msg, "Invalid request parameters");
    }

    #[test]
    fn json_without_detail_is_generic() {
        let msg = resolve_error_message(StatusCode::INTERNAL_SERVER_ERROR, Some(r#"{"error":"boom"}"#));
        assert_eq!(msg, GENERIC_FAILURE);

        let msg = resolve_error_message(StatusCode::INTERNAL_SERVER_ERROR, Some(r#"{"detail":""}"#));
        assert_eq!(msg, GENERIC_FAILURE);
    }

    #[test]
    fn unparsable_body_appends_status_text() {
        let msg = resolve_error_message(StatusCode::BAD_GATEWAY, Some("<html>upstream down</html>"));
        assert_eq!(msg, "Failed to generate images: Bad Gateway");
    }

    #[test]
    fn unreadable_body_appends_status_text() {
        let msg = resolve_error_message(StatusCode::SERVICE_UNAVAILABLE, None);
        assert_eq!(msg, "Failed to generate images: Service Unavailable");
    }

    #[test]
    fn unknown_status_falls_back_to_its_code() {
        let status = StatusCode::from_u16(599).unwrap();
        let msg = resolve_error_message(status, Some("upstream timed out"));
        assert_eq!(msg, "Failed to generate images: 599");
    }

    #[test]
    fn api_error_displays_only_the_message() {
        let err = GenerationError::from_response_body(StatusCode::UNPROCESSABLE_ENTITY, Some(r#"{"detail":"bad size"}"#));
        assert_eq!(err.to_string(), "bad size");
        assert!(matches!(err, GenerationError::Api { status: 422, .. }));
    }
}
