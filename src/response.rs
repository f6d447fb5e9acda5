//! Turns a raw HTTP status and body into a payload or a typed error.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{ApiError, Result};

/// Body of a successful response, before it is cast into a typed shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// No body, e.g. `204 No Content`.
    Empty,
    Json(Value),
    /// A non-empty body that is not JSON.
    Text(String),
}

impl Payload {
    pub fn into_value(self) -> Value {
        match self {
            Payload::Empty => Value::Null,
            Payload::Json(value) => value,
            Payload::Text(text) => Value::String(text),
        }
    }

    /// Deserializes the payload into `T`. An empty payload decodes as `null`.
    pub fn json<T: DeserializeOwned>(self) -> Result<T> {
        Ok(serde_json::from_value(self.into_value())?)
    }
}

/// Classifies a response.
///
/// Failure statuses always become `MqError::Api`; success statuses never do,
/// whatever the body looks like.
pub fn classify(status: StatusCode, body: &[u8]) -> Result<Payload> {
    if !status.is_success() {
        let err = error_from_response(status, body);
        debug!(
            kind = ?err.kind(),
            code = ?err.code(),
            %status,
            "API request failed"
        );
        return Err(err.into());
    }

    if body.is_empty() {
        return Ok(Payload::Empty);
    }

    match serde_json::from_slice::<Value>(body) {
        Ok(value) => Ok(Payload::Json(value)),
        Err(_) => {
            let text = String::from_utf8_lossy(body);
            if text.is_empty() {
                Ok(Payload::Empty)
            } else {
                Ok(Payload::Text(text.into_owned()))
            }
        }
    }
}

/// Builds the API error for a failure status.
///
/// Bodies that are not a JSON object are replaced by
/// `{"message": <body text or "HTTP <status>">, "code": <status>}`. Because
/// that synthetic code goes through the remote-code table, such errors come
/// out as `Generic`.
pub fn error_from_response(status: StatusCode, body: &[u8]) -> ApiError {
    let data = match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => map,
        _ => {
            let text = String::from_utf8_lossy(body);
            let message = if text.is_empty() {
                format!("HTTP {status}")
            } else {
                text.into_owned()
            };
            let mut map = Map::new();
            map.insert("message".to_string(), Value::String(message));
            map.insert("code".to_string(), Value::from(status.as_u16()));
            map
        }
    };
    ApiError::from_body(&data, Some(status))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ApiErrorKind, MqError};
    use serde_json::json;

    fn api_error(status: u16, body: &str) -> ApiError {
        let status = StatusCode::from_u16(status).unwrap();
        match classify(status, body.as_bytes()) {
            Err(MqError::Api(err)) => err,
            other => panic!("expected API error, got {other:?}"),
        }
    }

    #[test]
    fn no_content_is_empty() {
        assert_eq!(classify(StatusCode::NO_CONTENT, b"").unwrap(), Payload::Empty);
        assert_eq!(classify(StatusCode::OK, b"").unwrap(), Payload::Empty);
    }

    #[test]
    fn json_body_is_parsed() {
        let payload = classify(StatusCode::OK, br#"{"Response": true}"#).unwrap();
        assert_eq!(payload, Payload::Json(json!({"Response": true})));
    }

    #[test]
    fn non_json_success_body_is_returned_as_text() {
        let payload = classify(StatusCode::OK, b"pong").unwrap();
        assert_eq!(payload, Payload::Text("pong".to_string()));
    }

    #[test]
    fn remote_code_error_body() {
        let err = api_error(400, r#"{"code":3,"message":"bad field"}"#);
        assert_eq!(err.kind(), ApiErrorKind::Validation);
        assert_eq!(err.message(), "bad field");
        assert_eq!(err.code(), Some(3));
        assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
    }

    #[test]
    fn remote_code_precedence_on_conflict() {
        let err = api_error(400, r#"{"code":16,"message":"token rejected"}"#);
        assert_eq!(err.kind(), ApiErrorKind::Unauthorized);
    }

    #[test]
    fn not_found_from_code_with_any_status() {
        assert_eq!(api_error(500, r#"{"code":5}"#).kind(), ApiErrorKind::NotFound);
        assert_eq!(api_error(404, r#"{"message":"nope"}"#).kind(), ApiErrorKind::NotFound);
    }

    #[test]
    fn unmapped_pair_is_generic() {
        let err = api_error(418, r#"{"code":999,"message":"teapot"}"#);
        assert_eq!(err.kind(), ApiErrorKind::Generic);
    }

    #[test]
    fn plain_text_error_page() {
        let err = api_error(500, "Internal Server Error: upstream crashed");
        assert_eq!(err.kind(), ApiErrorKind::Generic);
        assert_eq!(err.message(), "Internal Server Error: upstream crashed");
        assert_eq!(err.code(), Some(500));
        assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
    }

    #[test]
    fn empty_error_body_uses_status_phrase() {
        let err = api_error(503, "");
        assert_eq!(err.message(), "HTTP 503 Service Unavailable");
        assert_eq!(err.code(), Some(503));
    }

    #[test]
    fn json_array_error_body_is_treated_as_text() {
        let err = api_error(400, r#"["a","b"]"#);
        assert_eq!(err.message(), r#"["a","b"]"#);
        assert_eq!(err.code(), Some(400));
    }

    #[test]
    fn payload_decodes_typed_shapes() {
        #[derive(serde::Deserialize)]
        struct Envelope {
            #[serde(rename = "Response")]
            response: bool,
        }
        let payload = Payload::Json(json!({"Response": true}));
        assert!(payload.json::<Envelope>().unwrap().response);
        assert!(Payload::Empty.json::<Envelope>().is_err());
        assert_eq!(Payload::Empty.json::<Option<bool>>().unwrap(), None);
    }
}
