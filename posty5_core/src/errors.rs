//! Error taxonomy for the API client and the normalization step every failed
//! call passes through before it reaches the caller.

use std::sync::Arc;

use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Which branch of the taxonomy an [`Error`] belongs to.
///
/// Callers branch on this instead of inspecting transport internals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// No response reached the client (connection refused, DNS, timeout).
    Network,
    /// HTTP 400. Carries the field-level problems reported by the API, if any.
    Validation { fields: Vec<InvalidField> },
    /// HTTP 401.
    Authentication,
    /// HTTP 403.
    Authorization,
    /// HTTP 404.
    NotFound,
    /// HTTP 429. `retry_after` is the `retry-after` header in seconds.
    RateLimit { retry_after: Option<u64> },
    /// HTTP 500, 502, 503 or 504.
    Server,
    /// Anything else, including plain and unknown-shaped failures.
    Generic,
}

/// One segment of an invalid field's path: an object key or an array index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    Index(u64),
    Key(String),
}

impl std::fmt::Display for PathSegment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathSegment::Index(i) => write!(f, "{}", i),
            PathSegment::Key(k) => f.write_str(k),
        }
    }
}

/// A single field-level validation problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvalidField {
    pub path: Vec<PathSegment>,
    pub message: String,
}

impl InvalidField {
    /// Dotted rendering of the path, e.g. `pageInfo.title`.
    pub fn field(&self) -> String {
        self.path
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join(".")
    }
}

/// Both wire shapes the API uses for invalid fields: `{path: [...], message}`
/// and the older `{field: "...", message}`.
#[derive(Deserialize)]
struct RawInvalidField {
    #[serde(default)]
    path: Option<Vec<PathSegment>>,
    #[serde(default)]
    field: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl From<RawInvalidField> for InvalidField {
    fn from(raw: RawInvalidField) -> Self {
        let path = match (raw.path, raw.field) {
            (Some(path), _) => path,
            (None, Some(field)) => vec![PathSegment::Key(field)],
            (None, None) => Vec::new(),
        };
        InvalidField {
            path,
            message: raw.message.unwrap_or_default(),
        }
    }
}

/// A normalized API error.
///
/// Every failure surfaced by the transport, the storage transfer or a
/// resource client is one of these. Fields are private and never change
/// after construction.
#[derive(thiserror::Error, Debug, Clone)]
#[error("{message}")]
pub struct Error {
    kind: ErrorKind,
    message: String,
    code: Option<String>,
    status: Option<u16>,
    details: Option<Value>,
    #[source]
    source: Option<Arc<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    fn new(kind: ErrorKind, message: impl Into<String>, code: Option<&str>, status: Option<u16>) -> Self {
        Self {
            kind,
            message: message.into(),
            code: code.map(str::to_string),
            status,
            details: None,
            source: None,
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Network, message, Some("NETWORK_ERROR"), None)
    }

    pub fn validation(message: impl Into<String>, fields: Vec<InvalidField>) -> Self {
        Self::new(
            ErrorKind::Validation { fields },
            message,
            Some("VALIDATION_ERROR"),
            Some(400),
        )
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(
            ErrorKind::Authentication,
            message,
            Some("AUTHENTICATION_ERROR"),
            Some(401),
        )
    }

    pub fn authorization(message: impl Into<String>) -> Self {
        Self::new(
            ErrorKind::Authorization,
            message,
            Some("AUTHORIZATION_ERROR"),
            Some(403),
        )
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message, Some("NOT_FOUND"), Some(404))
    }

    pub fn rate_limit(message: impl Into<String>, retry_after: Option<u64>) -> Self {
        Self::new(
            ErrorKind::RateLimit { retry_after },
            message,
            Some("RATE_LIMIT_ERROR"),
            Some(429),
        )
    }

    pub fn server(message: impl Into<String>, status: u16) -> Self {
        Self::new(ErrorKind::Server, message, Some("SERVER_ERROR"), Some(status))
    }

    pub fn generic(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Generic, message, None, None)
    }

    /// A declared-success envelope arrived without a `result` payload.
    pub fn missing_result(message: &str) -> Self {
        let message = if message.is_empty() {
            "Response did not include a result".to_string()
        } else {
            format!("Response did not include a result: {}", message)
        };
        Self::new(ErrorKind::Generic, message, Some("MISSING_RESULT"), None)
    }

    /// The storage backend rejected a pre-signed transfer.
    pub fn upload_failed(status: u16, body: &str) -> Self {
        let mut err = Self::new(
            ErrorKind::Generic,
            format!("File upload failed with status {}", status),
            Some("UPLOAD_FAILED"),
            Some(status),
        );
        if !body.is_empty() {
            err.details = Some(json!({ "body": body }));
        }
        err
    }

    /// A metadata call that must hand back an upload target did not.
    pub fn missing_upload_target(resource_id: &str) -> Self {
        Self::new(
            ErrorKind::Generic,
            format!("No upload configuration returned for {}", resource_id),
            Some("MISSING_UPLOAD_TARGET"),
            None,
        )
    }

    pub(crate) fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    pub(crate) fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Arc::new(source));
        self
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Machine-readable code, e.g. `NOT_FOUND` or whatever the API supplied.
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    /// HTTP status the error was derived from, if any.
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    /// Structured details copied out of the response body.
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Seconds to wait before retrying, for rate-limit errors that carried one.
    pub fn retry_after(&self) -> Option<u64> {
        match self.kind {
            ErrorKind::RateLimit { retry_after } => retry_after,
            _ => None,
        }
    }

    /// Field-level problems, for validation errors. Empty otherwise.
    pub fn invalid_fields(&self) -> &[InvalidField] {
        match &self.kind {
            ErrorKind::Validation { fields } => fields,
            _ => &[],
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind == ErrorKind::NotFound
    }
}

/// A failure as it comes out of a call, before normalization.
#[derive(Debug)]
pub enum Failure {
    /// Already one of ours; passes through untouched.
    Normalized(Error),
    /// The request never produced a response.
    Transport(reqwest::Error),
    /// The server answered with a non-2xx status.
    Response {
        status: StatusCode,
        headers: HeaderMap,
        body: String,
    },
    /// An ordinary error with no network characteristics (encoding, I/O, ...).
    Plain(Box<dyn std::error::Error + Send + Sync>),
    /// Something that is not an error at all.
    Unknown(Value),
}

impl Failure {
    /// Only failures without a response and 5xx responses are worth retrying.
    pub fn is_retryable(&self) -> bool {
        match self {
            Failure::Transport(_) => true,
            Failure::Response { status, .. } => status.as_u16() >= 500,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for Failure {
    fn from(e: reqwest::Error) -> Self {
        // Builder errors (bad header, bad URL) never touched the network.
        if e.is_builder() {
            Failure::Plain(Box::new(e))
        } else {
            Failure::Transport(e)
        }
    }
}

impl From<Error> for Failure {
    fn from(e: Error) -> Self {
        Failure::Normalized(e)
    }
}

/// Converts any failure into a normalized [`Error`].
pub fn normalize(failure: Failure) -> Error {
    match failure {
        Failure::Normalized(err) => err,
        Failure::Transport(err) => {
            let message = if err.is_timeout() {
                "Request timeout"
            } else {
                "Network error: unable to connect"
            };
            Error::network(message)
                .with_details(json!({ "originalError": err.to_string() }))
                .with_source(err)
        }
        Failure::Response {
            status,
            headers,
            body,
        } => from_response(status, &headers, &body),
        Failure::Plain(err) => {
            let message = err.to_string();
            let mut normalized =
                Error::generic(message.clone()).with_details(json!({ "originalError": message }));
            normalized.source = Some(Arc::from(err));
            normalized
        }
        Failure::Unknown(value) => Error::generic("An unknown error occurred")
            .with_details(json!({ "originalError": value })),
    }
}

fn from_response(status: StatusCode, headers: &HeaderMap, body: &str) -> Error {
    let data: Option<Value> = serde_json::from_str(body).ok();

    let message = data
        .as_ref()
        .and_then(|d| d.get("message"))
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
        .or_else(|| status.canonical_reason().map(str::to_string))
        .unwrap_or_else(|| "An error occurred".to_string());

    let details = match &data {
        Some(d) => match d.get("details") {
            Some(inner) if !inner.is_null() => Some(inner.clone()),
            _ => Some(d.clone()),
        },
        None if !body.is_empty() => Some(Value::String(body.to_string())),
        None => None,
    };

    let mut err = match status.as_u16() {
        400 => Error::validation(message, invalid_fields(data.as_ref())),
        401 => Error::authentication(message),
        403 => Error::authorization(message),
        404 => Error::not_found(message),
        429 => Error::rate_limit(message, retry_after(headers)),
        code @ (500 | 502 | 503 | 504) => Error::server(message, code),
        code => {
            let mut err = Error::generic(message);
            err.status = Some(code);
            err.code = data
                .as_ref()
                .and_then(|d| d.get("code"))
                .and_then(Value::as_str)
                .map(str::to_string);
            err
        }
    };
    err.details = details;
    err
}

fn invalid_fields(data: Option<&Value>) -> Vec<InvalidField> {
    let Some(data) = data else {
        return Vec::new();
    };
    let list = match data.get("exception") {
        Some(v) if v.is_array() => v,
        _ => match data.get("errors") {
            Some(v) if v.is_array() => v,
            _ => return Vec::new(),
        },
    };
    serde_json::from_value::<Vec<RawInvalidField>>(list.clone())
        .map(|raw| raw.into_iter().map(InvalidField::from).collect())
        .unwrap_or_else(|e| {
            tracing::debug!("Ignoring unparseable invalid-field list: {}", e);
            Vec::new()
        })
}

fn retry_after(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    fn response(status: u16, body: &str) -> Failure {
        Failure::Response {
            status: StatusCode::from_u16(status).unwrap(),
            headers: HeaderMap::new(),
            body: body.to_string(),
        }
    }

    #[test]
    fn classifies_statuses() {
        let cases = [
            (400, "VALIDATION_ERROR"),
            (401, "AUTHENTICATION_ERROR"),
            (403, "AUTHORIZATION_ERROR"),
            (404, "NOT_FOUND"),
            (429, "RATE_LIMIT_ERROR"),
            (500, "SERVER_ERROR"),
            (502, "SERVER_ERROR"),
            (503, "SERVER_ERROR"),
            (504, "SERVER_ERROR"),
        ];
        for (status, code) in cases {
            let err = normalize(response(status, r#"{"message":"nope"}"#));
            assert_eq!(err.code(), Some(code), "status {}", status);
            assert_eq!(err.status(), Some(status));
            assert_eq!(err.message(), "nope");
        }

        assert!(matches!(
            normalize(response(400, "{}")).kind(),
            ErrorKind::Validation { .. }
        ));
        assert_eq!(*normalize(response(401, "{}")).kind(), ErrorKind::Authentication);
        assert_eq!(*normalize(response(403, "{}")).kind(), ErrorKind::Authorization);
        assert_eq!(*normalize(response(404, "{}")).kind(), ErrorKind::NotFound);
        assert!(matches!(
            normalize(response(429, "{}")).kind(),
            ErrorKind::RateLimit { .. }
        ));
        assert_eq!(*normalize(response(500, "{}")).kind(), ErrorKind::Server);
    }

    #[test]
    fn other_status_is_generic_with_body_code() {
        let err = normalize(response(409, r#"{"message":"taken","code":"DUPLICATE"}"#));
        assert_eq!(*err.kind(), ErrorKind::Generic);
        assert_eq!(err.code(), Some("DUPLICATE"));
        assert_eq!(err.status(), Some(409));
    }

    #[test]
    fn rate_limit_reads_retry_after() {
        let mut headers = HeaderMap::new();
        headers.insert(RETRY_AFTER, HeaderValue::from_static("5"));
        let err = normalize(Failure::Response {
            status: StatusCode::TOO_MANY_REQUESTS,
            headers,
            body: String::new(),
        });
        assert_eq!(err.retry_after(), Some(5));
        assert_eq!(err.message(), "Too Many Requests");
    }

    #[test]
    fn validation_parses_path_and_field_shapes() {
        let err = normalize(response(
            400,
            r#"{"message":"bad","exception":[{"path":["pageInfo","title"],"message":"required"},{"path":["items",2],"message":"too long"}]}"#,
        ));
        let fields = err.invalid_fields();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].field(), "pageInfo.title");
        assert_eq!(fields[1].path[1], PathSegment::Index(2));

        let err = normalize(response(
            400,
            r#"{"message":"bad","errors":[{"field":"baseUrl","message":"invalid"}]}"#,
        ));
        assert_eq!(err.invalid_fields()[0].field(), "baseUrl");
        assert_eq!(err.invalid_fields()[0].message, "invalid");
    }

    #[test]
    fn details_prefer_nested_details() {
        let err = normalize(response(404, r#"{"message":"gone","details":{"id":"abc"}}"#));
        assert_eq!(err.details(), Some(&json!({"id": "abc"})));

        let err = normalize(response(404, r#"{"message":"gone"}"#));
        assert_eq!(err.details(), Some(&json!({"message": "gone"})));
    }

    #[test]
    fn non_json_body_falls_back_to_reason_phrase() {
        let err = normalize(response(502, "<html>Bad Gateway</html>"));
        assert_eq!(err.message(), "Bad Gateway");
        assert_eq!(err.details(), Some(&json!("<html>Bad Gateway</html>")));
    }

    #[test]
    fn normalization_is_idempotent() {
        let original = Error::not_found("missing page");
        let again = normalize(Failure::Normalized(original.clone()));
        assert_eq!(again.kind(), original.kind());
        assert_eq!(again.message(), original.message());
        assert_eq!(again.code(), original.code());

        let twice = normalize(Failure::from(again));
        assert_eq!(*twice.kind(), ErrorKind::NotFound);
        assert_eq!(twice.message(), "missing page");
    }

    #[test]
    fn plain_error_keeps_message_and_source() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk on fire");
        let err = normalize(Failure::Plain(Box::new(io)));
        assert_eq!(*err.kind(), ErrorKind::Generic);
        assert_eq!(err.message(), "disk on fire");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn unknown_failure_is_generic() {
        let err = normalize(Failure::Unknown(json!(42)));
        assert_eq!(err.message(), "An unknown error occurred");
        assert_eq!(err.details(), Some(&json!({"originalError": 42})));
    }

    #[test]
    fn retryable_failures() {
        assert!(response(500, "").is_retryable());
        assert!(response(503, "").is_retryable());
        assert!(!response(404, "").is_retryable());
        assert!(!response(429, "").is_retryable());
        assert!(!Failure::Normalized(Error::generic("x")).is_retryable());
    }
}
