//! Error types for Lendcore API operations.

use thiserror::Error;

/// Errors that can occur during Lendcore API operations.
#[derive(Debug, Error)]
pub enum LendError {
    /// Configuration is missing or invalid (unknown environment, missing
    /// credential material, unusable config file). Never retried.
    #[error("configuration error: {0}")]
    Config(String),

    /// The access credential was rejected (HTTP 401).
    ///
    /// This is the one error class that triggers transparent credential
    /// renewal followed by a single replay of the request.
    #[error("unauthorized: {message}")]
    Unauthorized { message: String },

    /// The caller lacks permission for the operation (HTTP 403).
    ///
    /// Unlike [`LendError::Unauthorized`], this is a permission problem
    /// rather than an expired credential and is never retried.
    #[error("forbidden: {message}")]
    Forbidden { message: String },

    /// The identity provider rejected a credential-renewal request.
    #[error("credential renewal failed (HTTP {status}): {message}")]
    Renewal { status: u16, message: String },

    /// Entity not found (HTTP 404).
    #[error("not found: {path}")]
    NotFound { path: String },

    /// Any other non-2xx response, with the parsed error payload when the
    /// body carried one.
    #[error("API error (HTTP {status}): {message}")]
    Api {
        status: u16,
        code: Option<String>,
        message: String,
        details: Option<serde_json::Value>,
    },

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// A response that parsed but did not have the expected shape.
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),
}

impl LendError {
    /// Whether this error should trigger credential renewal and a replay.
    pub fn is_credential_expired(&self) -> bool {
        matches!(self, LendError::Unauthorized { .. })
    }

    /// The duplicate-resource id carried by a 409 `DuplicateError`
    /// payload, if this is one.
    pub fn duplicate_id(&self) -> Option<&str> {
        match self {
            LendError::Api {
                status: 409,
                code: Some(code),
                details: Some(details),
                ..
            } if code == "DuplicateError" => {
                details.get("duplicateId").and_then(|v| v.as_str())
            }
            _ => None,
        }
    }
}

/// Result type alias for Lendcore operations.
pub type Result<T> = core::result::Result<T, LendError>;

/// Shape of the error payload the services return on failure.
#[derive(Debug, serde::Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    details: Option<serde_json::Value>,
}

/// Map a non-2xx status and raw body to the error taxonomy.
///
/// Shared by the async and blocking transports so both conventions
/// classify failures identically.
pub(crate) fn status_error(status: u16, path: &str, body: &str) -> LendError {
    let parsed: Option<ErrorBody> = serde_json::from_str(body).ok();
    let message = parsed
        .as_ref()
        .and_then(|b| b.message.clone().or_else(|| b.error.clone()))
        .unwrap_or_else(|| {
            if body.is_empty() {
                format!("HTTP {status}")
            } else {
                body.to_string()
            }
        });

    match status {
        401 => LendError::Unauthorized { message },
        403 => LendError::Forbidden { message },
        404 => LendError::NotFound {
            path: path.to_string(),
        },
        _ => LendError::Api {
            status,
            code: parsed.as_ref().and_then(|b| b.code.clone()),
            message,
            details: parsed.and_then(|b| b.details),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_classifies_auth_failures() {
        let err = status_error(401, "v1/borrowers/b-1", r#"{"message":"token expired"}"#);
        assert!(err.is_credential_expired());
        assert!(err.to_string().contains("token expired"));

        let err = status_error(403, "v1/borrowers/b-1", r#"{"message":"no access"}"#);
        assert!(!err.is_credential_expired());
    }

    #[test]
    fn status_error_parses_code_and_details() {
        let body = r#"{"code":"DuplicateError","message":"already exists","details":{"duplicateId":"b-9"}}"#;
        let err = status_error(409, "v1/borrowers", body);
        assert_eq!(err.duplicate_id(), Some("b-9"));
    }

    #[test]
    fn duplicate_id_requires_duplicate_code() {
        let body = r#"{"code":"ValidationError","message":"bad","details":{"duplicateId":"b-9"}}"#;
        let err = status_error(409, "v1/borrowers", body);
        assert_eq!(err.duplicate_id(), None);
    }

    #[test]
    fn status_error_falls_back_to_raw_body() {
        let err = status_error(500, "v1/debts", "internal server error");
        assert!(err.to_string().contains("internal server error"));
    }
}
