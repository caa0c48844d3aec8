//! Error taxonomy for the backend API.
//!
//! Domain rejections arrive as plain string codes; this layer carries them
//! opaquely and leaves mapping to localized text to the UI (`i18n`).

use std::fmt;

#[derive(Debug, Clone)]
pub enum ApiError {
    /// Backend rejected the operation with a domain code
    /// (e.g. `DUPLICATE_STATION`, `PRESET_IN_USE`).
    Domain { code: String },
    /// Non-success HTTP status without a recognizable domain code.
    Http { status: u16, message: String },
    /// Transport failure (connect, timeout, TLS).
    Network { message: String },
    /// Response body did not match the expected shape.
    Decode { message: String },
}

impl ApiError {
    pub fn domain(code: impl Into<String>) -> Self {
        ApiError::Domain { code: code.into() }
    }

    pub fn http(status: u16, message: impl Into<String>) -> Self {
        ApiError::Http {
            status,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        ApiError::Network {
            message: message.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        ApiError::Decode {
            message: message.into(),
        }
    }

    /// The domain code, when the backend sent one.
    pub fn domain_code(&self) -> Option<&str> {
        match self {
            ApiError::Domain { code } => Some(code),
            _ => None,
        }
    }

    /// Whether retrying without changing input could help (transport-level
    /// failures). Domain rejections never qualify.
    pub fn is_transient(&self) -> bool {
        matches!(self, ApiError::Network { .. })
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Domain { code } => write!(f, "backend rejected: {code}"),
            ApiError::Http { status, message } => write!(f, "HTTP {status} - {message}"),
            ApiError::Network { message } => write!(f, "network error - {message}"),
            ApiError::Decode { message } => write!(f, "decode error - {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::decode(err.to_string())
        } else {
            ApiError::network(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_code_accessor() {
        let err = ApiError::domain("PRESET_IN_USE");
        assert_eq!(err.domain_code(), Some("PRESET_IN_USE"));
        assert_eq!(ApiError::http(500, "boom").domain_code(), None);
    }

    #[test]
    fn test_only_network_errors_are_transient() {
        assert!(ApiError::network("timeout").is_transient());
        assert!(!ApiError::domain("DUPLICATE_STATION").is_transient());
        assert!(!ApiError::http(404, "missing").is_transient());
        assert!(!ApiError::decode("bad json").is_transient());
    }

    #[test]
    fn test_display() {
        assert_eq!(
            ApiError::domain("ASSIGNMENT_EXISTS").to_string(),
            "backend rejected: ASSIGNMENT_EXISTS"
        );
        assert_eq!(
            ApiError::http(502, "bad gateway").to_string(),
            "HTTP 502 - bad gateway"
        );
    }
}
