//! # Failure taxonomy
//!
//! Every failed call ends as an [`ApiError`]. Each error classifies into one
//! [`FailureKind`], which drives the side effects in the interceptor pipeline
//! (logging, and for [`FailureKind::Unauthorized`] session teardown plus a
//! redirect).
//!
//! | Variant | Origin | Kind |
//! |---------|--------|------|
//! | [`ApiError::Rejected`] | 2xx response whose envelope `code` is not a success | from `code` |
//! | [`ApiError::Status`] | non-2xx HTTP status | from status |
//! | [`ApiError::Network`] | request sent, no response | `NetworkError` |
//! | [`ApiError::Request`] | request could not be built or sent | `Unknown` |
//! | [`ApiError::Decode`] | body is not a valid envelope / payload | `Unknown` |

use std::fmt;

/// Classification of a failed call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FailureKind {
    BadRequest,
    Unauthorized,
    Forbidden,
    NotFound,
    ServerError,
    GatewayError,
    ServiceUnavailable,
    NetworkError,
    Unknown,
}

impl FailureKind {
    /// Classify a raw HTTP status of a failed response.
    pub fn from_status(status: u16) -> Self {
        match status {
            400 => FailureKind::BadRequest,
            401 => FailureKind::Unauthorized,
            403 => FailureKind::Forbidden,
            404 => FailureKind::NotFound,
            500 => FailureKind::ServerError,
            502 => FailureKind::GatewayError,
            503 => FailureKind::ServiceUnavailable,
            _ => FailureKind::Unknown,
        }
    }

    /// Message shown in the log for this kind of failure.
    pub fn user_message(self) -> &'static str {
        match self {
            FailureKind::BadRequest => "invalid request parameters",
            FailureKind::Unauthorized => "session expired, please log in again",
            FailureKind::Forbidden => "access denied",
            FailureKind::NotFound => "requested resource does not exist",
            FailureKind::ServerError => "server error, please try again later",
            FailureKind::GatewayError => "gateway error",
            FailureKind::ServiceUnavailable => "service unavailable",
            FailureKind::NetworkError => "network error, please check your connection",
            FailureKind::Unknown => "request failed",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FailureKind::BadRequest => "bad_request",
            FailureKind::Unauthorized => "unauthorized",
            FailureKind::Forbidden => "forbidden",
            FailureKind::NotFound => "not_found",
            FailureKind::ServerError => "server_error",
            FailureKind::GatewayError => "gateway_error",
            FailureKind::ServiceUnavailable => "service_unavailable",
            FailureKind::NetworkError => "network_error",
            FailureKind::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// Error returned by every [`crate::ApiClient`] call.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// The server answered with an envelope whose `code` is not a success.
    #[error("{message}")]
    Rejected {
        kind: FailureKind,
        code: i64,
        message: String,
    },
    /// The server answered with a non-2xx HTTP status.
    #[error("request failed with status code {status}")]
    Status {
        kind: FailureKind,
        status: u16,
        body: String,
    },
    #[error("no response received: {0}")]
    Network(String),
    #[error("request could not be sent: {0}")]
    Request(String),
    #[error("malformed response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ApiError::Rejected { kind, .. } | ApiError::Status { kind, .. } => *kind,
            ApiError::Network(_) => FailureKind::NetworkError,
            ApiError::Request(_) | ApiError::Decode(_) => FailureKind::Unknown,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.kind() == FailureKind::Unauthorized
    }

    /// HTTP status of the failed response, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert_eq!(FailureKind::from_status(400), FailureKind::BadRequest);
        assert_eq!(FailureKind::from_status(401), FailureKind::Unauthorized);
        assert_eq!(FailureKind::from_status(403), FailureKind::Forbidden);
        assert_eq!(FailureKind::from_status(404), FailureKind::NotFound);
        assert_eq!(FailureKind::from_status(500), FailureKind::ServerError);
        assert_eq!(FailureKind::from_status(502), FailureKind::GatewayError);
        assert_eq!(FailureKind::from_status(503), FailureKind::ServiceUnavailable);
        assert_eq!(FailureKind::from_status(418), FailureKind::Unknown);
        assert_eq!(FailureKind::from_status(504), FailureKind::Unknown);
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(ApiError::Network("timeout".into()).kind(), FailureKind::NetworkError);
        assert_eq!(ApiError::Decode("eof".into()).kind(), FailureKind::Unknown);
        let err = ApiError::Status {
            kind: FailureKind::ServiceUnavailable,
            status: 503,
            body: String::new(),
        };
        assert_eq!(err.status(), Some(503));
        assert_eq!(err.to_string(), "request failed with status code 503");
    }

    #[test]
    fn test_rejected_displays_server_message() {
        let err = ApiError::Rejected {
            kind: FailureKind::Forbidden,
            code: 403,
            message: "no access to project".into(),
        };
        assert_eq!(err.to_string(), "no access to project");
        assert!(!err.is_unauthorized());
    }
}
