//! # Response envelope
//!
//! Every API response body is wrapped as `{ "code": int, "data": T, "message": string }`.
//! [`ApiResponse::into_outcome`] turns the numeric `code` into an [`Outcome`],
//! and [`Outcome::into_result`] maps that onto `Result<T, ApiError>`.
//!
//! | `code` | Outcome |
//! |--------|---------|
//! | 0, 200 | `Success(data)` |
//! | 401 | `Unauthorized` |
//! | 403 | `Forbidden` |
//! | 404 | `NotFound` |
//! | 500 | `ServerError` |
//! | anything else | `Other` |

use serde::{Deserialize, Serialize};

use crate::error::{ApiError, FailureKind};

/// Server response envelope.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T = serde_json::Value> {
    pub code: i64,
    #[serde(default)]
    pub data: T,
    #[serde(default)]
    pub message: String,
}

/// Envelope decoded by `code`. Failure variants carry the server message.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome<T> {
    Success(T),
    Unauthorized(String),
    Forbidden(String),
    NotFound(String),
    ServerError(String),
    Other { code: i64, message: String },
}

impl<T> ApiResponse<T> {
    pub fn into_outcome(self) -> Outcome<T> {
        let ApiResponse { code, data, message } = self;
        match code {
            0 | 200 => Outcome::Success(data),
            401 => Outcome::Unauthorized(message),
            403 => Outcome::Forbidden(message),
            404 => Outcome::NotFound(message),
            500 => Outcome::ServerError(message),
            code => Outcome::Other { code, message },
        }
    }
}

impl<T> Outcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    /// Unwrap a success or build the rejection. An empty server message is
    /// replaced by a fallback for the outcome.
    pub fn into_result(self) -> Result<T, ApiError> {
        let (kind, code, message, fallback) = match self {
            Outcome::Success(data) => return Ok(data),
            Outcome::Unauthorized(message) => {
                (FailureKind::Unauthorized, 401, message, "unauthorized")
            }
            Outcome::Forbidden(message) => (FailureKind::Forbidden, 403, message, "forbidden"),
            Outcome::NotFound(message) => {
                (FailureKind::NotFound, 404, message, "resource not found")
            }
            Outcome::ServerError(message) => {
                (FailureKind::ServerError, 500, message, "server error")
            }
            Outcome::Other { code, message } => {
                (FailureKind::Unknown, code, message, "request failed")
            }
        };
        let message = if message.is_empty() {
            fallback.to_string()
        } else {
            message
        };
        Err(ApiError::Rejected {
            kind,
            code,
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn envelope(body: Value) -> ApiResponse {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_success_codes_unwrap_data() {
        for code in [0, 200] {
            let outcome = envelope(json!({"code": code, "data": {"a": 1}, "message": "ok"}))
                .into_outcome();
            assert_eq!(outcome.into_result(), Ok(json!({"a": 1})));
        }
    }

    #[test]
    fn test_missing_data_and_message_default() {
        let response = envelope(json!({"code": 0}));
        assert_eq!(response.data, Value::Null);
        assert_eq!(response.message, "");
    }

    #[test]
    fn test_failure_codes() {
        let cases = [
            (401, FailureKind::Unauthorized),
            (403, FailureKind::Forbidden),
            (404, FailureKind::NotFound),
            (500, FailureKind::ServerError),
            (1001, FailureKind::Unknown),
        ];
        for (code, kind) in cases {
            let err = envelope(json!({"code": code, "message": "nope"}))
                .into_outcome()
                .into_result()
                .unwrap_err();
            assert_eq!(
                err,
                ApiError::Rejected {
                    kind,
                    code,
                    message: "nope".into()
                }
            );
        }
    }

    #[test]
    fn test_empty_message_falls_back() {
        let err = envelope(json!({"code": 403, "message": ""}))
            .into_outcome()
            .into_result()
            .unwrap_err();
        assert_eq!(err.to_string(), "forbidden");

        let err = envelope(json!({"code": 7}))
            .into_outcome()
            .into_result()
            .unwrap_err();
        assert_eq!(err.to_string(), "request failed");
    }

    #[test]
    fn test_typed_payload() {
        #[derive(Debug, PartialEq, Deserialize, Default)]
        struct Profile {
            name: String,
        }
        let response: ApiResponse<Profile> =
            serde_json::from_value(json!({"code": 200, "data": {"name": "ada"}})).unwrap();
        let outcome = response.into_outcome();
        assert!(outcome.is_success());
        assert_eq!(outcome.into_result().unwrap(), Profile { name: "ada".into() });
    }
}
