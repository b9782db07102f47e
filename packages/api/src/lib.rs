//! # API crate — HTTP client for the web app
//!
//! Wraps an HTTP library behind an interceptor pipeline that injects the
//! session's bearer token, unwraps the `{code, data, message}` envelope,
//! classifies failures, and tears the session down when the server says it has
//! expired.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | `ClientConfig`: base URL, environment, timeout, login path |
//! | [`envelope`] | `ApiResponse` envelope and its `Outcome` |
//! | [`error`] | `ApiError` and the `FailureKind` taxonomy |
//! | [`request`] | `ApiRequest`, `Method`, header constants |
//! | [`pipeline`] | `Interceptor` trait and the ordered `Pipeline` |
//! | [`interceptors`] | bearer auth, cache busting, dev logging, auth-failure guard, failure logging |
//! | [`transport`] | `Transport` trait and the reqwest implementation |
//! | [`navigate`] | `Navigator` trait for the login redirect |
//! | [`client`] | `ApiClient` with the HTTP verbs |

pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod interceptors;
pub mod navigate;
pub mod pipeline;
pub mod request;
pub mod transport;

#[cfg(test)]
mod test_support;

pub use client::ApiClient;
pub use config::{AppEnv, ClientConfig, ConfigError};
pub use envelope::{ApiResponse, Outcome};
pub use error::{ApiError, FailureKind};
pub use interceptors::standard_pipeline;
pub use navigate::{BrowserNavigator, Navigator};
pub use pipeline::{Flow, Interceptor, Pipeline};
pub use request::{ApiRequest, Method};
pub use transport::{RawResponse, ReqwestTransport, Transport, TransportError};

pub use store::{SessionContext, UserInfo};
