//! # Standard interceptors
//!
//! | Interceptor | Phase | Effect |
//! |-------------|-------|--------|
//! | [`BearerAuth`] | request | `Authorization: Bearer <token>` when the session holds a token |
//! | [`CacheBuster`] | request | appends `_t=<millis>` to GET requests |
//! | [`DevLogger`] | request, response | debug-logs traffic in the development environment |
//! | [`AuthFailureGuard`] | error | on `Unauthorized`: clear session, navigate to login, stop |
//! | [`FailureLogger`] | error | logs the failure with its user-facing message |
//!
//! [`standard_pipeline`] assembles them in the order above.

use std::cell::Cell;

use serde_json::Value;
use store::{KeyValueStorage, SessionContext};

use crate::config::{AppEnv, ClientConfig};
use crate::envelope::ApiResponse;
use crate::error::{ApiError, FailureKind};
use crate::navigate::Navigator;
use crate::pipeline::{Flow, Interceptor, Pipeline};
use crate::request::{ApiRequest, Method, AUTHORIZATION};

/// Query parameter carrying the cache-busting timestamp.
pub const CACHE_BUST_PARAM: &str = "_t";

/// Build the default pipeline for a session.
pub fn standard_pipeline<S, N>(
    config: &ClientConfig,
    session: SessionContext<S>,
    navigator: N,
) -> Pipeline
where
    S: KeyValueStorage + 'static,
    N: Navigator + 'static,
{
    Pipeline::new()
        .with(BearerAuth::new(session.clone()))
        .with(CacheBuster::new())
        .with(DevLogger::new(config.env))
        .with(AuthFailureGuard::new(session, navigator, config.login_path.clone()))
        .with(FailureLogger)
}

pub struct BearerAuth<S> {
    session: SessionContext<S>,
}

impl<S: KeyValueStorage> BearerAuth<S> {
    pub fn new(session: SessionContext<S>) -> Self {
        Self { session }
    }
}

impl<S: KeyValueStorage> Interceptor for BearerAuth<S> {
    fn name(&self) -> &'static str {
        "bearer_auth"
    }

    fn on_request(&self, request: &mut ApiRequest) -> Result<(), ApiError> {
        if let Some(token) = self.session.token() {
            request.set_header(AUTHORIZATION, format!("Bearer {token}"));
        }
        Ok(())
    }
}

/// Stamps GET requests with a strictly increasing millisecond timestamp.
#[derive(Debug, Default)]
pub struct CacheBuster {
    last: Cell<u64>,
}

impl CacheBuster {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_stamp(&self) -> u64 {
        let stamp = now_millis().max(self.last.get() + 1);
        self.last.set(stamp);
        stamp
    }
}

impl Interceptor for CacheBuster {
    fn name(&self) -> &'static str {
        "cache_buster"
    }

    fn on_request(&self, request: &mut ApiRequest) -> Result<(), ApiError> {
        if request.method == Method::Get {
            request
                .query
                .retain(|(key, _)| key != CACHE_BUST_PARAM);
            request
                .query
                .push((CACHE_BUST_PARAM.to_string(), self.next_stamp().to_string()));
        }
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
fn now_millis() -> u64 {
    js_sys::Date::now() as u64
}

#[cfg(not(target_arch = "wasm32"))]
fn now_millis() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[derive(Debug, Clone, Copy)]
pub struct DevLogger {
    enabled: bool,
}

impl DevLogger {
    pub fn new(env: AppEnv) -> Self {
        Self {
            enabled: env.is_development(),
        }
    }
}

impl Interceptor for DevLogger {
    fn name(&self) -> &'static str {
        "dev_logger"
    }

    fn on_request(&self, request: &mut ApiRequest) -> Result<(), ApiError> {
        if self.enabled {
            tracing::debug!(
                url = %request.path,
                method = %request.method,
                params = ?request.query,
                data = ?request.body,
                "request"
            );
        }
        Ok(())
    }

    fn on_response(&self, request: &ApiRequest, response: &ApiResponse<Value>) {
        if self.enabled {
            tracing::debug!(
                url = %request.path,
                code = response.code,
                data = %response.data,
                "response"
            );
        }
    }
}

/// Tears the session down when the server reports it as unauthorized.
pub struct AuthFailureGuard<S, N> {
    session: SessionContext<S>,
    navigator: N,
    login_path: String,
}

impl<S: KeyValueStorage, N: Navigator> AuthFailureGuard<S, N> {
    pub fn new(session: SessionContext<S>, navigator: N, login_path: impl Into<String>) -> Self {
        Self {
            session,
            navigator,
            login_path: login_path.into(),
        }
    }
}

impl<S: KeyValueStorage, N: Navigator> Interceptor for AuthFailureGuard<S, N> {
    fn name(&self) -> &'static str {
        "auth_failure_guard"
    }

    fn on_error(&self, request: &ApiRequest, error: &ApiError) -> Flow {
        if !error.is_unauthorized() {
            return Flow::Continue;
        }
        tracing::error!(
            url = %request.path,
            error = %error,
            "{}",
            FailureKind::Unauthorized.user_message()
        );
        self.session.clear();
        self.navigator.navigate(&self.login_path);
        Flow::Stop
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FailureLogger;

impl Interceptor for FailureLogger {
    fn name(&self) -> &'static str {
        "failure_logger"
    }

    fn on_error(&self, request: &ApiRequest, error: &ApiError) -> Flow {
        let kind = error.kind();
        match error {
            // The server already explained itself; prefer its message.
            ApiError::Rejected { code, message, .. } => {
                tracing::error!(url = %request.path, code, %kind, "{message}");
            }
            ApiError::Status { status, .. } => {
                tracing::error!(url = %request.path, status, %kind, "{}", kind.user_message());
            }
            ApiError::Network(_) | ApiError::Request(_) | ApiError::Decode(_) => {
                tracing::error!(url = %request.path, error = %error, %kind, "{}", kind.user_message());
            }
        }
        Flow::Continue
    }
}
