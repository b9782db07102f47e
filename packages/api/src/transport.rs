//! # Transport — the single network hop
//!
//! [`Transport`] sends one fully-intercepted [`ApiRequest`] and hands back the
//! raw status and body. It does no classification and no retries; everything
//! after the bytes arrive belongs to [`crate::ApiClient`].
//!
//! [`ReqwestTransport`] is the production implementation. Every request carries
//! the configured overall timeout, both natively and in the browser where
//! reqwest drives the Fetch API.

use std::future::Future;
use std::time::Duration;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::request::{ApiRequest, Method};

/// Status and body of a received response.
#[derive(Clone, Debug, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum TransportError {
    /// The request went out but nothing usable came back.
    #[error("{0}")]
    NoResponse(String),
    /// The request could not be built.
    #[error("{0}")]
    Build(String),
}

impl From<TransportError> for ApiError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::NoResponse(msg) => ApiError::Network(msg),
            TransportError::Build(msg) => ApiError::Request(msg),
        }
    }
}

/// Async interface for sending a request.
pub trait Transport {
    fn send(
        &self,
        request: &ApiRequest,
    ) -> impl Future<Output = Result<RawResponse, TransportError>>;
}

/// reqwest-backed transport.
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl ReqwestTransport {
    pub fn new(config: &ClientConfig) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| TransportError::Build(e.to_string()))?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            timeout: config.timeout(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

fn reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
        Method::Patch => reqwest::Method::PATCH,
    }
}

fn map_reqwest_error(err: reqwest::Error) -> TransportError {
    if err.is_builder() {
        TransportError::Build(err.to_string())
    } else {
        TransportError::NoResponse(err.to_string())
    }
}

impl Transport for ReqwestTransport {
    async fn send(&self, request: &ApiRequest) -> Result<RawResponse, TransportError> {
        let mut builder = self
            .client
            .request(reqwest_method(request.method), request.url(&self.base_url))
            .query(&request.query)
            .timeout(self.timeout);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(map_reqwest_error)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(map_reqwest_error)?;
        Ok(RawResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_response_success_range() {
        assert!(RawResponse::new(200, "").is_success());
        assert!(RawResponse::new(204, "").is_success());
        assert!(!RawResponse::new(304, "").is_success());
        assert!(!RawResponse::new(503, "").is_success());
    }

    #[test]
    fn test_transport_error_mapping() {
        assert_eq!(
            ApiError::from(TransportError::NoResponse("timed out".into())),
            ApiError::Network("timed out".into())
        );
        assert_eq!(
            ApiError::from(TransportError::Build("bad url".into())),
            ApiError::Request("bad url".into())
        );
    }

    #[test]
    fn test_reqwest_transport_keeps_base_url() {
        let transport = ReqwestTransport::new(&ClientConfig::new("https://api.example.com")).unwrap();
        assert_eq!(transport.base_url(), "https://api.example.com");
    }

    #[test]
    fn test_reqwest_transport_carries_configured_timeout() {
        let transport = ReqwestTransport::new(&ClientConfig::default()).unwrap();
        assert_eq!(transport.timeout(), Duration::from_millis(15_000));

        let config = ClientConfig::from_toml("timeout_ms = 2500").unwrap();
        let transport = ReqwestTransport::new(&config).unwrap();
        assert_eq!(transport.timeout(), Duration::from_millis(2500));
    }
}
