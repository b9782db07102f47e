//! # Interceptor pipeline
//!
//! An ordered list of [`Interceptor`]s that every call passes through.
//!
//! | Phase | Hook | Order | Short-circuit |
//! |-------|------|-------|---------------|
//! | before send | [`on_request`](Interceptor::on_request) | first to last | an `Err` aborts the call |
//! | valid envelope received | [`on_response`](Interceptor::on_response) | first to last | none |
//! | any failure | [`on_error`](Interceptor::on_error) | first to last | [`Flow::Stop`] skips the rest |
//!
//! The error phase sees every failure the client produces: non-success
//! envelopes, non-2xx statuses, transport failures, and decode errors. The
//! error itself is never replaced, so the caller always receives what the
//! client produced.

use serde_json::Value;

use crate::envelope::ApiResponse;
use crate::error::ApiError;
use crate::request::ApiRequest;

/// Whether later error hooks still run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

/// One stage of the pipeline. All hooks default to pass-through.
pub trait Interceptor {
    fn name(&self) -> &'static str;

    fn on_request(&self, _request: &mut ApiRequest) -> Result<(), ApiError> {
        Ok(())
    }

    fn on_response(&self, _request: &ApiRequest, _response: &ApiResponse<Value>) {}

    fn on_error(&self, _request: &ApiRequest, _error: &ApiError) -> Flow {
        Flow::Continue
    }
}

#[derive(Default)]
pub struct Pipeline {
    interceptors: Vec<Box<dyn Interceptor>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to append an interceptor at the end.
    pub fn with(mut self, interceptor: impl Interceptor + 'static) -> Self {
        self.interceptors.push(Box::new(interceptor));
        self
    }

    /// Interceptor names in execution order.
    pub fn names(&self) -> Vec<&'static str> {
        self.interceptors.iter().map(|i| i.name()).collect()
    }

    pub fn run_request(&self, request: &mut ApiRequest) -> Result<(), ApiError> {
        for interceptor in &self.interceptors {
            interceptor.on_request(request)?;
        }
        Ok(())
    }

    pub fn run_response(&self, request: &ApiRequest, response: &ApiResponse<Value>) {
        for interceptor in &self.interceptors {
            interceptor.on_response(request, response);
        }
    }

    /// Run error hooks until one stops the chain. Returns the interceptor that
    /// stopped it, if any.
    pub fn run_error(&self, request: &ApiRequest, error: &ApiError) -> Option<&'static str> {
        for interceptor in &self.interceptors {
            if interceptor.on_error(request, error) == Flow::Stop {
                return Some(interceptor.name());
            }
        }
        None
    }
}
