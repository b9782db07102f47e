//! # API client
//!
//! [`ApiClient`] is the one entry point views use to talk to the backend. A call
//! goes through these steps:
//!
//! 1. Build an [`ApiRequest`] (JSON content type, params, body).
//! 2. Run the request hooks of the [`Pipeline`]. A rejection ends the call.
//! 3. Send it once through the [`Transport`]. No retries.
//! 4. Non-2xx status → [`ApiError::Status`]; no response → [`ApiError::Network`].
//! 5. Decode the [`ApiResponse`] envelope, run the response hooks, and match
//!    its [`Outcome`](crate::Outcome): success yields `data` decoded as `R`,
//!    anything else becomes [`ApiError::Rejected`].
//!
//! Every failure from steps 3–5 goes through the pipeline's error hooks
//! before being returned unchanged.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::envelope::ApiResponse;
use crate::error::{ApiError, FailureKind};
use crate::pipeline::Pipeline;
use crate::request::{ApiRequest, Method};
use crate::transport::{ReqwestTransport, Transport};

pub struct ApiClient<T = ReqwestTransport> {
    transport: T,
    pipeline: Pipeline,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T, pipeline: Pipeline) -> Self {
        Self {
            transport,
            pipeline,
        }
    }

    pub async fn get<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        self.execute(ApiRequest::new(Method::Get, path)).await
    }

    pub async fn get_with_params<R: DeserializeOwned>(
        &self,
        path: &str,
        params: &impl Serialize,
    ) -> Result<R, ApiError> {
        let request = ApiRequest::new(Method::Get, path).with_params(params)?;
        self.execute(request).await
    }

    pub async fn post<R: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<R, ApiError> {
        let request = ApiRequest::new(Method::Post, path).with_body(body)?;
        self.execute(request).await
    }

    pub async fn put<R: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<R, ApiError> {
        let request = ApiRequest::new(Method::Put, path).with_body(body)?;
        self.execute(request).await
    }

    pub async fn patch<R: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<R, ApiError> {
        let request = ApiRequest::new(Method::Patch, path).with_body(body)?;
        self.execute(request).await
    }

    pub async fn delete<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        self.execute(ApiRequest::new(Method::Delete, path)).await
    }

    pub async fn delete_with_params<R: DeserializeOwned>(
        &self,
        path: &str,
        params: &impl Serialize,
    ) -> Result<R, ApiError> {
        let request = ApiRequest::new(Method::Delete, path).with_params(params)?;
        self.execute(request).await
    }

    /// Run a prepared request through the pipeline and the transport.
    pub async fn execute<R: DeserializeOwned>(&self, mut request: ApiRequest) -> Result<R, ApiError> {
        if let Err(e) = self.pipeline.run_request(&mut request) {
            tracing::error!(url = %request.path, error = %e, "request rejected before sending");
            return Err(e);
        }

        let raw = match self.transport.send(&request).await {
            Ok(raw) => raw,
            Err(e) => return Err(self.fail(&request, e.into())),
        };

        if !raw.is_success() {
            let error = ApiError::Status {
                kind: FailureKind::from_status(raw.status),
                status: raw.status,
                body: raw.body,
            };
            return Err(self.fail(&request, error));
        }

        let envelope: ApiResponse<Value> = match serde_json::from_str(&raw.body) {
            Ok(envelope) => envelope,
            Err(e) => return Err(self.fail(&request, ApiError::Decode(e.to_string()))),
        };
        self.pipeline.run_response(&request, &envelope);

        let data = match envelope.into_outcome().into_result() {
            Ok(data) => data,
            Err(e) => return Err(self.fail(&request, e)),
        };
        serde_json::from_value(data).map_err(|e| self.fail(&request, ApiError::Decode(e.to_string())))
    }

    fn fail(&self, request: &ApiRequest, error: ApiError) -> ApiError {
        if let Some(stopped_by) = self.pipeline.run_error(request, &error) {
            tracing::debug!(url = %request.path, stopped_by, "error handling short-circuited");
        }
        error
    }
}
