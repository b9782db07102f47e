//! Outgoing request description, independent of the HTTP library.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::error::ApiError;

pub const CONTENT_TYPE: &str = "Content-Type";
pub const JSON_CONTENT_TYPE: &str = "application/json;charset=UTF-8";
pub const AUTHORIZATION: &str = "Authorization";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Patch => "PATCH",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request as seen by interceptors and transports.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the base URL, or an absolute `http(s)://` URL.
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: BTreeMap<String, String>,
    pub body: Option<Value>,
}

impl ApiRequest {
    /// New request with the JSON content type header set.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert(CONTENT_TYPE.to_string(), JSON_CONTENT_TYPE.to_string());
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers,
            body: None,
        }
    }

    /// Builder method to attach a JSON body.
    pub fn with_body(mut self, body: &impl Serialize) -> Result<Self, ApiError> {
        let body = serde_json::to_value(body).map_err(|e| ApiError::Request(e.to_string()))?;
        self.body = Some(body);
        Ok(self)
    }

    /// Builder method to append query parameters from a serializable object.
    ///
    /// `()` and `None` add nothing. Strings are passed through, other scalars
    /// are rendered as JSON, null fields are skipped.
    pub fn with_params(mut self, params: &impl Serialize) -> Result<Self, ApiError> {
        let value = serde_json::to_value(params).map_err(|e| ApiError::Request(e.to_string()))?;
        match value {
            Value::Null => {}
            Value::Object(map) => {
                for (key, value) in map {
                    match value {
                        Value::Null => {}
                        Value::String(s) => self.query.push((key, s)),
                        other => self.query.push((key, other.to_string())),
                    }
                }
            }
            other => {
                return Err(ApiError::Request(format!(
                    "query parameters must be an object, got {other}"
                )))
            }
        }
        Ok(self)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.insert(name.into(), value.into());
    }

    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Join the path onto `base_url` unless it is already absolute.
    pub fn url(&self, base_url: &str) -> String {
        if self.path.starts_with("http://") || self.path.starts_with("https://") {
            return self.path.clone();
        }
        match (base_url.ends_with('/'), self.path.starts_with('/')) {
            (true, true) => format!("{}{}", base_url.trim_end_matches('/'), self.path),
            (false, false) if !base_url.is_empty() => format!("{base_url}/{}", self.path),
            _ => format!("{base_url}{}", self.path),
        }
    }
}
