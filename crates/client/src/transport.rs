//! The transport port: a fully-composed request in, a raw response out.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use mizan_core::Lang;

/// HTTP method subset the REST service uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

/// A request as composed by [`crate::ApiClient`]: path relative to the base
/// URL, with auth and language already decided.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the base URL, starting with `/`.
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    pub bearer: Option<String>,
    pub lang: Lang,
}

impl ApiRequest {
    /// First value for a query parameter, if present (test helper, mostly).
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Transport-level response: status plus the parsed JSON body.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: Value,
}

/// Transport failure (connection refused, DNS, timeout, non-JSON body).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("network error: {0}")]
    Network(String),

    #[error("response body was not JSON: {0}")]
    Body(String),
}

/// Port for executing composed requests.
///
/// Implementations: [`crate::HttpTransport`] (reqwest) for production,
/// [`crate::MockTransport`] for tests.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: ApiRequest) -> Result<RawResponse, TransportError>;
}
