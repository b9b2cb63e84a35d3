//! Scriptable transport for tests.
//!
//! Service tests enqueue responses and then assert on the requests the
//! client actually issued (order, path, query, body). Public rather than
//! `#[cfg(test)]` because every service crate's tests use it.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::transport::{ApiRequest, RawResponse, Transport, TransportError};

/// Records every request and replays scripted responses in order.
#[derive(Debug, Default)]
pub struct MockTransport {
    requests: Mutex<Vec<ApiRequest>>,
    responses: Mutex<VecDeque<Result<RawResponse, TransportError>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue a raw response with an explicit status.
    pub fn enqueue_raw(&self, status: u16, body: Value) {
        self.responses
            .lock()
            .expect("mock transport lock")
            .push_back(Ok(RawResponse { status, body }));
    }

    /// Enqueue a `success: true` envelope wrapping `data`.
    pub fn enqueue_data(&self, data: Value) {
        self.enqueue_raw(
            200,
            json!({ "success": true, "message": "ok", "data": data }),
        );
    }

    /// Enqueue a `success: false` envelope with optional field errors.
    pub fn enqueue_rejection(&self, message: &str, errors: Value) {
        self.enqueue_raw(
            422,
            json!({ "success": false, "message": message, "errors": errors }),
        );
    }

    /// Enqueue a transport-level failure.
    pub fn enqueue_network_error(&self, message: &str) {
        self.responses
            .lock()
            .expect("mock transport lock")
            .push_back(Err(TransportError::Network(message.to_string())));
    }

    /// All requests issued so far, in order.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().expect("mock transport lock").clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().expect("mock transport lock").len()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn execute(&self, request: ApiRequest) -> Result<RawResponse, TransportError> {
        self.requests
            .lock()
            .expect("mock transport lock")
            .push(request);

        self.responses
            .lock()
            .expect("mock transport lock")
            .pop_front()
            .unwrap_or_else(|| {
                Err(TransportError::Network(
                    "mock transport: no scripted response left".to_string(),
                ))
            })
    }
}
