//! The typed API client.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::ApiConfig;
use crate::envelope::{Envelope, Paged};
use crate::error::{ApiError, ApiResult};
use crate::transport::{ApiRequest, Method, RawResponse, Transport, TransportError};

/// Source of the current bearer token.
///
/// Implemented by the session store; [`StaticToken`] and [`NoAuth`] cover
/// tests and the pre-login window.
pub trait TokenProvider: Send + Sync {
    fn token(&self) -> Option<String>;
}

/// Fixed token (tests, scripts).
pub struct StaticToken(pub String);

impl TokenProvider for StaticToken {
    fn token(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

/// No authentication (login endpoint, health checks).
pub struct NoAuth;

impl TokenProvider for NoAuth {
    fn token(&self) -> Option<String> {
        None
    }
}

/// Typed request wrapper over a [`Transport`].
///
/// Adds auth and language to every request, decodes the uniform envelope and
/// normalizes failures. Cloning is cheap; clones share the transport and
/// token provider.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    tokens: Arc<dyn TokenProvider>,
    config: ApiConfig,
}

impl ApiClient {
    pub fn new(
        transport: Arc<dyn Transport>,
        tokens: Arc<dyn TokenProvider>,
        config: ApiConfig,
    ) -> Self {
        Self {
            transport,
            tokens,
            config,
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ApiResult<T> {
        self.send(Method::Get, path, query, None).await
    }

    pub async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> ApiResult<T> {
        self.send(Method::Post, path, &[], Some(encode_body(body)?))
            .await
    }

    pub async fn put<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> ApiResult<T> {
        self.send(Method::Put, path, &[], Some(encode_body(body)?))
            .await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.send(Method::Delete, path, &[], None).await
    }

    /// Fetch one page of a list endpoint.
    pub async fn get_paged<T: DeserializeOwned>(
        &self,
        path: &str,
        page: u32,
        per_page: u32,
        extra_query: &[(&str, String)],
    ) -> ApiResult<Paged<T>> {
        let mut query: Vec<(&str, String)> = vec![
            ("page", page.to_string()),
            ("per_page", per_page.to_string()),
        ];
        query.extend(extra_query.iter().map(|(k, v)| (*k, v.clone())));
        self.get(path, &query).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<Value>,
    ) -> ApiResult<T> {
        let mut full_query: Vec<(String, String)> = query
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        full_query.push(("lang".to_string(), self.config.lang.as_str().to_string()));

        let request = ApiRequest {
            method,
            path: path.to_string(),
            query: full_query,
            body,
            bearer: self.tokens.token(),
            lang: self.config.lang,
        };

        tracing::debug!(method = method.as_str(), path, "api request");

        let response = self
            .transport
            .execute(request)
            .await
            .map_err(transport_error)?;

        decode_response(response)
    }
}

fn encode_body(body: &impl Serialize) -> ApiResult<Value> {
    serde_json::to_value(body).map_err(|e| ApiError::Decode(e.to_string()))
}

fn transport_error(err: TransportError) -> ApiError {
    match err {
        TransportError::Network(msg) => ApiError::Network(msg),
        TransportError::Body(msg) => ApiError::Decode(msg),
    }
}

fn decode_response<T: DeserializeOwned>(response: RawResponse) -> ApiResult<T> {
    let envelope: Envelope = serde_json::from_value(response.body)
        .map_err(|e| ApiError::Decode(e.to_string()))?;

    // Auth failures keep the envelope message but change category: the caller
    // reaction (re-login, not form fix-up) is different from validation.
    if matches!(response.status, 401 | 403) {
        let message = envelope
            .message
            .unwrap_or_else(|| "unauthorized".to_string());
        return Err(ApiError::Unauthorized(message));
    }

    envelope.into_result()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockTransport;
    use mizan_core::Lang;
    use serde_json::json;

    fn client_with(transport: Arc<MockTransport>, lang: Lang) -> ApiClient {
        ApiClient::new(
            transport,
            Arc::new(StaticToken("secret-token".to_string())),
            ApiConfig::default().with_lang(lang),
        )
    }

    #[tokio::test]
    async fn attaches_token_and_language_to_every_request() {
        let transport = Arc::new(MockTransport::new());
        transport.enqueue_data(json!(null));

        let client = client_with(transport.clone(), Lang::Ar);
        let _: () = client.get("/roles", &[]).await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.path, "/roles");
        assert_eq!(request.bearer.as_deref(), Some("secret-token"));
        assert_eq!(request.lang, Lang::Ar);
        assert_eq!(request.query_param("lang"), Some("ar"));
    }

    #[tokio::test]
    async fn paged_get_sends_pagination_params() {
        let transport = Arc::new(MockTransport::new());
        transport.enqueue_data(json!({ "data": [1, 2], "total": 2 }));

        let client = client_with(transport.clone(), Lang::En);
        let page: Paged<i64> = client
            .get_paged("/roles", 2, 50, &[("scope", "global".to_string())])
            .await
            .unwrap();

        assert_eq!(page.data, vec![1, 2]);
        let request = &transport.requests()[0];
        assert_eq!(request.query_param("page"), Some("2"));
        assert_eq!(request.query_param("per_page"), Some("50"));
        assert_eq!(request.query_param("scope"), Some("global"));
    }

    #[tokio::test]
    async fn rejection_envelope_maps_to_rejected() {
        let transport = Arc::new(MockTransport::new());
        transport.enqueue_rejection(
            "The given data was invalid.",
            json!({ "slug": ["The slug has already been taken."] }),
        );

        let client = client_with(transport, Lang::En);
        let err = client
            .post::<()>("/roles", &json!({ "name_en": "x" }))
            .await
            .unwrap_err();

        assert_eq!(
            err.field_error("slug"),
            Some("The slug has already been taken.")
        );
    }

    #[tokio::test]
    async fn auth_failure_maps_to_unauthorized() {
        let transport = Arc::new(MockTransport::new());
        transport.enqueue_raw(
            401,
            json!({ "success": false, "message": "Unauthenticated." }),
        );

        let client = client_with(transport, Lang::En);
        let err = client.get::<()>("/roles", &[]).await.unwrap_err();

        match err {
            ApiError::Unauthorized(message) => assert_eq!(message, "Unauthenticated."),
            other => panic!("expected Unauthorized, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn transport_failure_maps_to_network() {
        let transport = Arc::new(MockTransport::new());
        transport.enqueue_network_error("connection refused");

        let client = client_with(transport, Lang::En);
        let err = client.get::<()>("/roles", &[]).await.unwrap_err();

        assert!(err.is_retryable());
        match err {
            ApiError::Network(message) => assert!(message.contains("connection refused")),
            other => panic!("expected Network, got {other:?}"),
        }
    }
}
