//! `mizan-client` — typed REST client for the console services.
//!
//! Every remote call in the workspace goes through [`ApiClient`]: it attaches
//! the bearer token and language (header + query parameter), speaks the
//! uniform `{success, message, data, errors?}` envelope, and normalizes
//! failures into the [`ApiError`] taxonomy. Nothing here panics across the
//! boundary — callers always get a `Result` to branch on.
//!
//! The HTTP layer itself is behind the [`Transport`] port so service tests
//! can script responses and assert on issued requests without a server.

pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod http;
pub mod mock;
pub mod transport;

pub use client::{ApiClient, NoAuth, StaticToken, TokenProvider};
pub use config::ApiConfig;
pub use envelope::{Envelope, Paged};
pub use error::{ApiError, ApiResult};
pub use http::HttpTransport;
pub use mock::MockTransport;
pub use transport::{ApiRequest, Method, RawResponse, Transport, TransportError};
