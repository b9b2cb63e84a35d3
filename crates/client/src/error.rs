//! Client-side failure taxonomy.

use std::collections::BTreeMap;

use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

/// Normalized API failure.
///
/// The taxonomy mirrors how callers react:
/// - [`ApiError::Network`] — transport-level failure; the user may re-trigger
///   the action, the client never auto-retries.
/// - [`ApiError::Unauthorized`] — the server refused the credentials or the
///   action; no retry.
/// - [`ApiError::Rejected`] — the server validated and said no; field errors
///   are surfaced verbatim (first message per field), no retry.
/// - [`ApiError::Decode`] — the response did not match the expected shape.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("{message}")]
    Rejected {
        message: String,
        /// First server-supplied message per rejected field.
        fields: BTreeMap<String, String>,
    },

    #[error("unexpected response shape: {0}")]
    Decode(String),
}

impl ApiError {
    /// The message for a specific rejected field, if the server named it.
    pub fn field_error(&self, field: &str) -> Option<&str> {
        match self {
            Self::Rejected { fields, .. } => fields.get(field).map(String::as_str),
            _ => None,
        }
    }

    /// Whether re-triggering the same action could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}
