//! HTTP-specific error types for the SDK.
//!
//! This module contains the normalized error taxonomy surfaced by the
//! transport. Raw `reqwest` errors never escape this layer; every failure
//! becomes a typed [`ApiError`] variant.
//!
//! # Error Handling
//!
//! The transport distinguishes four failure kinds plus a decode failure:
//!
//! - [`ApiError::Network`]: transport-level failure, no response received
//! - [`ApiError::Timeout`]: deadline exceeded or explicit abort
//! - [`ApiError::Http`]: non-JSON error response with a non-2xx status
//! - [`ApiError::Server`]: structured error reported in a JSON body
//! - [`ApiError::Decode`]: a response body that could not be deserialized
//!
//! # Example
//!
//! ```rust,ignore
//! match client.get::<ListEnvelope<Product>>("/api/products").await {
//!     Ok(envelope) => println!("{} products", envelope.items().len()),
//!     Err(ApiError::Timeout) => println!("request timed out"),
//!     Err(ApiError::Server(e)) => println!("{} ({})", e.message, e.code),
//!     Err(e) => println!("request failed: {e}"),
//! }
//! ```

use serde_json::{Map, Value};
use thiserror::Error;

/// A structured error reported by the backend in a JSON body.
///
/// Strapi wraps failures as `{"error": {"status", "name", "message",
/// "details"}}`; the transport maps `name` to [`code`](Self::code) and carries
/// `details` through untouched. Never mutated after creation.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("{message}")]
pub struct ServerError {
    /// The HTTP status code of the response.
    pub status: u16,
    /// The machine-readable error code (the backend's `error.name`).
    pub code: String,
    /// The human-readable error message.
    pub message: String,
    /// Additional structured details, if the backend provided any.
    pub details: Option<Map<String, Value>>,
}

/// Unified error type for all transport failures.
///
/// `ApiError` is `Clone` so the reactive bindings layer can hold it in
/// observable state while also handing it to error callbacks.
///
/// # Example
///
/// ```rust
/// use strapi_api::clients::ApiError;
///
/// let error = ApiError::network("connection refused");
/// assert_eq!(error.code(), "NETWORK_ERROR");
/// assert_eq!(error.status(), 0);
/// ```
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApiError {
    /// A transport-level failure where no response was received.
    #[error("Network error: {message}")]
    Network {
        /// Description of the underlying failure.
        message: String,
    },

    /// The request deadline elapsed, or the caller aborted the request.
    #[error("Request timed out. Please try again.")]
    Timeout,

    /// A non-2xx response whose body was not JSON.
    #[error("HTTP error: {status}")]
    Http {
        /// The HTTP status code of the response.
        status: u16,
        /// The raw response body text.
        body: String,
    },

    /// A successful response whose body could not be deserialized into the
    /// requested type.
    #[error("Failed to decode response: {message}")]
    Decode {
        /// Description of the deserialization failure.
        message: String,
    },

    /// A structured error reported by the backend.
    #[error(transparent)]
    Server(#[from] ServerError),
}

impl ApiError {
    /// Creates a [`ApiError::Network`] from a failure description.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Creates a [`ApiError::Decode`] from a failure description.
    #[must_use]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Maps a `reqwest` failure into the normalized taxonomy.
    ///
    /// Deadline failures inside the connector are folded into
    /// [`ApiError::Timeout`]; everything else is a network failure.
    #[must_use]
    pub fn from_reqwest(error: &reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout
        } else {
            Self::network(error.to_string())
        }
    }

    /// Normalizes a non-2xx JSON body into a [`ApiError::Server`].
    ///
    /// Uses the nested `error.name`/`error.message`/`error.details` shape when
    /// present, otherwise synthesizes a generic `UNKNOWN_ERROR`.
    #[must_use]
    pub fn from_error_body(status: u16, body: &Value) -> Self {
        let error = body.get("error");
        let code = error
            .and_then(|e| e.get("name"))
            .and_then(Value::as_str)
            .unwrap_or("UNKNOWN_ERROR");
        let message = error
            .and_then(|e| e.get("message"))
            .and_then(Value::as_str)
            .unwrap_or("An unknown error occurred");
        let details = error
            .and_then(|e| e.get("details"))
            .and_then(Value::as_object)
            .filter(|map| !map.is_empty())
            .cloned();

        Self::Server(ServerError {
            status,
            code: code.to_string(),
            message: message.to_string(),
            details,
        })
    }

    /// Returns the HTTP status associated with this error.
    ///
    /// Network failures report `0` (no response was received) and timeouts
    /// report `408`, mirroring the conventions of the web client this layer
    /// serves.
    #[must_use]
    pub const fn status(&self) -> u16 {
        match self {
            Self::Network { .. } | Self::Decode { .. } => 0,
            Self::Timeout => 408,
            Self::Http { status, .. } => *status,
            Self::Server(e) => e.status,
        }
    }

    /// Returns the machine-readable error code for this failure kind.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::Network { .. } => "NETWORK_ERROR",
            Self::Timeout => "TIMEOUT",
            Self::Http { .. } => "HTTP_ERROR",
            Self::Decode { .. } => "DECODE_ERROR",
            Self::Server(e) => &e.code,
        }
    }

    /// Returns the human-readable message for this failure.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Server(e) => e.message.clone(),
            other => other.to_string(),
        }
    }

    /// Returns `true` if this error is a structured server error with the
    /// given status code.
    #[must_use]
    pub fn is_status(&self, status: u16) -> bool {
        self.status() == status
    }
}
