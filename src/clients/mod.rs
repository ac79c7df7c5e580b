//! HTTP client types for CMS API communication.
//!
//! This module provides the transport layer: authenticated request dispatch,
//! deadline enforcement, error normalization, and the top-level
//! [`StrapiClient`] facade that wires configuration, authentication state,
//! and resource services together.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`HttpClient`]: the async transport for API communication
//! - [`HttpMethod`]: supported HTTP methods (GET, POST, PUT, PATCH, DELETE)
//! - [`RequestOptions`]: per-call overrides (timeout, headers, cancellation)
//! - [`ApiError`] / [`ServerError`]: the normalized failure taxonomy
//! - [`StrapiClient`]: facade producing resource services and the auth client
//!
//! # Example
//!
//! ```rust,ignore
//! use strapi_api::{BaseUrl, StrapiClient, StrapiConfig};
//!
//! let config = StrapiConfig::builder()
//!     .base_url(BaseUrl::new("https://cms.example.com")?)
//!     .build()?;
//!
//! let client = StrapiClient::new(config);
//! let products = client.products::<Product>();
//! let envelope = products.get_all(None).await?;
//! ```
//!
//! # Retry Behavior
//!
//! There is none. Every failure is surfaced once, as a typed [`ApiError`];
//! the caller decides whether to retry.

mod errors;
mod http_client;
mod http_request;
mod strapi;

pub use errors::{ApiError, ServerError};
pub use http_client::{HttpClient, SDK_VERSION};
pub use http_request::{HttpMethod, RequestOptions};
pub use strapi::StrapiClient;
