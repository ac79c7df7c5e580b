//! REST resource infrastructure.
//!
//! This module provides the pieces each domain resource is built from:
//!
//! - **[`Envelope<T>`] / [`ListEnvelope<T>`]**: the `{data, meta, error}`
//!   wrapper shape every backend response arrives in
//! - **[`Pagination`]**: the list-response pagination metadata
//! - **[`ResourceService<T>`]**: a generic CRUD client bound to one named
//!   collection endpoint
//!
//! # Example
//!
//! ```rust,ignore
//! use serde::Deserialize;
//! use strapi_api::rest::ResourceService;
//!
//! #[derive(Debug, Clone, Deserialize)]
//! struct Category {
//!     id: u64,
//!     name: String,
//!     slug: String,
//! }
//!
//! let categories: ResourceService<Category> = ResourceService::new(client, "/categories");
//! let active = categories.get_active(None).await?;
//! ```

mod envelope;
mod service;

pub use envelope::{Envelope, ErrorInfo, ListEnvelope, Pagination, ResponseMeta};
pub use service::ResourceService;
