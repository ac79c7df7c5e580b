//! # Strapi API Rust SDK
//!
//! An async Rust client SDK for Strapi-style headless CMS REST backends,
//! providing type-safe configuration, a composable query builder, generic
//! resource services, authentication flows, and reactive state bindings.
//!
//! ## Overview
//!
//! This SDK provides four composable layers, leaves first:
//!
//! - **Transport** ([`clients::HttpClient`]): issues authenticated HTTP
//!   requests, enforces deadlines, and normalizes every failure into the
//!   typed [`ApiError`] taxonomy
//! - **Query Builder** ([`query::QueryBuilder`]): accumulates
//!   filter/sort/pagination/populate/field/locale intent and serializes it
//!   deterministically into the backend's bracket query dialect
//! - **Resource Service** ([`rest::ResourceService`]): generic CRUD over one
//!   named collection endpoint, built on the transport and the builder
//! - **Reactive Bindings** ([`bindings`]): observable loading/error/data
//!   state over async fetches, with lifecycle-safe teardown, polling, and
//!   list/infinite-scroll helpers
//!
//! ## Quick Start
//!
//! ```rust
//! use strapi_api::{BaseUrl, StrapiConfig};
//!
//! let config = StrapiConfig::builder()
//!     .base_url(BaseUrl::new("https://cms.example.com").unwrap())
//!     .build()
//!     .unwrap();
//! ```
//!
//! ## Fetching Content
//!
//! ```rust,ignore
//! use serde::Deserialize;
//! use strapi_api::{Populate, QueryOptions, StrapiClient};
//!
//! #[derive(Debug, Clone, Deserialize)]
//! struct Product {
//!     id: u64,
//!     name: String,
//!     slug: String,
//! }
//!
//! let client = StrapiClient::new(config);
//! let products = client.products::<Product>();
//!
//! // List with the service's default populate policy
//! let envelope = products.get_all(None).await?;
//!
//! // Query with explicit intent
//! let premium = products
//!     .get_all(Some(QueryOptions {
//!         populate: Some(Populate::relations(["category", "images"])),
//!         ..QueryOptions::default()
//!     }))
//!     .await?;
//!
//! // Single lookups
//! let one = products.get_by_id(42, None).await?;
//! let by_slug = products.get_by_slug("jasmine-pearl", None).await?;
//! ```
//!
//! ## Authentication
//!
//! Authentication state lives in an explicitly injected [`AuthContext`] -
//! there is no ambient global. Successful login/OTP flows store the issued
//! JWT there, and the transport reads it on every request. A 401 response
//! clears it.
//!
//! ```rust,ignore
//! use strapi_api::auth::{Credentials, SendOtpRequest, LoginWithOtpRequest};
//!
//! let auth = client.auth_client();
//!
//! // Credential login
//! auth.login(Credentials::new("tea@example.com", "hunter2")).await?;
//!
//! // Or the OTP flow
//! auth.send_otp(SendOtpRequest { phone: "+15550001".into() }).await?;
//! auth.login_with_otp(LoginWithOtpRequest {
//!     phone: "+15550001".into(),
//!     otp: "123456".into(),
//! })
//! .await?;
//! ```
//!
//! ## Reactive Bindings
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use strapi_api::bindings::QueryHandle;
//!
//! let products = Arc::new(client.products::<Product>());
//! let service = Arc::clone(&products);
//! let query = QueryHandle::new(move || {
//!     let service = Arc::clone(&service);
//!     async move { service.get_all(None).await }
//! });
//!
//! let mut rx = query.subscribe();
//! while rx.changed().await.is_ok() {
//!     let state = rx.borrow().clone();
//!     if state.is_error {
//!         eprintln!("failed: {:?}", state.error);
//!         break;
//!     }
//!     if let Some(envelope) = &state.data {
//!         println!("{} products", envelope.items().len());
//!         break;
//!     }
//! }
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: configuration and authentication are instance-based
//!   and passed explicitly
//! - **Fail-fast validation**: all configuration newtypes validate on
//!   construction
//! - **Typed failures**: raw transport errors never escape; every failure is
//!   an [`ApiError`] kind
//! - **Thread-safe**: all shared types are `Send + Sync`
//! - **Async-first**: designed for use with the Tokio runtime

pub mod auth;
pub mod bindings;
pub mod clients;
pub mod config;
pub mod error;
pub mod query;
pub mod rest;

// Re-export public types at crate root for convenience
pub use auth::{AuthClient, AuthContext, Credentials, UserInfo};
pub use clients::{
    ApiError, HttpClient, HttpMethod, RequestOptions, ServerError, StrapiClient, SDK_VERSION,
};
pub use config::{
    ApiToken, AuthEndpoints, BaseUrl, ContentEndpoints, Endpoints, Locale, OtpEndpoints,
    StrapiConfig, StrapiConfigBuilder, DEFAULT_TIMEOUT,
};
pub use error::ConfigError;
pub use query::{
    FilterCondition, FilterOperator, PaginationRequest, Populate, QueryBuilder, QueryOptions,
    SortDirection, SortOption,
};
pub use rest::{Envelope, ErrorInfo, ListEnvelope, Pagination, ResourceService, ResponseMeta};
