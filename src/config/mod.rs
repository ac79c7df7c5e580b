//! Configuration types for the SDK.
//!
//! This module provides the core configuration types used to initialize
//! the SDK for communication with a Strapi-style CMS backend.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`StrapiConfig`]: The main configuration struct holding all SDK settings
//! - [`StrapiConfigBuilder`]: A builder for constructing [`StrapiConfig`] instances
//! - [`BaseUrl`]: A validated API origin
//! - [`ApiToken`]: A validated static API token with masked debug output
//! - [`Locale`]: A validated locale tag
//! - [`Endpoints`]: Named endpoint paths for each resource family
//!
//! # Example
//!
//! ```rust
//! use strapi_api::{StrapiConfig, BaseUrl};
//!
//! let config = StrapiConfig::builder()
//!     .base_url(BaseUrl::new("https://cms.example.com").unwrap())
//!     .build()
//!     .unwrap();
//! ```

mod endpoints;
mod newtypes;

pub use endpoints::{AuthEndpoints, ContentEndpoints, Endpoints, OtpEndpoints};
pub use newtypes::{ApiToken, BaseUrl, Locale};

use std::time::Duration;

use crate::error::ConfigError;

/// Default request deadline applied when neither the config nor the caller
/// overrides it.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the SDK.
///
/// This struct holds all configuration needed for SDK operations: the API
/// origin, an optional static API token, the default request deadline, the
/// default content locale, and the endpoint table.
///
/// # Thread Safety
///
/// `StrapiConfig` is `Clone`, `Send`, and `Sync`, making it safe to share
/// across threads and async tasks.
///
/// # Example
///
/// ```rust
/// use strapi_api::{StrapiConfig, BaseUrl, ApiToken};
/// use std::time::Duration;
///
/// let config = StrapiConfig::builder()
///     .base_url(BaseUrl::new("https://cms.example.com").unwrap())
///     .api_token(ApiToken::new("static-token").unwrap())
///     .timeout(Duration::from_secs(10))
///     .build()
///     .unwrap();
///
/// assert_eq!(config.timeout(), Duration::from_secs(10));
/// ```
#[derive(Clone, Debug)]
pub struct StrapiConfig {
    base_url: BaseUrl,
    api_token: Option<ApiToken>,
    timeout: Duration,
    default_locale: Option<Locale>,
    user_agent_prefix: Option<String>,
    endpoints: Endpoints,
}

impl StrapiConfig {
    /// Creates a new builder for constructing a `StrapiConfig`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use strapi_api::{StrapiConfig, BaseUrl};
    ///
    /// let config = StrapiConfig::builder()
    ///     .base_url(BaseUrl::new("https://cms.example.com").unwrap())
    ///     .build()
    ///     .unwrap();
    /// ```
    #[must_use]
    pub fn builder() -> StrapiConfigBuilder {
        StrapiConfigBuilder::new()
    }

    /// Returns the API origin.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the static API token, if configured.
    ///
    /// The transport attaches this as a bearer fallback when no user session
    /// token is present.
    #[must_use]
    pub const fn api_token(&self) -> Option<&ApiToken> {
        self.api_token.as_ref()
    }

    /// Returns the default request deadline.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the default content locale, if configured.
    #[must_use]
    pub const fn default_locale(&self) -> Option<&Locale> {
        self.default_locale.as_ref()
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the endpoint table.
    #[must_use]
    pub const fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }
}

// Verify StrapiConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<StrapiConfig>();
};

/// Builder for constructing [`StrapiConfig`] instances.
///
/// This builder provides a fluent API for configuring the SDK. The only
/// required field is `base_url`. All other fields have sensible defaults.
///
/// # Defaults
///
/// - `api_token`: `None` (anonymous access)
/// - `timeout`: 30 seconds
/// - `default_locale`: `None`
/// - `user_agent_prefix`: `None`
/// - `endpoints`: stock Strapi paths
///
/// # Example
///
/// ```rust
/// use strapi_api::{StrapiConfig, BaseUrl, Locale};
///
/// let config = StrapiConfig::builder()
///     .base_url(BaseUrl::new("https://cms.example.com").unwrap())
///     .default_locale(Locale::new("en").unwrap())
///     .user_agent_prefix("Storefront/2.0")
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Default)]
pub struct StrapiConfigBuilder {
    base_url: Option<BaseUrl>,
    api_token: Option<ApiToken>,
    timeout: Option<Duration>,
    default_locale: Option<Locale>,
    user_agent_prefix: Option<String>,
    endpoints: Option<Endpoints>,
}

impl StrapiConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API origin (required).
    #[must_use]
    pub fn base_url(mut self, base_url: BaseUrl) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// Sets a static API token used as a bearer fallback for requests that
    /// carry no user session token.
    #[must_use]
    pub fn api_token(mut self, token: ApiToken) -> Self {
        self.api_token = Some(token);
        self
    }

    /// Sets the default request deadline.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the default content locale applied by resource services when the
    /// caller does not specify one.
    #[must_use]
    pub fn default_locale(mut self, locale: Locale) -> Self {
        self.default_locale = Some(locale);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Overrides the endpoint table.
    #[must_use]
    pub fn endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = Some(endpoints);
        self
    }

    /// Builds the [`StrapiConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `base_url` is not set.
    pub fn build(self) -> Result<StrapiConfig, ConfigError> {
        let base_url = self
            .base_url
            .ok_or(ConfigError::MissingRequiredField { field: "base_url" })?;

        Ok(StrapiConfig {
            base_url,
            api_token: self.api_token,
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
            default_locale: self.default_locale,
            user_agent_prefix: self.user_agent_prefix,
            endpoints: self.endpoints.unwrap_or_default(),
        })
    }
}
