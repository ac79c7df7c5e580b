//! Top-level client facade.
//!
//! [`StrapiClient`] owns the wiring: it builds the transport from a
//! [`StrapiConfig`], injects a shared [`AuthContext`], and hands out
//! [`ResourceService`]s bound to the configured endpoint paths.

use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::auth::{AuthClient, AuthContext};
use crate::clients::HttpClient;
use crate::config::StrapiConfig;
use crate::rest::ResourceService;

/// The assembled SDK client.
///
/// Cheap to clone pieces out of: the transport and the auth context are
/// shared behind `Arc`s, and every [`ResourceService`] produced by this
/// facade shares them too.
///
/// # Example
///
/// ```rust,ignore
/// use strapi_api::{BaseUrl, StrapiClient, StrapiConfig};
///
/// let config = StrapiConfig::builder()
///     .base_url(BaseUrl::new("https://cms.example.com")?)
///     .build()?;
///
/// let client = StrapiClient::new(config);
///
/// // Configured resource families
/// let products = client.products::<Product>();
/// let categories = client.categories::<Category>();
///
/// // Any other collection
/// let testimonials = client.resource::<Testimonial>("/testimonials");
///
/// // Auth flows write into the same context the transport reads
/// client.auth_client().login(credentials).await?;
/// ```
#[derive(Debug)]
pub struct StrapiClient {
    config: StrapiConfig,
    http: Arc<HttpClient>,
    auth: Arc<AuthContext>,
}

impl StrapiClient {
    /// Creates a client with a fresh, anonymous [`AuthContext`].
    #[must_use]
    pub fn new(config: StrapiConfig) -> Self {
        Self::with_auth(config, AuthContext::shared())
    }

    /// Creates a client around an existing authentication context.
    ///
    /// Use this to share one session across several clients, or to inject a
    /// pre-populated context in tests.
    #[must_use]
    pub fn with_auth(config: StrapiConfig, auth: Arc<AuthContext>) -> Self {
        let http = Arc::new(HttpClient::new(&config, Arc::clone(&auth)));
        Self { config, http, auth }
    }

    /// Returns the configuration this client was built from.
    #[must_use]
    pub const fn config(&self) -> &StrapiConfig {
        &self.config
    }

    /// Returns the shared transport.
    #[must_use]
    pub fn http(&self) -> Arc<HttpClient> {
        Arc::clone(&self.http)
    }

    /// Returns the shared authentication context.
    #[must_use]
    pub fn auth(&self) -> Arc<AuthContext> {
        Arc::clone(&self.auth)
    }

    /// Returns a client for the authentication flows.
    #[must_use]
    pub fn auth_client(&self) -> AuthClient {
        AuthClient::new(self.http(), self.config.endpoints())
    }

    /// Returns a service bound to an arbitrary collection endpoint
    /// (e.g. `/testimonials`).
    ///
    /// The service inherits the configured default locale, if any.
    #[must_use]
    pub fn resource<T>(&self, endpoint: impl Into<String>) -> ResourceService<T>
    where
        T: DeserializeOwned + Send + Sync,
    {
        let mut service = ResourceService::new(self.http(), endpoint);
        if let Some(locale) = self.config.default_locale() {
            service = service.with_default_locale(locale.as_ref());
        }
        service
    }

    /// Returns a service bound to the configured products endpoint.
    #[must_use]
    pub fn products<T>(&self) -> ResourceService<T>
    where
        T: DeserializeOwned + Send + Sync,
    {
        self.resource(self.config.endpoints().products.clone())
    }

    /// Returns a service bound to the configured categories endpoint.
    #[must_use]
    pub fn categories<T>(&self) -> ResourceService<T>
    where
        T: DeserializeOwned + Send + Sync,
    {
        self.resource(self.config.endpoints().categories.clone())
    }

    /// Returns a service bound to the configured contact endpoint.
    #[must_use]
    pub fn contact<T>(&self) -> ResourceService<T>
    where
        T: DeserializeOwned + Send + Sync,
    {
        self.resource(self.config.endpoints().contact.clone())
    }
}
