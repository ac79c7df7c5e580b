//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A validated base URL for the CMS API.
///
/// This newtype ensures the URL is an absolute `http`/`https` origin and
/// normalizes it by stripping any trailing slash, so endpoint paths can be
/// appended directly.
///
/// # Accepted Formats
///
/// - `https://cms.example.com`
/// - `https://cms.example.com/` - trailing slash stripped
/// - `http://localhost:1337` - plain HTTP allowed for local development
///
/// # Example
///
/// ```rust
/// use strapi_api::BaseUrl;
///
/// let url = BaseUrl::new("https://cms.example.com/").unwrap();
/// assert_eq!(url.as_ref(), "https://cms.example.com");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseUrl(String);

impl BaseUrl {
    /// Creates a new validated base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyBaseUrl`] if the URL is empty, or
    /// [`ConfigError::InvalidBaseUrl`] if it lacks an `http`/`https` scheme
    /// or a host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        if url.is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }

        let rest = url
            .strip_prefix("https://")
            .or_else(|| url.strip_prefix("http://"))
            .ok_or_else(|| ConfigError::InvalidBaseUrl { url: url.clone() })?;

        let host = rest.split('/').next().unwrap_or_default();
        if host.is_empty() || host.contains(' ') {
            return Err(ConfigError::InvalidBaseUrl { url });
        }

        Ok(Self(url.trim_end_matches('/').to_string()))
    }

    /// Joins an endpoint path onto the base URL.
    ///
    /// A missing leading slash on the path is supplied automatically.
    ///
    /// # Example
    ///
    /// ```rust
    /// use strapi_api::BaseUrl;
    ///
    /// let url = BaseUrl::new("https://cms.example.com").unwrap();
    /// assert_eq!(url.join("api/products"), "https://cms.example.com/api/products");
    /// assert_eq!(url.join("/api/products"), "https://cms.example.com/api/products");
    /// ```
    #[must_use]
    pub fn join(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.0)
        } else {
            format!("{}/{path}", self.0)
        }
    }
}

impl AsRef<str> for BaseUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for BaseUrl {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for BaseUrl {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}

/// A validated static API token.
///
/// Strapi installations can issue long-lived API tokens for server-to-server
/// access. When configured, the token is attached as a bearer fallback to
/// requests that carry no user session token.
///
/// # Security
///
/// The `Debug` implementation masks the token value, displaying only
/// `ApiToken(*****)` instead of the actual token.
///
/// # Example
///
/// ```rust
/// use strapi_api::ApiToken;
///
/// let token = ApiToken::new("my-static-token").unwrap();
/// assert_eq!(format!("{token:?}"), "ApiToken(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ApiToken(String);

impl ApiToken {
    /// Creates a new validated API token.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyApiToken`] if the token is empty.
    pub fn new(token: impl Into<String>) -> Result<Self, ConfigError> {
        let token = token.into();
        if token.is_empty() {
            return Err(ConfigError::EmptyApiToken);
        }
        Ok(Self(token))
    }
}

impl AsRef<str> for ApiToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiToken(*****)")
    }
}

/// A validated locale tag.
///
/// Accepts simple BCP 47-style tags: groups of ASCII alphanumerics separated
/// by hyphens (e.g., `en`, `en-US`, `zh-Hant-TW`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Locale(String);

impl Locale {
    /// Creates a new validated locale tag.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidLocale`] if the tag is empty or contains
    /// characters outside `[A-Za-z0-9-]`.
    pub fn new(locale: impl Into<String>) -> Result<Self, ConfigError> {
        let locale = locale.into();
        let valid = !locale.is_empty()
            && !locale.starts_with('-')
            && !locale.ends_with('-')
            && locale.chars().all(|c| c.is_ascii_alphanumeric() || c == '-');
        if valid {
            Ok(Self(locale))
        } else {
            Err(ConfigError::InvalidLocale { locale })
        }
    }
}

impl AsRef<str> for Locale {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
