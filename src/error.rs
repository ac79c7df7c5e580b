//! Error types for SDK configuration.
//!
//! This module contains error types used for configuration and validation
//! failures.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Error messages are designed to be clear and actionable.
//!
//! # Example
//!
//! ```rust
//! use strapi_api::{BaseUrl, ConfigError};
//!
//! let result = BaseUrl::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyBaseUrl)));
//! ```

use thiserror::Error;

/// Errors that can occur during SDK configuration.
///
/// This enum represents all possible errors that can occur when creating
/// or validating configuration types. Each variant provides a clear,
/// actionable error message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Base URL cannot be empty.
    #[error("Base URL cannot be empty. Please provide the origin of the CMS API.")]
    EmptyBaseUrl,

    /// Base URL is invalid.
    #[error("Invalid base URL '{url}'. Expected an absolute URL with scheme (e.g., 'https://cms.example.com').")]
    InvalidBaseUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// API token cannot be empty.
    #[error("API token cannot be empty. Omit it entirely for anonymous access.")]
    EmptyApiToken,

    /// Locale tag is invalid.
    #[error("Invalid locale tag '{locale}'. Expected a BCP 47-style tag (e.g., 'en' or 'en-US').")]
    InvalidLocale {
        /// The invalid locale tag that was provided.
        locale: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },
}
