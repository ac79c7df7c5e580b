//! HTTP client for CMS API communication.
//!
//! This module provides the [`HttpClient`] type: the transport layer that
//! performs one authenticated HTTP request and returns either a parsed
//! success payload or a normalized [`ApiError`].

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::auth::AuthContext;
use crate::clients::errors::ApiError;
use crate::clients::http_request::{HttpMethod, RequestOptions};
use crate::config::StrapiConfig;

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client for making requests to a Strapi-style CMS API.
///
/// The client handles:
/// - URL construction from the configured base origin
/// - Default headers including User-Agent and Accept
/// - Bearer attachment from the injected [`AuthContext`] (with an optional
///   static API-token fallback)
/// - Deadline enforcement and caller-supplied cancellation
/// - Error normalization into the [`ApiError`] taxonomy
///
/// There is no automatic retry; callers decide whether to retry.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use strapi_api::{AuthContext, BaseUrl, HttpClient, StrapiConfig};
///
/// let config = StrapiConfig::builder()
///     .base_url(BaseUrl::new("https://cms.example.com")?)
///     .build()?;
///
/// let client = HttpClient::new(&config, AuthContext::shared());
/// let home: serde_json::Value = client.get("/api/home").await?;
/// ```
#[derive(Debug)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// The configured API origin.
    base_url: crate::config::BaseUrl,
    /// Static API token used as a bearer fallback, if configured.
    api_token: Option<String>,
    /// Default request deadline.
    timeout: Duration,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
    /// The injected authentication state, read on every request.
    auth: Arc<AuthContext>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client from a configuration and an injected
    /// authentication context.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created. This should
    /// only happen in extremely unusual circumstances (e.g., TLS
    /// initialization failure).
    #[must_use]
    pub fn new(config: &StrapiConfig, auth: Arc<AuthContext>) -> Self {
        // Build User-Agent header
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let user_agent = format!("{user_agent_prefix}Strapi API Library v{SDK_VERSION} | Rust");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: config.base_url().clone(),
            api_token: config.api_token().map(|t| t.as_ref().to_string()),
            timeout: config.timeout(),
            default_headers,
            auth,
        }
    }

    /// Returns the configured API origin.
    #[must_use]
    pub const fn base_url(&self) -> &crate::config::BaseUrl {
        &self.base_url
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Returns the authentication context this client reads from.
    #[must_use]
    pub fn auth(&self) -> &Arc<AuthContext> {
        &self.auth
    }

    /// Sends a GET request and deserializes the response.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any transport or server failure.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(HttpMethod::Get, path, None, None).await
    }

    /// Sends a GET request with per-call options.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any transport or server failure.
    pub async fn get_with<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        self.request(HttpMethod::Get, path, None, Some(options)).await
    }

    /// Sends a POST request with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any transport or server failure.
    pub async fn post<T: DeserializeOwned>(&self, path: &str, body: Value) -> Result<T, ApiError> {
        self.request(HttpMethod::Post, path, Some(body), None).await
    }

    /// Sends a POST request with per-call options.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any transport or server failure.
    pub async fn post_with<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Value,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        self.request(HttpMethod::Post, path, Some(body), Some(options))
            .await
    }

    /// Sends a PUT request with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any transport or server failure.
    pub async fn put<T: DeserializeOwned>(&self, path: &str, body: Value) -> Result<T, ApiError> {
        self.request(HttpMethod::Put, path, Some(body), None).await
    }

    /// Sends a PUT request with per-call options.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any transport or server failure.
    pub async fn put_with<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Value,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        self.request(HttpMethod::Put, path, Some(body), Some(options))
            .await
    }

    /// Sends a PATCH request with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any transport or server failure.
    pub async fn patch<T: DeserializeOwned>(&self, path: &str, body: Value) -> Result<T, ApiError> {
        self.request(HttpMethod::Patch, path, Some(body), None).await
    }

    /// Sends a PATCH request with per-call options.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any transport or server failure.
    pub async fn patch_with<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Value,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        self.request(HttpMethod::Patch, path, Some(body), Some(options))
            .await
    }

    /// Sends a DELETE request.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any transport or server failure.
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(HttpMethod::Delete, path, None, None).await
    }

    /// Sends a DELETE request with per-call options.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any transport or server failure.
    pub async fn delete_with<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        self.request(HttpMethod::Delete, path, None, Some(options))
            .await
    }

    /// Sends an HTTP request and deserializes the response.
    ///
    /// The body is ignored for GET requests. Every request is bound to a
    /// deadline (the configured default unless overridden per call); on
    /// expiry the in-flight request is abandoned and the call fails with
    /// [`ApiError::Timeout`]. A caller-supplied cancellation token fails the
    /// call the same way.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Network`] if no response was received
    /// - [`ApiError::Timeout`] on deadline expiry or cancellation
    /// - [`ApiError::Http`] for non-JSON error responses
    /// - [`ApiError::Server`] for structured JSON error bodies
    /// - [`ApiError::Decode`] if a success payload fails to deserialize
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Value>,
        options: Option<RequestOptions>,
    ) -> Result<T, ApiError> {
        let options = options.unwrap_or_default();
        let url = self.base_url.join(path);

        tracing::debug!(%method, %url, "dispatching request");

        // Merge headers
        let mut headers = self.default_headers.clone();
        if let Some(token) = self.resolve_bearer(method) {
            headers.insert("Authorization".to_string(), format!("Bearer {token}"));
        }
        if body.is_some() && method.allows_body() {
            headers.insert("Content-Type".to_string(), "application/json".to_string());
        }
        if let Some(extra) = &options.extra_headers {
            for (key, value) in extra {
                headers.insert(key.clone(), value.clone());
            }
        }

        // Build the reqwest request
        let mut req_builder = match method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
            HttpMethod::Put => self.client.put(&url),
            HttpMethod::Patch => self.client.patch(&url),
            HttpMethod::Delete => self.client.delete(&url),
        };
        for (key, value) in &headers {
            req_builder = req_builder.header(key, value);
        }
        if let Some(body_value) = body.filter(|_| method.allows_body()) {
            req_builder = req_builder.body(body_value.to_string());
        }

        let deadline = options.timeout.unwrap_or(self.timeout);
        let response = self.send_bounded(req_builder, deadline, options.cancel.as_ref()).await?;

        self.parse_response(response).await
    }

    /// Uploads a file via multipart POST.
    ///
    /// The file lands in a `files` part; `extra_fields` are appended as
    /// stringified text parts (objects and arrays are JSON-encoded). A bearer
    /// token is attached if one exists. This path bypasses the JSON body
    /// handling entirely.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any transport or server failure.
    pub async fn upload_file<T: DeserializeOwned>(
        &self,
        path: &str,
        file_name: &str,
        bytes: Vec<u8>,
        extra_fields: Option<HashMap<String, Value>>,
    ) -> Result<T, ApiError> {
        let url = self.base_url.join(path);

        let mut form = reqwest::multipart::Form::new().part(
            "files",
            reqwest::multipart::Part::bytes(bytes).file_name(file_name.to_string()),
        );
        if let Some(fields) = extra_fields {
            for (key, value) in fields {
                if value.is_null() {
                    continue;
                }
                form = form.text(key, stringify_field(&value));
            }
        }

        let mut req_builder = self.client.post(&url).multipart(form);
        if let Some(token) = self.auth.token().or_else(|| self.api_token.clone()) {
            req_builder = req_builder.header("Authorization", format!("Bearer {token}"));
        }
        if let Some(user_agent) = self.default_headers.get("User-Agent") {
            req_builder = req_builder.header("User-Agent", user_agent);
        }

        let response = self.send_bounded(req_builder, self.timeout, None).await?;

        self.parse_response(response).await
    }

    /// Resolves the bearer token for a request, if any should be attached.
    ///
    /// A user token is attached when the method is non-GET, or when the
    /// context is authenticated (so anonymous GETs stay anonymous). When no
    /// user token exists, the configured static API token is used for any
    /// method.
    fn resolve_bearer(&self, method: HttpMethod) -> Option<String> {
        let include_user_token = method != HttpMethod::Get || self.auth.is_authenticated();
        if include_user_token {
            if let Some(token) = self.auth.token() {
                return Some(token);
            }
        }
        self.api_token.clone()
    }

    /// Drives a request to completion under a deadline and optional
    /// cancellation signal.
    async fn send_bounded(
        &self,
        req_builder: reqwest::RequestBuilder,
        deadline: Duration,
        cancel: Option<&tokio_util::sync::CancellationToken>,
    ) -> Result<reqwest::Response, ApiError> {
        let bounded = tokio::time::timeout(deadline, req_builder.send());

        let outcome = if let Some(token) = cancel {
            tokio::select! {
                () = token.cancelled() => return Err(ApiError::Timeout),
                outcome = bounded => outcome,
            }
        } else {
            bounded.await
        };

        let result = outcome.map_err(|_| ApiError::Timeout)?;
        result.map_err(|e| ApiError::from_reqwest(&e))
    }

    /// Parses a response into the requested type, normalizing failures.
    async fn parse_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = response.status().as_u16();
        let is_success = (200..300).contains(&status);
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        let text = response
            .text()
            .await
            .map_err(|e| ApiError::from_reqwest(&e))?;

        // Non-JSON responses: raw text on success, HTTP error otherwise.
        if !content_type.contains("application/json") {
            if !is_success {
                return Err(ApiError::Http { status, body: text });
            }
            return serde_json::from_value(Value::String(text))
                .map_err(|e| ApiError::decode(e.to_string()));
        }

        let value: Value = if text.is_empty() {
            Value::Object(serde_json::Map::new())
        } else {
            match serde_json::from_str(&text) {
                Ok(value) => value,
                Err(e) if is_success => return Err(ApiError::decode(e.to_string())),
                Err(_) => return Err(ApiError::Http { status, body: text }),
            }
        };

        if !is_success {
            if status == 401 {
                tracing::warn!("received 401, clearing authentication context");
                self.auth.clear();
            }
            return Err(ApiError::from_error_body(status, &value));
        }

        serde_json::from_value(value).map_err(|e| ApiError::decode(e.to_string()))
    }
}

/// Renders a JSON value as a multipart text field. Strings go through bare;
/// everything else is JSON-encoded.
fn stringify_field(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
