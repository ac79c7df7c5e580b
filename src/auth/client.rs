//! Authentication flows.
//!
//! [`AuthClient`] wraps the backend's auth plugin endpoints: credential
//! login/registration, the OTP flows, the password flows, and the
//! authenticated `me` lookup. Successful flows store the issued JWT and user
//! record in the transport's [`AuthContext`], so subsequent requests are
//! authenticated automatically.

use std::sync::Arc;

use serde_json::Value;

use crate::auth::context::AuthContext;
use crate::auth::types::{
    AuthResponse, ChangePasswordRequest, Credentials, ForgotPasswordRequest, LoginWithOtpRequest,
    RegisterRequest, RegisterWithOtpRequest, RegisterWithOtpResponse, ResetPasswordRequest,
    SendOtpRequest, SendOtpResponse, UserInfo,
};
use crate::clients::{ApiError, HttpClient};
use crate::config::{AuthEndpoints, Endpoints, OtpEndpoints};

fn to_body<S: serde::Serialize>(input: &S) -> Result<Value, ApiError> {
    serde_json::to_value(input)
        .map_err(|e| ApiError::decode(format!("Failed to serialize input: {e}")))
}

/// Client for the authentication endpoints.
///
/// # Example
///
/// ```rust,ignore
/// use strapi_api::auth::{AuthClient, Credentials};
///
/// let auth = AuthClient::new(Arc::clone(&http), config.endpoints());
/// let session = auth.login(Credentials::new("tea@example.com", "hunter2")).await?;
/// assert!(auth.is_authenticated());
/// println!("logged in as {}", session.user.username);
/// ```
#[derive(Debug)]
pub struct AuthClient {
    http: Arc<HttpClient>,
    auth: AuthEndpoints,
    otp: OtpEndpoints,
    me_path: String,
}

impl AuthClient {
    /// Creates an auth client over the given transport and endpoint table.
    #[must_use]
    pub fn new(http: Arc<HttpClient>, endpoints: &Endpoints) -> Self {
        Self {
            http,
            auth: endpoints.auth.clone(),
            otp: endpoints.otp.clone(),
            me_path: endpoints.me.clone(),
        }
    }

    fn context(&self) -> &Arc<AuthContext> {
        self.http.auth()
    }

    /// Returns `true` if a session token is currently stored.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.context().is_authenticated()
    }

    /// Returns the locally stored user record, if any.
    #[must_use]
    pub fn current_user(&self) -> Option<UserInfo> {
        self.context().current_user()
    }

    /// Logs in with local credentials and stores the issued session.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any transport or server failure, including
    /// structured invalid-credential errors.
    pub async fn login(&self, credentials: Credentials) -> Result<AuthResponse, ApiError> {
        let response: AuthResponse = self
            .http
            .post(&self.auth.login, to_body(&credentials)?)
            .await?;

        self.context()
            .set_session(response.jwt.clone(), response.user.clone());
        Ok(response)
    }

    /// Registers a new account and stores the issued session.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any transport or server failure.
    pub async fn register(&self, input: RegisterRequest) -> Result<AuthResponse, ApiError> {
        let response: AuthResponse = self
            .http
            .post(&self.auth.register, to_body(&input)?)
            .await?;

        self.context()
            .set_session(response.jwt.clone(), response.user.clone());
        Ok(response)
    }

    /// Clears the stored session. Local only; no server call is made.
    pub fn logout(&self) {
        self.context().clear();
    }

    /// Sends a one-time password to a phone number.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any transport or server failure.
    pub async fn send_otp(&self, input: SendOtpRequest) -> Result<SendOtpResponse, ApiError> {
        self.http.post(&self.otp.send, to_body(&input)?).await
    }

    /// Logs in with a previously sent OTP and stores the issued session.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any transport or server failure.
    pub async fn login_with_otp(
        &self,
        input: LoginWithOtpRequest,
    ) -> Result<AuthResponse, ApiError> {
        let response: AuthResponse = self.http.post(&self.otp.login, to_body(&input)?).await?;

        self.context()
            .set_session(response.jwt.clone(), response.user.clone());
        Ok(response)
    }

    /// Registers a new account with a previously sent OTP and stores the
    /// issued session.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any transport or server failure.
    pub async fn register_with_otp(
        &self,
        input: RegisterWithOtpRequest,
    ) -> Result<RegisterWithOtpResponse, ApiError> {
        let response: RegisterWithOtpResponse =
            self.http.post(&self.otp.register, to_body(&input)?).await?;

        self.context()
            .set_session(response.jwt.clone(), response.data.clone());
        Ok(response)
    }

    /// Requests a password-reset email.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any transport or server failure.
    pub async fn forgot_password(&self, email: impl Into<String>) -> Result<Value, ApiError> {
        let input = ForgotPasswordRequest { email: email.into() };
        self.http
            .post(&self.auth.forgot_password, to_body(&input)?)
            .await
    }

    /// Completes a password reset with the emailed code and stores the fresh
    /// session the backend issues.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any transport or server failure.
    pub async fn reset_password(
        &self,
        input: ResetPasswordRequest,
    ) -> Result<AuthResponse, ApiError> {
        let response: AuthResponse = self
            .http
            .post(&self.auth.reset_password, to_body(&input)?)
            .await?;

        self.context()
            .set_session(response.jwt.clone(), response.user.clone());
        Ok(response)
    }

    /// Changes the current user's password. Requires an authenticated
    /// session; the backend rotates the JWT, which is stored in its place.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any transport or server failure.
    pub async fn change_password(
        &self,
        input: ChangePasswordRequest,
    ) -> Result<AuthResponse, ApiError> {
        let response: AuthResponse = self
            .http
            .post(&self.auth.change_password, to_body(&input)?)
            .await?;

        self.context()
            .set_session(response.jwt.clone(), response.user.clone());
        Ok(response)
    }

    /// Fetches the authenticated user's own record from the backend.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any transport or server failure, including a
    /// 401 when no valid session exists (which also clears the context).
    pub async fn me(&self) -> Result<UserInfo, ApiError> {
        self.http.get(&self.me_path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BaseUrl, StrapiConfig};

    fn test_client() -> AuthClient {
        let config = StrapiConfig::builder()
            .base_url(BaseUrl::new("https://cms.example.com").unwrap())
            .build()
            .unwrap();
        let http = Arc::new(HttpClient::new(&config, AuthContext::shared()));
        AuthClient::new(http, config.endpoints())
    }

    #[test]
    fn test_new_client_is_anonymous() {
        let client = test_client();
        assert!(!client.is_authenticated());
        assert!(client.current_user().is_none());
    }

    #[test]
    fn test_logout_clears_context() {
        let client = test_client();
        client.context().set_token("jwt");
        assert!(client.is_authenticated());

        client.logout();
        assert!(!client.is_authenticated());
    }

    #[test]
    fn test_endpoints_are_taken_from_config() {
        let client = test_client();
        assert_eq!(client.auth.login, "/api/auth/local");
        assert_eq!(client.otp.send, "/api/auth/send-otp");
        assert_eq!(client.me_path, "/api/users/me");
    }
}
