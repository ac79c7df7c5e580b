//! Authentication for the SDK.
//!
//! This module provides the injected authentication state and the client for
//! the backend's auth plugin.
//!
//! # Overview
//!
//! - [`AuthContext`]: the shared token/user cell injected into the transport
//! - [`AuthClient`]: credential, OTP, and password flows plus `me`
//! - Request/response types for each flow ([`Credentials`], [`AuthResponse`],
//!   [`SendOtpRequest`], ...)
//!
//! # Design
//!
//! There is no ambient global session. The application creates an
//! [`AuthContext`], hands it to the transport at construction time, and the
//! auth flows write into that same context. Two clients built with two
//! contexts carry two fully independent sessions.
//!
//! # Example
//!
//! ```rust,ignore
//! use strapi_api::auth::{AuthClient, Credentials, SendOtpRequest, LoginWithOtpRequest};
//!
//! let auth = AuthClient::new(Arc::clone(&http), config.endpoints());
//!
//! // OTP flow
//! auth.send_otp(SendOtpRequest { phone: "+15550001".into() }).await?;
//! auth.login_with_otp(LoginWithOtpRequest {
//!     phone: "+15550001".into(),
//!     otp: "123456".into(),
//! })
//! .await?;
//!
//! let me = auth.me().await?;
//! ```

mod client;
mod context;
mod types;

pub use client::AuthClient;
pub use context::AuthContext;
pub use types::{
    AuthResponse, ChangePasswordRequest, Credentials, ForgotPasswordRequest, LoginWithOtpRequest,
    RegisterRequest, RegisterWithOtpRequest, RegisterWithOtpResponse, ResetPasswordRequest,
    SendOtpRequest, SendOtpResponse, UserInfo,
};
