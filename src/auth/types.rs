//! Request and response types for the authentication flows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered user as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    /// Numeric user id.
    pub id: u64,
    /// Display username.
    pub username: String,
    /// Account email address.
    pub email: String,
    /// Whether the account's email has been confirmed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmed: Option<bool>,
    /// Whether the account has been blocked by an administrator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocked: Option<bool>,
    /// Account creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Credentials for a local login.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    /// Username or email address.
    pub identifier: String,
    /// Account password.
    pub password: String,
}

impl Credentials {
    /// Creates credentials from an identifier and password.
    #[must_use]
    pub fn new(identifier: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            password: password.into(),
        }
    }
}

/// Input for registering a new account with local credentials.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    /// Desired username.
    pub username: String,
    /// Account email address.
    pub email: String,
    /// Account password.
    pub password: String,
}

/// A successful login or registration: the issued JWT plus the user record.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    /// The issued bearer token.
    pub jwt: String,
    /// The authenticated user.
    pub user: UserInfo,
}

/// Input for sending a one-time password.
#[derive(Debug, Clone, Serialize)]
pub struct SendOtpRequest {
    /// Phone number to deliver the OTP to.
    pub phone: String,
}

/// Outcome of an OTP send.
#[derive(Debug, Clone, Deserialize)]
pub struct SendOtpResponse {
    /// Whether the OTP was dispatched.
    pub success: bool,
    /// Human-readable status message.
    pub message: String,
}

/// Input for logging in with a previously sent OTP.
#[derive(Debug, Clone, Serialize)]
pub struct LoginWithOtpRequest {
    /// Phone number the OTP was sent to.
    pub phone: String,
    /// The one-time password.
    pub otp: String,
}

/// Input for registering a new account with a previously sent OTP.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterWithOtpRequest {
    /// Phone number the OTP was sent to.
    pub phone: String,
    /// The one-time password.
    pub otp: String,
    /// Optional desired username.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Optional account email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Optional first name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Optional last name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

/// A successful OTP registration. Unlike login, the backend returns the user
/// record under `data`.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterWithOtpResponse {
    /// The issued bearer token.
    pub jwt: String,
    /// The registered user.
    pub data: UserInfo,
}

/// Input for requesting a password-reset email.
#[derive(Debug, Clone, Serialize)]
pub struct ForgotPasswordRequest {
    /// Account email address.
    pub email: String,
}

/// Input for completing a password reset.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    /// The reset code from the email.
    pub code: String,
    /// The new password.
    pub password: String,
    /// Confirmation of the new password.
    pub password_confirmation: String,
}

/// Input for changing the current user's password.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    /// The current password.
    pub current_password: String,
    /// The new password.
    pub password: String,
    /// Confirmation of the new password.
    pub password_confirmation: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_info_deserializes_camel_case_timestamps() {
        let user: UserInfo = serde_json::from_value(json!({
            "id": 7,
            "username": "chai",
            "email": "chai@example.com",
            "confirmed": true,
            "createdAt": "2024-03-01T10:00:00Z",
            "updatedAt": "2024-03-02T10:00:00Z"
        }))
        .unwrap();

        assert_eq!(user.id, 7);
        assert_eq!(user.confirmed, Some(true));
        assert!(user.created_at.is_some());
        assert!(user.blocked.is_none());
    }

    #[test]
    fn test_register_with_otp_skips_absent_fields() {
        let request = RegisterWithOtpRequest {
            phone: "+15550001".to_string(),
            otp: "123456".to_string(),
            username: None,
            email: None,
            first_name: Some("Ada".to_string()),
            last_name: None,
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["phone"], "+15550001");
        assert_eq!(value["firstName"], "Ada");
        assert!(value.get("username").is_none());
        assert!(value.get("lastName").is_none());
    }

    #[test]
    fn test_reset_password_uses_camel_case() {
        let request = ResetPasswordRequest {
            code: "abc".to_string(),
            password: "new".to_string(),
            password_confirmation: "new".to_string(),
        };

        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("passwordConfirmation").is_some());
    }
}
