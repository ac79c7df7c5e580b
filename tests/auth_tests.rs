//! Integration tests for the authentication flows.
//!
//! These tests verify that login and OTP flows store the issued session in
//! the injected context, that subsequent requests carry the token, and that
//! a 401 response invalidates the session.

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use strapi_api::auth::{Credentials, LoginWithOtpRequest, RegisterWithOtpRequest, SendOtpRequest};
use strapi_api::{BaseUrl, StrapiClient, StrapiConfig};

fn client_for(server: &MockServer) -> StrapiClient {
    let config = StrapiConfig::builder()
        .base_url(BaseUrl::new(server.uri()).unwrap())
        .build()
        .unwrap();
    StrapiClient::new(config)
}

fn user_json(id: u64, username: &str) -> serde_json::Value {
    json!({
        "id": id,
        "username": username,
        "email": format!("{username}@example.com"),
        "confirmed": true,
        "blocked": false
    })
}

// ============================================================================
// Credential Login
// ============================================================================

#[tokio::test]
async fn test_login_stores_session_in_context() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/local"))
        .and(body_json(json!({
            "identifier": "tea@example.com",
            "password": "hunter2"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jwt": "issued-jwt",
            "user": user_json(7, "tealover")
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let auth = client.auth_client();

    let response = auth
        .login(Credentials::new("tea@example.com", "hunter2"))
        .await
        .unwrap();

    assert_eq!(response.jwt, "issued-jwt");
    assert_eq!(response.user.username, "tealover");
    assert!(auth.is_authenticated());
    assert_eq!(client.auth().token().as_deref(), Some("issued-jwt"));
    assert_eq!(auth.current_user().unwrap().id, 7);
}

#[tokio::test]
async fn test_requests_after_login_carry_the_issued_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/local"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jwt": "issued-jwt",
            "user": user_json(7, "tealover")
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/users/me"))
        .and(header("authorization", "Bearer issued-jwt"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json(7, "tealover")))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let auth = client.auth_client();

    auth.login(Credentials::new("tea@example.com", "hunter2"))
        .await
        .unwrap();
    let me = auth.me().await.unwrap();

    assert_eq!(me.id, 7);
    assert_eq!(me.username, "tealover");
}

#[tokio::test]
async fn test_failed_login_leaves_context_anonymous() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/local"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {"status": 400, "name": "ValidationError", "message": "Invalid identifier or password"}
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let auth = client.auth_client();

    let error = auth
        .login(Credentials::new("tea@example.com", "wrong"))
        .await
        .unwrap_err();

    assert_eq!(error.code(), "ValidationError");
    assert!(!auth.is_authenticated());
}

#[tokio::test]
async fn test_logout_clears_session_locally() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/local"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jwt": "issued-jwt",
            "user": user_json(7, "tealover")
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let auth = client.auth_client();
    auth.login(Credentials::new("tea@example.com", "hunter2"))
        .await
        .unwrap();

    auth.logout();

    assert!(!auth.is_authenticated());
    assert!(auth.current_user().is_none());
    // Logout makes no server call.
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
}

// ============================================================================
// OTP Flows
// ============================================================================

#[tokio::test]
async fn test_send_otp_round_trip() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/send-otp"))
        .and(body_json(json!({"phone": "+15550001"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "OTP sent"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let response = client
        .auth_client()
        .send_otp(SendOtpRequest {
            phone: "+15550001".to_string(),
        })
        .await
        .unwrap();

    assert!(response.success);
    assert_eq!(response.message, "OTP sent");
}

#[tokio::test]
async fn test_login_with_otp_stores_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login-with-otp"))
        .and(body_json(json!({"phone": "+15550001", "otp": "123456"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jwt": "otp-jwt",
            "user": user_json(11, "phoneuser")
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let auth = client.auth_client();

    auth.login_with_otp(LoginWithOtpRequest {
        phone: "+15550001".to_string(),
        otp: "123456".to_string(),
    })
    .await
    .unwrap();

    assert!(auth.is_authenticated());
    assert_eq!(client.auth().token().as_deref(), Some("otp-jwt"));
}

#[tokio::test]
async fn test_register_with_otp_stores_session_from_data_key() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/register-with-otp"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jwt": "fresh-jwt",
            "data": user_json(12, "newuser")
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let auth = client.auth_client();

    let response = auth
        .register_with_otp(RegisterWithOtpRequest {
            phone: "+15550002".to_string(),
            otp: "654321".to_string(),
            username: Some("newuser".to_string()),
            email: None,
            first_name: None,
            last_name: None,
        })
        .await
        .unwrap();

    assert_eq!(response.data.username, "newuser");
    assert!(auth.is_authenticated());
    assert_eq!(auth.current_user().unwrap().id, 12);
}

// ============================================================================
// 401 Invalidation
// ============================================================================

#[tokio::test]
async fn test_expired_session_is_cleared_on_401() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/local"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jwt": "short-lived",
            "user": user_json(7, "tealover")
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/users/me"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {"status": 401, "name": "UnauthorizedError", "message": "Token expired"}
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let auth = client.auth_client();
    auth.login(Credentials::new("tea@example.com", "hunter2"))
        .await
        .unwrap();
    assert!(auth.is_authenticated());

    let error = auth.me().await.unwrap_err();

    assert_eq!(error.status(), 401);
    assert!(!auth.is_authenticated());
}
