//! Process-scoped authentication state.
//!
//! [`AuthContext`] is the single shared, mutable resource in the SDK: a
//! value cell holding the current bearer token and user record. It is created
//! by the application and injected into the transport at construction time
//! rather than living in ambient global state, so two clients can carry two
//! independent sessions.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::auth::UserInfo;

#[derive(Debug, Default)]
struct SessionState {
    token: Option<String>,
    user: Option<UserInfo>,
}

/// A shared cell holding the current authentication session.
///
/// The cell has two states: absent (anonymous) and present (authenticated).
/// It is written by login/OTP flows, cleared by logout or by the transport on
/// a 401 response, and read on every outgoing request.
///
/// Writes are last-write-wins; the lock only guards torn reads.
///
/// # Example
///
/// ```rust
/// use strapi_api::auth::AuthContext;
///
/// let auth = AuthContext::new();
/// assert!(!auth.is_authenticated());
///
/// auth.set_token("jwt-token");
/// assert_eq!(auth.token().as_deref(), Some("jwt-token"));
///
/// auth.clear();
/// assert!(!auth.is_authenticated());
/// ```
#[derive(Debug, Default)]
pub struct AuthContext {
    state: RwLock<SessionState>,
}

impl AuthContext {
    /// Creates an anonymous context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an anonymous context already wrapped for sharing.
    #[must_use]
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    fn read(&self) -> RwLockReadGuard<'_, SessionState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the current bearer token, if one is set.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.read().token.clone()
    }

    /// Returns `true` if a bearer token is present.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.read().token.is_some()
    }

    /// Returns the current user record, if one is set.
    #[must_use]
    pub fn current_user(&self) -> Option<UserInfo> {
        self.read().user.clone()
    }

    /// Stores a bearer token without user information.
    pub fn set_token(&self, token: impl Into<String>) {
        self.write().token = Some(token.into());
    }

    /// Stores a bearer token together with the authenticated user.
    pub fn set_session(&self, token: impl Into<String>, user: UserInfo) {
        let mut state = self.write();
        state.token = Some(token.into());
        state.user = Some(user);
    }

    /// Clears the token and user, returning the context to anonymous.
    pub fn clear(&self) {
        let mut state = self.write();
        state.token = None;
        state.user = None;
    }
}

// Verify AuthContext is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<AuthContext>();
};
