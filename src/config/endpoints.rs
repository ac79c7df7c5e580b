//! Named endpoint paths for each resource family.
//!
//! A Strapi backend exposes its content types and auth plugin under
//! conventional `/api/...` paths. The defaults here match a stock
//! installation; every path can be overridden for backends that remap routes.

/// Authentication endpoint paths (local credentials plugin).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthEndpoints {
    /// Credential login.
    pub login: String,
    /// New account registration.
    pub register: String,
    /// Request a password-reset email.
    pub forgot_password: String,
    /// Complete a password reset with the emailed code.
    pub reset_password: String,
    /// Change the current user's password.
    pub change_password: String,
}

impl Default for AuthEndpoints {
    fn default() -> Self {
        Self {
            login: "/api/auth/local".to_string(),
            register: "/api/auth/local/register".to_string(),
            forgot_password: "/api/auth/forgot-password".to_string(),
            reset_password: "/api/auth/reset-password".to_string(),
            change_password: "/api/auth/change-password".to_string(),
        }
    }
}

/// One-time-password endpoint paths.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OtpEndpoints {
    /// Send an OTP to a phone number.
    pub send: String,
    /// Log in with a previously sent OTP.
    pub login: String,
    /// Register a new account with a previously sent OTP.
    pub register: String,
}

impl Default for OtpEndpoints {
    fn default() -> Self {
        Self {
            send: "/api/auth/send-otp".to_string(),
            login: "/api/auth/login-with-otp".to_string(),
            register: "/api/auth/register-with-otp".to_string(),
        }
    }
}

/// Marketing-content endpoint paths (single types and small collections).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContentEndpoints {
    /// Home page single type.
    pub home: String,
    /// Hero slide collection.
    pub hero_slides: String,
    /// Featured product collection.
    pub featured_products: String,
    /// Testimonial collection.
    pub testimonials: String,
    /// Blog post collection.
    pub blog_posts: String,
}

impl Default for ContentEndpoints {
    fn default() -> Self {
        Self {
            home: "/home".to_string(),
            hero_slides: "/hero-slides".to_string(),
            featured_products: "/featured-products".to_string(),
            testimonials: "/testimonials".to_string(),
            blog_posts: "/blog-posts".to_string(),
        }
    }
}

/// The full endpoint table for a backend.
///
/// Collection endpoints (`products`, `categories`, ...) are stored without the
/// `/api` prefix; [`ResourceService`](crate::rest::ResourceService) prepends
/// it when building URLs. Auth and OTP paths are stored as complete paths
/// because the auth plugin does not follow the collection convention.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoints {
    /// Authentication paths.
    pub auth: AuthEndpoints,
    /// OTP paths.
    pub otp: OtpEndpoints,
    /// Product collection.
    pub products: String,
    /// Category collection.
    pub categories: String,
    /// Contact form collection.
    pub contact: String,
    /// Marketing content collections.
    pub content: ContentEndpoints,
    /// User collection.
    pub users: String,
    /// The authenticated user's own record.
    pub me: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            auth: AuthEndpoints::default(),
            otp: OtpEndpoints::default(),
            products: "/products".to_string(),
            categories: "/categories".to_string(),
            contact: "/contact".to_string(),
            content: ContentEndpoints::default(),
            users: "/users".to_string(),
            me: "/api/users/me".to_string(),
        }
    }
}
