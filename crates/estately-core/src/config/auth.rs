//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// JWT and session cookie configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HMAC secret for signing session tokens.
    pub jwt_secret: String,
    /// Session token lifetime in days.
    #[serde(default = "default_token_ttl_days")]
    pub token_ttl_days: i64,
    /// Name of the session cookie.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Whether the session cookie is marked `Secure` (production posture).
    #[serde(default)]
    pub cookie_secure: bool,
}

fn default_token_ttl_days() -> i64 {
    7
}

fn default_cookie_name() -> String {
    "token".to_string()
}
