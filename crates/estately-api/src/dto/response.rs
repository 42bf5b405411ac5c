//! Response body shapes.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use estately_entity::user::{User, UserRole};

/// Public view of a user account. The password hash never appears here.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub phone_number: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            phone_number: user.phone_number,
            created_at: user.created_at,
        }
    }
}

/// GET /auth/me — the profile body is wrapped as `{user}`.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub user: UserResponse,
}

/// Returned by register and login alongside the session cookie.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub user: UserResponse,
    /// When the session cookie stops being valid.
    pub expires_at: DateTime<Utc>,
}

/// Uniform acknowledgement body for operations with nothing to return.
#[derive(Debug, Clone, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

impl OkResponse {
    pub fn ok() -> Self {
        Self { ok: true }
    }
}

/// GET /health
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub database: String,
    pub storage: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_wraps_user() {
        let user = User {
            id: Uuid::new_v4(),
            name: "Asha".to_string(),
            email: "asha@example.com".to_string(),
            password_hash: "$argon2id$stub".to_string(),
            role: UserRole::Owner,
            phone_number: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_value(ProfileResponse { user: user.into() }).expect("serialize");
        assert_eq!(json["user"]["email"], "asha@example.com");
        assert!(json["user"].get("passwordHash").is_none());
    }
}
