//! JWT claims embedded in every session token.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use estately_entity::user::UserRole;

/// Claims payload for a session token.
///
/// The token is the whole session: nothing is stored server-side, so the
/// claims carry everything the access control guard needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject — the user ID.
    pub sub: Uuid,
    /// User role at the time of token issuance.
    pub role: UserRole,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}
