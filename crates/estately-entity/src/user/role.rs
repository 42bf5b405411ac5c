//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The capacity in which a user participates on the platform.
///
/// The role is also snapshotted onto every listing at creation time as
/// its `posted_by` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// A private owner selling or renting their own property.
    Owner,
    /// A builder or developer marketing new construction.
    Builder,
    /// A real-estate agent acting on behalf of clients.
    Agent,
}

impl UserRole {
    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Builder => "builder",
            Self::Agent => "agent",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = estately_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "owner" => Ok(Self::Owner),
            "builder" => Ok(Self::Builder),
            "agent" => Ok(Self::Agent),
            _ => Err(estately_core::AppError::validation(format!(
                "Invalid role: '{s}'. Expected one of: owner, builder, agent"
            ))),
        }
    }
}
