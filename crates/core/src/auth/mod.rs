//! Admin authentication.
//!
//! This module provides:
//! - Password hashing with Argon2id
//! - Password verification
//! - Admin role definitions

mod password;

pub use password::{PasswordError, hash_password, verify_password};

use serde::{Deserialize, Serialize};

/// Roles of portal staff accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminRole {
    /// Full access.
    Admin,
    /// Maintains content and processes letters; cannot delete records.
    Operator,
}

impl AdminRole {
    /// Returns true if this role can delete records.
    #[must_use]
    pub const fn can_delete(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Parses the stored role name.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "admin" => Some(Self::Admin),
            "operator" => Some(Self::Operator),
            _ => None,
        }
    }

    /// Stored role name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Operator => "operator",
        }
    }
}

impl std::fmt::Display for AdminRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
