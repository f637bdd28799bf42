//! Authentication types for admin sessions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// JWT claims for admin access tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (admin account ID).
    pub sub: Uuid,
    /// Admin's role (`admin` or `operator`).
    pub role: String,
    /// Issued at timestamp.
    pub iat: i64,
    /// Expiration timestamp.
    pub exp: i64,
}

impl Claims {
    /// Creates new claims for an admin account.
    #[must_use]
    pub fn new(admin_id: Uuid, role: &str, expires_at: DateTime<Utc>) -> Self {
        let now = Utc::now();
        Self {
            sub: admin_id,
            role: role.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    /// Returns the admin ID from claims.
    #[must_use]
    pub const fn admin_id(&self) -> Uuid {
        self.sub
    }
}

/// Login request payload.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    /// Admin email.
    #[validate(email(message = "Format email tidak valid"))]
    pub email: String,
    /// Admin password.
    #[validate(length(min = 1, message = "Kata sandi wajib diisi"))]
    pub password: String,
}

/// Login response payload.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    /// Authenticated admin.
    pub admin: AdminInfo,
    /// Access token.
    pub access_token: String,
    /// Always `Bearer`.
    pub token_type: &'static str,
    /// Token expiration in seconds.
    pub expires_in: i64,
}

/// Admin info returned in auth responses.
#[derive(Debug, Clone, Serialize)]
pub struct AdminInfo {
    /// Admin ID.
    pub id: Uuid,
    /// Admin email.
    pub email: String,
    /// Display name.
    pub nama: String,
    /// Role.
    pub role: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_claims_new_sets_fields() {
        let admin_id = Uuid::new_v4();
        let expires_at = Utc::now() + Duration::hours(8);

        let claims = Claims::new(admin_id, "admin", expires_at);

        assert_eq!(claims.admin_id(), admin_id);
        assert_eq!(claims.role, "admin");
        assert!(claims.iat <= Utc::now().timestamp());
        assert_eq!(claims.exp, expires_at.timestamp());
    }

    #[test]
    fn test_login_request_validation() {
        let ok = LoginRequest {
            email: "sekdes@desa.id".into(),
            password: "x".into(),
        };
        assert!(ok.validate().is_ok());

        let bad = LoginRequest {
            email: "bukan-email".into(),
            password: String::new(),
        };
        let errors = bad.validate().expect_err("invalid login");
        assert!(errors.field_errors().contains_key("email"));
        assert!(errors.field_errors().contains_key("password"));
    }
}
