//! Claim set embedded in every bearer token.

use serde::{Deserialize, Serialize};

use crate::identity::{Identity, Role};

/// Claims carried by an access token.
///
/// The wire names (`user_id`, `user_role`) are shared with tokens issued by
/// earlier deployments, where `user_role` is `true` for administrators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: i64,
    #[serde(rename = "user_role")]
    pub is_admin: bool,
    /// Issued-at (Unix timestamp, seconds)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    /// Expiration (Unix timestamp, seconds)
    pub exp: i64,
}

impl Claims {
    pub fn new(user_id: i64, role: Role, issued_at: i64, expires_at: i64) -> Self {
        Self {
            user_id,
            is_admin: role.is_admin(),
            iat: Some(issued_at),
            exp: expires_at,
        }
    }

    pub fn role(&self) -> Role {
        Role::from_admin_flag(self.is_admin)
    }

    pub fn identity(&self) -> Identity {
        Identity::new(self.user_id, self.role())
    }
}
