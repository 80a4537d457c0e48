//! User domain models.

use chrono::{DateTime, Utc};
use inkpost_auth::Role;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::articles::Article;

/// A user account.
///
/// Local accounts carry a bcrypt `password`; accounts created through a
/// social provider have `provider`/`social_id` set and no password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub fullname: String,
    pub email: String,
    #[serde(skip)]
    pub password: Option<String>,
    pub provider: Option<String>,
    pub social_id: Option<String>,
    pub avatar: Option<String>,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn role(&self) -> Role {
        Role::from_admin_flag(self.is_admin)
    }

    /// Name shown next to the user's articles.
    pub fn display_name(&self) -> &str {
        if self.fullname.is_empty() {
            &self.username
        } else {
            &self.fullname
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProfileResponse {
    pub user: User,
    pub articles: Vec<Article>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(fullname: &str) -> User {
        let now = Utc::now();
        User {
            id: 1,
            username: "ayu".to_string(),
            fullname: fullname.to_string(),
            email: "ayu@example.com".to_string(),
            password: Some("$2b$12$hash".to_string()),
            provider: None,
            social_id: None,
            avatar: None,
            is_admin: false,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_password_is_never_serialized() {
        let value = serde_json::to_value(user("Ayu Lestari")).unwrap();
        assert!(value.get("password").is_none());
        assert_eq!(value["email"], "ayu@example.com");
    }

    #[test]
    fn test_display_name_falls_back_to_username() {
        assert_eq!(user("Ayu Lestari").display_name(), "Ayu Lestari");
        assert_eq!(user("").display_name(), "ayu");
    }

    #[test]
    fn test_role_from_flag() {
        let mut admin = user("");
        admin.is_admin = true;
        assert_eq!(admin.role(), Role::Admin);
        assert_eq!(user("").role(), Role::Member);
    }
}
