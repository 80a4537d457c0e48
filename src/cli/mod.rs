//! Account administration used by the `inkpost-cli` binary.

use anyhow::anyhow;
use sqlx::PgPool;
use validator::Validate;

use inkpost_auth::Role;
use inkpost_models::{RegisterRequest, User};

use crate::modules::auth::AuthService;

/// Creates a local account with the admin role.
pub async fn create_admin(db: &PgPool, request: RegisterRequest) -> anyhow::Result<User> {
    request
        .validate()
        .map_err(|e| anyhow!("Invalid admin details: {}", e))?;

    AuthService::create_user(db, &request, Role::Admin)
        .await
        .map_err(|e| e.error)
}

/// Grants or revokes the admin role for the account with `email`.
pub async fn set_role(db: &PgPool, email: &str, role: Role) -> anyhow::Result<User> {
    AuthService::set_role(db, email, role)
        .await
        .map_err(|e| e.error)
}
