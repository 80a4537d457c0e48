//! Access token issuing.
//!
//! Tokens are signed with the configured HMAC algorithm and carry the
//! [`Claims`] set. Verification lives in [`crate::authenticator`].

use std::str::FromStr;

use anyhow::anyhow;
use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};

use inkpost_config::JwtConfig;
use inkpost_core::AppError;

use crate::claims::Claims;
use crate::identity::Role;

/// Signs `claims` with the configured secret and algorithm.
///
/// # Errors
///
/// Returns an internal error if the configured algorithm is unknown or
/// encoding fails.
pub fn issue_token(claims: &Claims, jwt_config: &JwtConfig) -> Result<String, AppError> {
    let algorithm = Algorithm::from_str(&jwt_config.algorithm)
        .map_err(|e| AppError::internal(anyhow!("Invalid JWT algorithm: {}", e)))?;

    encode(
        &Header::new(algorithm),
        claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(anyhow!("Failed to create token: {}", e)))
}

/// Creates an access token valid for `access_token_expiry` seconds from now.
pub fn create_access_token(
    user_id: i64,
    role: Role,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp();
    let claims = Claims::new(user_id, role, now, now + jwt_config.access_token_expiry);

    issue_token(&claims, jwt_config)
}
