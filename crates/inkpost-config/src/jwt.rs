use std::env;

/// Bearer token configuration.
///
/// # Environment Variables
///
/// - `JWT_SECRET`: HMAC signing secret
/// - `JWT_ALGORITHM`: `HS256` (default), `HS384` or `HS512`
/// - `JWT_ACCESS_EXPIRY`: token lifetime in seconds (default 7 days)
#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    pub algorithm: String,
    pub access_token_expiry: i64,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        Self {
            secret: env::var("JWT_SECRET")
                .unwrap_or_else(|_| "your-secret-key-change-in-production".to_string()),
            algorithm: env::var("JWT_ALGORITHM").unwrap_or_else(|_| "HS256".to_string()),
            access_token_expiry: env::var("JWT_ACCESS_EXPIRY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(604800), // 7 days
        }
    }
}
