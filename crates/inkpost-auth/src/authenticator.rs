//! Bearer credential verification.
//!
//! [`TokenAuthenticator::authenticate`] runs a strictly linear pipeline and
//! stops at the first failure:
//!
//! 1. **parse**: three dot-separated base64url segments, a JSON header naming
//!    an algorithm and a JSON object payload ([`AuthError::MalformedCredential`])
//! 2. **verify**: the header algorithm must equal the configured HMAC
//!    algorithm and the signature must verify under the configured secret
//!    ([`AuthError::SignatureInvalid`])
//! 3. **expiry**: `exp` must be an integer strictly in the future
//!    ([`AuthError::Expired`])
//! 4. **claims**: the payload must deserialize into [`Claims`]
//!    ([`AuthError::ClaimsInvalid`])
//!
//! Steps 1 and 2 are `jsonwebtoken::decode`. Expiry is compared against the
//! caller's clock so [`TokenAuthenticator::authenticate_at`] can pin it.
//!
//! The authenticator holds no mutable state and is cheap to clone, so it can be
//! shared by every request handler without locking.

use std::collections::HashSet;
use std::str::FromStr;

use chrono::Utc;
use jsonwebtoken::errors::{Error as JwtError, ErrorKind};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde_json::{Map, Value};
use tracing::debug;

use inkpost_config::JwtConfig;

use crate::claims::Claims;
use crate::error::AuthError;
use crate::identity::{Identity, Role};

#[derive(Clone)]
pub struct TokenAuthenticator {
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    validation: Validation,
}

impl std::fmt::Debug for TokenAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenAuthenticator")
            .field("algorithm", &self.algorithm)
            .finish_non_exhaustive()
    }
}

impl TokenAuthenticator {
    /// Creates an authenticator for an HMAC secret.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::UnsupportedAlgorithm`] for anything outside the
    /// HS256/HS384/HS512 family.
    pub fn new(secret: &[u8], algorithm: Algorithm) -> Result<Self, AuthError> {
        if !is_hmac(algorithm) {
            return Err(AuthError::UnsupportedAlgorithm(format!("{:?}", algorithm)));
        }

        // only the configured algorithm is accepted
        let mut validation = Validation::new(algorithm);
        validation.leeway = 0;
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims = HashSet::from(["exp".to_string()]);

        Ok(Self {
            decoding_key: DecodingKey::from_secret(secret),
            algorithm,
            validation,
        })
    }

    pub fn from_config(config: &JwtConfig) -> Result<Self, AuthError> {
        let algorithm = Algorithm::from_str(&config.algorithm)
            .map_err(|_| AuthError::UnsupportedAlgorithm(config.algorithm.clone()))?;

        Self::new(config.secret.as_bytes(), algorithm)
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Verifies `credential` against the current time.
    pub fn authenticate(&self, credential: &str) -> Result<Identity, AuthError> {
        self.authenticate_at(credential, Utc::now().timestamp())
    }

    /// Verifies `credential` as of `now` (Unix seconds).
    pub fn authenticate_at(&self, credential: &str, now: i64) -> Result<Identity, AuthError> {
        let payload = self.decode(credential)?;
        check_expiry(&payload, now)?;
        let claims = extract_claims(payload)?;

        debug!(user.id = %claims.user_id, user.role = %claims.role(), "Credential verified");

        Ok(claims.identity())
    }

    fn decode(&self, credential: &str) -> Result<Map<String, Value>, AuthError> {
        decode::<Map<String, Value>>(credential.trim(), &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                debug!(error = %e, "Rejected credential");
                decode_error(e)
            })
    }
}

/// Succeeds iff `identity` holds a role that satisfies `required`.
pub fn require_role(identity: &Identity, required: Role) -> Result<(), AuthError> {
    if identity.role.satisfies(required) {
        Ok(())
    } else {
        Err(AuthError::Forbidden(required))
    }
}

fn is_hmac(algorithm: Algorithm) -> bool {
    matches!(
        algorithm,
        Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
    )
}

fn decode_error(err: JwtError) -> AuthError {
    match err.kind() {
        ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => AuthError::SignatureInvalid,
        ErrorKind::ExpiredSignature => AuthError::Expired,
        ErrorKind::MissingRequiredClaim(claim) => {
            AuthError::ClaimsInvalid(format!("missing or invalid {}", claim))
        }
        ErrorKind::InvalidToken => {
            AuthError::MalformedCredential("expected three dot-separated segments".to_string())
        }
        ErrorKind::Base64(_) => AuthError::MalformedCredential("segment is not base64url".to_string()),
        ErrorKind::Json(_) | ErrorKind::Utf8(_) => {
            AuthError::MalformedCredential("header or payload is not a JSON object".to_string())
        }
        _ => AuthError::MalformedCredential(err.to_string()),
    }
}

fn check_expiry(payload: &Map<String, Value>, now: i64) -> Result<(), AuthError> {
    let exp = payload
        .get("exp")
        .ok_or_else(|| AuthError::ClaimsInvalid("missing exp".to_string()))?
        .as_i64()
        .ok_or_else(|| AuthError::ClaimsInvalid("exp must be an integer".to_string()))?;

    if now >= exp {
        return Err(AuthError::Expired);
    }

    Ok(())
}

fn extract_claims(payload: Map<String, Value>) -> Result<Claims, AuthError> {
    serde_json::from_value(Value::Object(payload))
        .map_err(|e| AuthError::ClaimsInvalid(e.to_string()))
}
