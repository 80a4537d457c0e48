//! Route guard: bearer authentication plus role check in front of handlers.
//!
//! [`require_member`] and [`require_admin`] are axum `from_fn_with_state`
//! middleware over a [`TokenAuthenticator`]. On failure they answer directly
//! and the wrapped handler never runs. On success the [`Identity`] goes into
//! the request extensions, where handlers read it through [`AuthUser`].

use anyhow::anyhow;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, StatusCode, header, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{debug, warn};

use inkpost_auth::{AuthError, Identity, Role, TokenAuthenticator, require_role};
use inkpost_core::AppError;

use crate::metrics;

/// The identity attached by the route guard.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub Identity);

impl AuthUser {
    pub fn user_id(&self) -> i64 {
        self.0.user_id
    }

    pub fn is_admin(&self) -> bool {
        self.0.is_admin()
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .copied()
            .map(AuthUser)
            .ok_or_else(|| AppError::unauthorized(anyhow!("Missing authorization credential")))
    }
}

pub async fn require_member(
    State(authenticator): State<TokenAuthenticator>,
    req: Request,
    next: Next,
) -> Response {
    guard(&authenticator, Role::Member, req, next).await
}

pub async fn require_admin(
    State(authenticator): State<TokenAuthenticator>,
    req: Request,
    next: Next,
) -> Response {
    guard(&authenticator, Role::Admin, req, next).await
}

async fn guard(
    authenticator: &TokenAuthenticator,
    required: Role,
    mut req: Request,
    next: Next,
) -> Response {
    match authorize(authenticator, req.headers(), required) {
        Ok(identity) => {
            debug!(user.id = %identity.user_id, user.role = %identity.role, "Request authorized");
            req.extensions_mut().insert(identity);
            next.run(req).await
        }
        Err(err) => {
            warn!(reason = err.reason(), error = %err, required.role = %required, "Request rejected by route guard");
            metrics::track_auth_rejection(err.reason());
            auth_rejection(err).into_response()
        }
    }
}

/// Authenticates the `Authorization` header and checks `required`.
pub fn authorize(
    authenticator: &TokenAuthenticator,
    headers: &HeaderMap,
    required: Role,
) -> Result<Identity, AuthError> {
    let credential = bearer_credential(headers)?;
    let identity = authenticator.authenticate(credential)?;
    require_role(&identity, required)?;

    Ok(identity)
}

/// Reads the credential from `Authorization`, with or without a `Bearer ` prefix.
pub fn bearer_credential(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingCredential)?
        .to_str()
        .map_err(|_| AuthError::MalformedCredential("header is not visible ASCII".to_string()))?
        .trim();

    let token = value
        .strip_prefix("Bearer ")
        .or_else(|| value.strip_prefix("bearer "))
        .unwrap_or(value)
        .trim();

    if token.is_empty() {
        return Err(AuthError::MissingCredential);
    }

    Ok(token)
}

/// HTTP error for a failed authentication or role check.
pub fn auth_rejection(err: AuthError) -> AppError {
    let status = match &err {
        AuthError::MissingCredential | AuthError::SignatureInvalid | AuthError::Expired => {
            StatusCode::UNAUTHORIZED
        }
        AuthError::MalformedCredential(_) | AuthError::ClaimsInvalid(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        AuthError::Forbidden(_) => StatusCode::FORBIDDEN,
        AuthError::UnsupportedAlgorithm(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    AppError::new(status, err)
}
