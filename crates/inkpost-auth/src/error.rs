use thiserror::Error;

/// Every way turning a credential into an identity can fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Missing authorization credential")]
    MissingCredential,

    #[error("Malformed credential: {0}")]
    MalformedCredential(String),

    #[error("Invalid token signature")]
    SignatureInvalid,

    #[error("Token has expired")]
    Expired,

    #[error("Invalid token claims: {0}")]
    ClaimsInvalid(String),

    #[error("Access denied. {0} role required")]
    Forbidden(crate::identity::Role),

    #[error("Unsupported signing algorithm: {0}")]
    UnsupportedAlgorithm(String),
}

impl AuthError {
    /// Short label used for logs and metrics.
    pub fn reason(&self) -> &'static str {
        match self {
            AuthError::MissingCredential => "missing",
            AuthError::MalformedCredential(_) => "malformed",
            AuthError::SignatureInvalid => "signature",
            AuthError::Expired => "expired",
            AuthError::ClaimsInvalid(_) => "claims",
            AuthError::Forbidden(_) => "forbidden",
            AuthError::UnsupportedAlgorithm(_) => "algorithm",
        }
    }
}
