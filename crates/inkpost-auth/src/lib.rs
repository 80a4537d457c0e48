//! # Inkpost Auth
//!
//! Turns an opaque bearer credential into a trusted [`Identity`].
//!
//! - [`claims`]: the signed claim set carried inside every token
//! - [`identity`]: [`Identity`] and [`Role`], the per-request authenticated principal
//! - [`authenticator`]: [`TokenAuthenticator`], the parse → verify → expiry → claims pipeline
//! - [`jwt`]: token issuance for login and registration
//! - [`error`]: [`AuthError`], one variant per way authentication can fail
//!
//! # Example
//!
//! ```ignore
//! use inkpost_auth::{Role, TokenAuthenticator, create_access_token, require_role};
//! use inkpost_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let authenticator = TokenAuthenticator::from_config(&config)?;
//!
//! let token = create_access_token(42, Role::Member, &config)?;
//! let identity = authenticator.authenticate(&token)?;
//! assert!(require_role(&identity, Role::Admin).is_err());
//! ```

pub mod authenticator;
pub mod claims;
pub mod error;
pub mod identity;
pub mod jwt;

// Re-export commonly used types at crate root
pub use authenticator::{TokenAuthenticator, require_role};
pub use claims::Claims;
pub use error::AuthError;
pub use identity::{Identity, Role};
pub use jwt::{create_access_token, issue_token};
