//! # Inkpost Core
//!
//! Core types, errors, and utilities for the Inkpost API.
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`password`]: bcrypt password hashing and verification
//! - [`slug`]: URL-safe slug generation for article titles
//!
//! # Example
//!
//! ```ignore
//! use inkpost_core::{AppError, slugify};
//!
//! let error = AppError::not_found(anyhow::anyhow!("Article not found"));
//! assert_eq!(slugify("Tupai terbang"), "tupai-terbang");
//! ```

pub mod errors;
pub mod password;
pub mod slug;

// Re-export commonly used types at crate root
pub use errors::{AppError, ErrorResponse};
pub use password::{hash_password, verify_password};
pub use slug::slugify;
