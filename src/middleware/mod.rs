//! Request middleware.
//!
//! - [`auth`]: the route guard (`require_member`, `require_admin`) and the
//!   [`auth::AuthUser`] extractor
//!
//! # Flow
//!
//! 1. Client sends `Authorization: Bearer <token>` (a bare token is accepted too)
//! 2. The guard authenticates it and checks the route's role
//! 3. The identity is stored in the request extensions
//! 4. Handlers take `AuthUser` to read it without re-parsing the token

pub mod auth;
