//! HTTP middleware for axum.
//!
//! - `identity` - Gateway identity middleware and extractors

pub mod identity;

pub use identity::{identity_middleware, AuthRejection, AuthenticatedUser, RequireAuth};
