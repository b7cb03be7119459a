//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `http` - axum REST API
//! - `postgres` - sqlx-backed repositories

pub mod http;
pub mod postgres;
