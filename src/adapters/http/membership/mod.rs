//! HTTP adapter for membership and listing endpoints.
//!
//! - `GET /membership/limits/:tier` - Listing limits for a tier
//! - `GET /membership/renewal/options` - Renewal products for the caller
//! - `POST /membership/renewal` - Renew the caller's membership
//! - `PUT /studios/:id/types` - Replace a listing's studio types
//! - `POST /admin/enforcement/run` - Run an enforcement pass

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::*;
pub use handlers::{MembershipApiError, MembershipAppState};
pub use routes::membership_router;
