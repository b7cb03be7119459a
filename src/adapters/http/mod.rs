//! HTTP adapters - REST API implementations.

pub mod membership;
pub mod middleware;

pub use membership::membership_router;
pub use membership::MembershipAppState;
