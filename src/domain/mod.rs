//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, state machines)
//! - `membership` - Tiers, tier limits, studio type rules, renewals
//! - `studio` - Listing status and membership enforcement

pub mod foundation;
pub mod membership;
pub mod studio;
