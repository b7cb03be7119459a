//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers (write) and query handlers (read) are kept apart.

pub mod handlers;

pub use handlers::{
    // Enforcement
    RunEnforcementCommand, RunEnforcementHandler, RunEnforcementResult,
    // Membership
    GetRenewalOptionsHandler, GetRenewalOptionsQuery, GetRenewalOptionsResult,
    RenewMembershipCommand, RenewMembershipHandler, RenewMembershipResult,
    // Studio
    UpdateStudioTypesCommand, UpdateStudioTypesHandler, UpdateStudioTypesResult,
};
