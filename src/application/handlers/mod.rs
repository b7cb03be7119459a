//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod enforcement;
pub mod membership;
pub mod studio;

pub use enforcement::{
    apply_enforcement_decisions, RunEnforcementCommand, RunEnforcementHandler,
    RunEnforcementResult,
};
pub use membership::{
    GetRenewalOptionsHandler, GetRenewalOptionsQuery, GetRenewalOptionsResult,
    RenewMembershipCommand, RenewMembershipHandler, RenewMembershipResult, RenewalOption,
};
pub use studio::{UpdateStudioTypesCommand, UpdateStudioTypesHandler, UpdateStudioTypesResult};
