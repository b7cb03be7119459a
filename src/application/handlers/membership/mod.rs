//! Membership handlers.
//!
//! ## Commands
//! - Renewing a membership (early or 5-year)
//!
//! ## Queries
//! - Renewal options with prices and eligibility

mod get_renewal_options;
mod renew_membership;

// Commands
pub use renew_membership::{RenewMembershipCommand, RenewMembershipHandler, RenewMembershipResult};

// Queries
pub use get_renewal_options::{
    GetRenewalOptionsHandler, GetRenewalOptionsQuery, GetRenewalOptionsResult, RenewalOption,
};
