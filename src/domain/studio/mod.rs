//! Studio domain module.
//!
//! Listing status, the profile-edit view of a listing, and the membership
//! enforcement engine that deactivates and unfeatures lapsed listings.

mod enforcement;
mod listing;
mod status;

pub use enforcement::{
    compute_enforcement_decisions, compute_enforcement_decisions_at, EnforcementBatches,
    EnforcementDecision, EnforcementSummary, StudioProjection,
};
pub use listing::{StudioListing, StudioTypeChange};
pub use status::StudioStatus;
