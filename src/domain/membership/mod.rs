//! Membership domain module.
//!
//! Tier limits, studio type rules and renewal accounting.
//!
//! # Module Structure
//!
//! - `tier` - MembershipTier levels
//! - `tier_limits` - Listing limits per tier
//! - `studio_type` - Studio type tags and tier enforcement
//! - `renewal` - Renewal products, expiry arithmetic, pricing
//! - `subscription` - Subscription windows
//! - `errors` - MembershipError

mod errors;
mod renewal;
mod studio_type;
mod subscription;
mod tier;
mod tier_limits;

pub use errors::MembershipError;
pub use renewal::{
    calculate_days_until_expiry, calculate_days_until_expiry_at, calculate_early_renewal_expiry,
    calculate_five_year_renewal_expiry, calculate_five_year_renewal_expiry_at,
    is_eligible_for_early_renewal, validate_renewal_request, RenewalBreakdown, RenewalPrice,
    RenewalType, EARLY_RENEWAL_BONUS_DAYS, EARLY_RENEWAL_MIN_DAYS_REMAINING,
    FIVE_YEAR_RENEWAL_DAYS, RENEWAL_DAYS,
};
pub use studio_type::{enforce_studio_type_rules, StudioType, UnknownTag};
pub use subscription::{SubscriptionStatus, SubscriptionWindow};
pub use tier::MembershipTier;
pub use tier_limits::TierLimits;
