//! Membership-specific error types.
//!
//! Errors related to tiers, renewals and studio listing updates.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | SubscriptionNotFound | 404 |
//! | StudioNotFound | 404 |
//! | NotStudioOwner | 403 |
//! | AdminRequired | 403 |
//! | InvalidTier | 400 |
//! | InvalidRenewalType | 400 |
//! | EarlyRenewalIneligible | 400 |
//! | MissingExpiry | 400 |
//! | ValidationFailed | 400 |
//! | Infrastructure | 500 |

use crate::domain::foundation::{DomainError, ErrorCode, StudioId, UserId};

/// Membership-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MembershipError {
    /// The user has never held a subscription.
    SubscriptionNotFound(UserId),

    /// Studio listing was not found.
    StudioNotFound(StudioId),

    /// The user does not own the studio listing.
    NotStudioOwner { studio_id: StudioId, user_id: UserId },

    /// Operation is restricted to staff.
    AdminRequired(UserId),

    /// Unknown membership tier.
    InvalidTier(String),

    /// Unknown renewal product.
    InvalidRenewalType(String),

    /// Early renewal requested with too little time remaining.
    EarlyRenewalIneligible { days_remaining: i64 },

    /// Early renewal requested by a member with no expiry on record.
    MissingExpiry(UserId),

    /// Validation failed.
    ValidationFailed { field: String, message: String },

    /// Infrastructure error.
    Infrastructure(String),
}

impl MembershipError {
    pub fn subscription_not_found(user_id: UserId) -> Self {
        MembershipError::SubscriptionNotFound(user_id)
    }

    pub fn studio_not_found(studio_id: StudioId) -> Self {
        MembershipError::StudioNotFound(studio_id)
    }

    pub fn not_studio_owner(studio_id: StudioId, user_id: UserId) -> Self {
        MembershipError::NotStudioOwner { studio_id, user_id }
    }

    pub fn admin_required(user_id: UserId) -> Self {
        MembershipError::AdminRequired(user_id)
    }

    pub fn invalid_tier(tier: impl Into<String>) -> Self {
        MembershipError::InvalidTier(tier.into())
    }

    pub fn invalid_renewal_type(renewal_type: impl Into<String>) -> Self {
        MembershipError::InvalidRenewalType(renewal_type.into())
    }

    pub fn early_renewal_ineligible(days_remaining: i64) -> Self {
        MembershipError::EarlyRenewalIneligible { days_remaining }
    }

    pub fn missing_expiry(user_id: UserId) -> Self {
        MembershipError::MissingExpiry(user_id)
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        MembershipError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        MembershipError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            MembershipError::SubscriptionNotFound(_) => ErrorCode::SubscriptionNotFound,
            MembershipError::StudioNotFound(_) => ErrorCode::StudioNotFound,
            MembershipError::NotStudioOwner { .. } | MembershipError::AdminRequired(_) => {
                ErrorCode::Forbidden
            }
            MembershipError::InvalidTier(_) => ErrorCode::InvalidTier,
            MembershipError::InvalidRenewalType(_) => ErrorCode::InvalidRenewalType,
            MembershipError::EarlyRenewalIneligible { .. } | MembershipError::MissingExpiry(_) => {
                ErrorCode::RenewalNotEligible
            }
            MembershipError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            MembershipError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a user-friendly error message.
    pub fn message(&self) -> String {
        match self {
            MembershipError::SubscriptionNotFound(user_id) => {
                format!("No membership found for user: {}", user_id)
            }
            MembershipError::StudioNotFound(id) => format!("Studio not found: {}", id),
            MembershipError::NotStudioOwner { studio_id, .. } => {
                format!("You do not own studio {}", studio_id)
            }
            MembershipError::AdminRequired(_) => {
                "This operation requires an administrator".to_string()
            }
            MembershipError::InvalidTier(tier) => format!("Invalid membership tier: {}", tier),
            MembershipError::InvalidRenewalType(renewal_type) => format!(
                "Invalid renewal type '{}'. Choose 'early' or '5year'.",
                renewal_type
            ),
            MembershipError::EarlyRenewalIneligible { days_remaining } => format!(
                "Early renewal requires at least 30 days remaining on your membership \
                 (you have {}). Choose the 5-year renewal instead, or wait until your \
                 membership expires and renew then.",
                days_remaining
            ),
            MembershipError::MissingExpiry(_) => {
                "Early renewal is only available to members with an active expiry date. \
                 Choose the 5-year renewal instead."
                    .to_string()
            }
            MembershipError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            MembershipError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }

    /// Returns true if the caller can fix the request and try again.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, MembershipError::Infrastructure(_))
    }
}

impl std::fmt::Display for MembershipError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for MembershipError {}

impl From<DomainError> for MembershipError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed | ErrorCode::InvalidFormat => {
                MembershipError::ValidationFailed {
                    field: err
                        .details
                        .get("field")
                        .cloned()
                        .unwrap_or_else(|| "unknown".to_string()),
                    message: err.message,
                }
            }
            ErrorCode::InvalidTier => MembershipError::InvalidTier(err.message),
            _ => MembershipError::Infrastructure(err.to_string()),
        }
    }
}

impl From<MembershipError> for DomainError {
    fn from(err: MembershipError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}
