//! Membership reader port (read side).
//!
//! Resolves which tier a studio owner currently holds. Tier is needed on
//! every listing edit, so implementations should keep this lookup cheap.

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::membership::MembershipTier;
use async_trait::async_trait;

/// Reader port for membership tier lookups.
#[async_trait]
pub trait MembershipReader: Send + Sync {
    /// Get the user's current tier.
    ///
    /// Returns `None` if the user is unknown.
    async fn get_tier(&self, user_id: &UserId) -> Result<Option<MembershipTier>, DomainError>;
}
