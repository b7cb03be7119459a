//! Subscription repository port.
//!
//! Reads and extends a user's subscription windows. Only the latest window
//! (by creation time) is ever returned, matching how access is decided.
//!
//! # Example
//!
//! ```ignore
//! async fn current_expiry(
//!     repo: &dyn SubscriptionRepository,
//!     user_id: &UserId,
//! ) -> Result<Option<Timestamp>, DomainError> {
//!     Ok(repo
//!         .find_latest_for_user(user_id)
//!         .await?
//!         .and_then(|w| w.current_period_end))
//! }
//! ```

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::membership::SubscriptionWindow;
use async_trait::async_trait;

/// Repository port for subscription windows.
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// Find the user's most-recently-created subscription window.
    ///
    /// Returns `None` if the user has never subscribed.
    async fn find_latest_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<SubscriptionWindow>, DomainError>;

    /// Persist changed period dates and status of an existing window.
    ///
    /// # Errors
    ///
    /// - `SubscriptionNotFound` if the window doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, window: &SubscriptionWindow) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscription_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn SubscriptionRepository) {}
    }
}
