//! RenewMembershipHandler - Command handler for membership renewals.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::membership::{
    calculate_days_until_expiry_at, calculate_early_renewal_expiry,
    calculate_five_year_renewal_expiry_at, validate_renewal_request, MembershipError,
    RenewalBreakdown, RenewalPrice, RenewalType, SubscriptionWindow,
};
use crate::ports::SubscriptionRepository;

/// Command to renew a membership.
#[derive(Debug, Clone)]
pub struct RenewMembershipCommand {
    pub user_id: UserId,
    /// Renewal product as submitted (`early` or `5year`).
    pub renewal_type: String,
}

/// Result of a successful renewal.
#[derive(Debug, Clone, Serialize)]
pub struct RenewMembershipResult {
    pub renewal_type: RenewalType,
    pub previous_expiry: Option<Timestamp>,
    pub new_expiry: Timestamp,
    pub price: RenewalPrice,
    pub breakdown: RenewalBreakdown,
    pub subscription: SubscriptionWindow,
}

/// Handler for membership renewals.
///
/// Extends the user's latest subscription window. Payment capture happens
/// upstream; this handler only moves dates.
pub struct RenewMembershipHandler {
    subscriptions: Arc<dyn SubscriptionRepository>,
}

impl RenewMembershipHandler {
    pub fn new(subscriptions: Arc<dyn SubscriptionRepository>) -> Self {
        Self { subscriptions }
    }

    pub async fn handle(
        &self,
        cmd: RenewMembershipCommand,
    ) -> Result<RenewMembershipResult, MembershipError> {
        self.handle_at(cmd, Timestamp::now()).await
    }

    /// Renews relative to `now`.
    pub async fn handle_at(
        &self,
        cmd: RenewMembershipCommand,
        now: Timestamp,
    ) -> Result<RenewMembershipResult, MembershipError> {
        // 1. Find the authoritative window
        let mut window = self
            .subscriptions
            .find_latest_for_user(&cmd.user_id)
            .await?
            .ok_or(MembershipError::SubscriptionNotFound(cmd.user_id))?;

        let previous_expiry = window.current_period_end;

        // 2. Early renewal extends an existing expiry; without one there is
        //    nothing to extend.
        let requested: RenewalType = cmd.renewal_type.parse()?;
        if requested == RenewalType::Early && previous_expiry.is_none() {
            return Err(MembershipError::missing_expiry(cmd.user_id));
        }

        // 3. Validate against the time remaining
        let days_remaining = previous_expiry
            .map(|expiry| calculate_days_until_expiry_at(expiry, now))
            .unwrap_or(0);
        let renewal_type = validate_renewal_request(requested.as_str(), days_remaining)?;

        // 4. Compute the new expiry
        let new_expiry = match (renewal_type, previous_expiry) {
            (RenewalType::Early, Some(expiry)) => calculate_early_renewal_expiry(expiry),
            (RenewalType::Early, None) => return Err(MembershipError::missing_expiry(cmd.user_id)),
            (RenewalType::FiveYear, expiry) => calculate_five_year_renewal_expiry_at(expiry, now),
        };

        // 5. Persist
        window.extend_to(new_expiry, now);
        self.subscriptions.update(&window).await?;

        tracing::info!(
            user_id = %cmd.user_id,
            renewal_type = %renewal_type,
            days_remaining,
            new_expiry = %new_expiry,
            "Membership renewed"
        );

        Ok(RenewMembershipResult {
            renewal_type,
            previous_expiry,
            new_expiry,
            price: RenewalPrice::for_type(renewal_type),
            breakdown: RenewalBreakdown::for_renewal(days_remaining.max(0), renewal_type),
            subscription: window,
        })
    }
}
