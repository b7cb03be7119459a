//! GetRenewalOptionsHandler - Query handler for the renewal offer page.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::membership::{
    calculate_days_until_expiry_at, calculate_early_renewal_expiry,
    calculate_five_year_renewal_expiry_at, validate_renewal_request, MembershipError,
    RenewalBreakdown, RenewalPrice, RenewalType,
};
use crate::ports::SubscriptionRepository;

/// Query for the renewal products available to a user.
#[derive(Debug, Clone)]
pub struct GetRenewalOptionsQuery {
    pub user_id: UserId,
}

/// One renewal product as offered to this user.
#[derive(Debug, Clone, Serialize)]
pub struct RenewalOption {
    pub renewal_type: RenewalType,
    pub price: RenewalPrice,
    pub breakdown: RenewalBreakdown,
    pub eligible: bool,
    /// Expiry the member would end up with, when eligible.
    pub new_expiry: Option<Timestamp>,
    /// Why the product is not available, when ineligible.
    pub reason: Option<String>,
}

/// All renewal products for a user.
#[derive(Debug, Clone, Serialize)]
pub struct GetRenewalOptionsResult {
    pub current_expiry: Option<Timestamp>,
    pub days_remaining: Option<i64>,
    pub options: Vec<RenewalOption>,
}

/// Handler for renewal option queries.
pub struct GetRenewalOptionsHandler {
    subscriptions: Arc<dyn SubscriptionRepository>,
}

impl GetRenewalOptionsHandler {
    pub fn new(subscriptions: Arc<dyn SubscriptionRepository>) -> Self {
        Self { subscriptions }
    }

    pub async fn handle(
        &self,
        query: GetRenewalOptionsQuery,
    ) -> Result<GetRenewalOptionsResult, MembershipError> {
        self.handle_at(query, Timestamp::now()).await
    }

    /// Evaluates options relative to `now`.
    pub async fn handle_at(
        &self,
        query: GetRenewalOptionsQuery,
        now: Timestamp,
    ) -> Result<GetRenewalOptionsResult, MembershipError> {
        let window = self
            .subscriptions
            .find_latest_for_user(&query.user_id)
            .await?
            .ok_or(MembershipError::SubscriptionNotFound(query.user_id))?;

        let current_expiry = window.current_period_end;
        let days_remaining =
            current_expiry.map(|expiry| calculate_days_until_expiry_at(expiry, now));

        let options = RenewalType::ALL
            .iter()
            .map(|&renewal_type| {
                option_for(renewal_type, current_expiry, days_remaining, query.user_id, now)
            })
            .collect();

        Ok(GetRenewalOptionsResult {
            current_expiry,
            days_remaining,
            options,
        })
    }
}

fn option_for(
    renewal_type: RenewalType,
    current_expiry: Option<Timestamp>,
    days_remaining: Option<i64>,
    user_id: UserId,
    now: Timestamp,
) -> RenewalOption {
    let remaining = days_remaining.unwrap_or(0);

    let outcome = match (renewal_type, current_expiry) {
        (RenewalType::Early, None) => Err(MembershipError::missing_expiry(user_id)),
        _ => validate_renewal_request(renewal_type.as_str(), remaining),
    };

    let new_expiry = match (&outcome, current_expiry) {
        (Err(_), _) => None,
        (Ok(RenewalType::Early), Some(expiry)) => Some(calculate_early_renewal_expiry(expiry)),
        (Ok(RenewalType::Early), None) => None,
        (Ok(RenewalType::FiveYear), expiry) => {
            Some(calculate_five_year_renewal_expiry_at(expiry, now))
        }
    };

    RenewalOption {
        renewal_type,
        price: RenewalPrice::for_type(renewal_type),
        breakdown: RenewalBreakdown::for_renewal(remaining.max(0), renewal_type),
        eligible: outcome.is_ok(),
        new_expiry,
        reason: outcome.err().map(|e| e.message()),
    }
}
