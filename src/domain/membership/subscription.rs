//! Subscription windows.
//!
//! A user accumulates one window per purchase or renewal. Only the
//! most-recently-created window is authoritative for access decisions.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::domain::foundation::{SubscriptionId, Timestamp, UserId, ValidationError};

/// Payment-side status of a subscription window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubscriptionStatus {
    Active,
    PastDue,
    Cancelled,
    Expired,
}

impl SubscriptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionStatus::Active => "ACTIVE",
            SubscriptionStatus::PastDue => "PAST_DUE",
            SubscriptionStatus::Cancelled => "CANCELLED",
            SubscriptionStatus::Expired => "EXPIRED",
        }
    }
}

impl FromStr for SubscriptionStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ACTIVE" => Ok(SubscriptionStatus::Active),
            "PAST_DUE" => Ok(SubscriptionStatus::PastDue),
            "CANCELLED" | "CANCELED" => Ok(SubscriptionStatus::Cancelled),
            "EXPIRED" => Ok(SubscriptionStatus::Expired),
            other => Err(ValidationError::invalid_format(
                "subscription_status",
                format!("unknown value {}", other),
            )),
        }
    }
}

/// One billing window of a user's membership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionWindow {
    pub id: SubscriptionId,
    pub user_id: UserId,
    pub status: SubscriptionStatus,
    pub current_period_start: Option<Timestamp>,
    pub current_period_end: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl SubscriptionWindow {
    /// Picks the authoritative window: the one created last.
    pub fn most_recent<'a, I>(windows: I) -> Option<&'a SubscriptionWindow>
    where
        I: IntoIterator<Item = &'a SubscriptionWindow>,
    {
        windows.into_iter().max_by_key(|w| w.created_at)
    }

    /// True when the window has no end date or the end date is before `now`.
    pub fn is_expired_at(&self, now: &Timestamp) -> bool {
        self.current_period_end
            .map(|end| end.is_before(now))
            .unwrap_or(true)
    }

    /// Moves the end of the window to `new_end` and marks it active.
    ///
    /// A window that never had a start gets `now` as its start.
    pub fn extend_to(&mut self, new_end: Timestamp, now: Timestamp) {
        if self.current_period_start.is_none() {
            self.current_period_start = Some(now);
        }
        self.current_period_end = Some(new_end);
        self.status = SubscriptionStatus::Active;
    }
}
