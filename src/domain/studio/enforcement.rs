//! Membership enforcement decisions for studio listings.
//!
//! Enforcement is split into a pure compute step and a separate apply step.
//! [`compute_enforcement_decisions`] inspects a snapshot of listings and
//! returns what should change; nothing here touches storage. The apply step
//! (see `application::handlers::enforcement`) turns the decisions into
//! [`EnforcementBatches`] and issues one batched write per target field.
//!
//! Per listing there are two independent axes:
//!
//! - **Status**: `ACTIVE -> INACTIVE` once the owner's latest subscription has
//!   ended. Owners with no subscription at all get no grace.
//! - **Featured**: `featured -> not featured` once `featured_until` has passed
//!   or the owner's subscription has ended.
//!
//! Nothing here ever moves a listing back to active or featured.

use serde::Serialize;

use crate::domain::foundation::{StateMachine, StudioId, Timestamp};
use crate::domain::membership::SubscriptionWindow;

use super::StudioStatus;

/// Minimal listing projection the enforcement engine needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudioProjection {
    pub id: StudioId,
    pub status: StudioStatus,
    pub is_featured: bool,
    pub featured_until: Option<Timestamp>,
    /// The owner's most-recently-created subscription window, if any.
    pub latest_subscription: Option<SubscriptionWindow>,
}

impl StudioProjection {
    /// End of the owner's authoritative subscription window.
    pub fn subscription_end(&self) -> Option<Timestamp> {
        self.latest_subscription
            .as_ref()
            .and_then(|w| w.current_period_end)
    }

    fn subscription_expired_at(&self, now: &Timestamp) -> bool {
        self.latest_subscription
            .as_ref()
            .map(|w| w.is_expired_at(now))
            .unwrap_or(true)
    }

    fn featured_expired_at(&self, now: &Timestamp) -> bool {
        self.featured_until
            .map(|until| until.is_before(now))
            .unwrap_or(false)
    }
}

/// A pending, not yet applied change to one listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnforcementDecision {
    pub studio_id: StudioId,
    /// New status, when the listing must be deactivated.
    pub status_update: Option<StudioStatus>,
    /// True when the featured flag (and `featured_until`) must be cleared.
    pub unfeature: bool,
}

/// Decides what must change for each listing, relative to the current moment.
pub fn compute_enforcement_decisions(studios: &[StudioProjection]) -> Vec<EnforcementDecision> {
    compute_enforcement_decisions_at(studios, Timestamp::now())
}

/// Decides what must change for each listing, relative to `now`.
///
/// Listings with nothing to change produce no decision. Calling this twice
/// on the same snapshot yields the same decisions.
pub fn compute_enforcement_decisions_at(
    studios: &[StudioProjection],
    now: Timestamp,
) -> Vec<EnforcementDecision> {
    studios
        .iter()
        .filter_map(|studio| decide(studio, &now))
        .collect()
}

fn decide(studio: &StudioProjection, now: &Timestamp) -> Option<EnforcementDecision> {
    let subscription_expired = studio.subscription_expired_at(now);

    let status_update = if subscription_expired {
        studio.status.transition_to(StudioStatus::Inactive).ok()
    } else {
        None
    };

    let unfeature =
        studio.is_featured && (studio.featured_expired_at(now) || subscription_expired);

    if status_update.is_none() && !unfeature {
        return None;
    }

    Some(EnforcementDecision {
        studio_id: studio.id,
        status_update,
        unfeature,
    })
}

/// Decisions grouped by the field each batched write changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnforcementBatches {
    pub deactivate: Vec<StudioId>,
    pub unfeature: Vec<StudioId>,
}

impl EnforcementBatches {
    pub fn from_decisions(decisions: &[EnforcementDecision]) -> Self {
        let mut batches = Self::default();
        for decision in decisions {
            if decision.status_update == Some(StudioStatus::Inactive) {
                batches.deactivate.push(decision.studio_id);
            }
            if decision.unfeature {
                batches.unfeature.push(decision.studio_id);
            }
        }
        batches
    }

    pub fn is_empty(&self) -> bool {
        self.deactivate.is_empty() && self.unfeature.is_empty()
    }
}

/// Rows changed by one apply run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EnforcementSummary {
    pub status_updates: u64,
    pub unfeatured_updates: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{SubscriptionId, UserId};
    use crate::domain::membership::SubscriptionStatus;

    fn now() -> Timestamp {
        Timestamp::parse_rfc3339("2025-06-15T12:00:00Z").unwrap()
    }

    fn subscription(end: Option<Timestamp>) -> SubscriptionWindow {
        SubscriptionWindow {
            id: SubscriptionId::new(),
            user_id: UserId::new(),
            status: SubscriptionStatus::Active,
            current_period_start: Some(now().minus_days(300)),
            current_period_end: end,
            created_at: now().minus_days(300),
        }
    }

    fn studio(status: StudioStatus, subscription_end: Option<Timestamp>) -> StudioProjection {
        StudioProjection {
            id: StudioId::new(),
            status,
            is_featured: false,
            featured_until: None,
            latest_subscription: Some(subscription(subscription_end)),
        }
    }

    #[test]
    fn active_studio_with_expired_subscription_is_deactivated() {
        let s = studio(StudioStatus::Active, Some(now().minus_days(1)));
        let decisions = compute_enforcement_decisions_at(&[s.clone()], now());

        assert_eq!(
            decisions,
            vec![EnforcementDecision {
                studio_id: s.id,
                status_update: Some(StudioStatus::Inactive),
                unfeature: false,
            }]
        );
    }

    #[test]
    fn active_studio_with_valid_subscription_is_left_alone() {
        let s = studio(StudioStatus::Active, Some(now().add_days(1)));
        assert!(compute_enforcement_decisions_at(&[s], now()).is_empty());
    }

    #[test]
    fn subscription_ending_exactly_now_is_not_expired() {
        let s = studio(StudioStatus::Active, Some(now()));
        assert!(compute_enforcement_decisions_at(&[s], now()).is_empty());
    }

    #[test]
    fn studio_without_any_subscription_gets_no_grace() {
        let mut s = studio(StudioStatus::Active, None);
        s.latest_subscription = None;
        let decisions = compute_enforcement_decisions_at(&[s], now());
        assert_eq!(decisions.len(), 1);
        assert_eq!(decisions[0].status_update, Some(StudioStatus::Inactive));
    }

    #[test]
    fn subscription_without_end_date_counts_as_expired() {
        let s = studio(StudioStatus::Active, None);
        let decisions = compute_enforcement_decisions_at(&[s], now());
        assert_eq!(decisions[0].status_update, Some(StudioStatus::Inactive));
    }

    #[test]
    fn inactive_studio_is_not_deactivated_again() {
        let s = studio(StudioStatus::Inactive, Some(now().minus_days(30)));
        assert!(compute_enforcement_decisions_at(&[s], now()).is_empty());
    }

    #[test]
    fn lapsed_feature_is_removed_while_subscription_is_valid() {
        let mut s = studio(StudioStatus::Active, Some(now().add_days(200)));
        s.is_featured = true;
        s.featured_until = Some(now().minus_days(1));

        let decisions = compute_enforcement_decisions_at(&[s], now());

        assert_eq!(decisions.len(), 1);
        assert!(decisions[0].unfeature);
        assert_eq!(decisions[0].status_update, None);
    }

    #[test]
    fn feature_without_end_date_survives_valid_subscription() {
        let mut s = studio(StudioStatus::Active, Some(now().add_days(200)));
        s.is_featured = true;
        assert!(compute_enforcement_decisions_at(&[s], now()).is_empty());
    }

    #[test]
    fn expired_subscription_produces_both_updates() {
        let mut s = studio(StudioStatus::Active, Some(now().minus_days(2)));
        s.is_featured = true;
        s.featured_until = Some(now().add_days(20));

        let decisions = compute_enforcement_decisions_at(&[s], now());

        assert_eq!(decisions[0].status_update, Some(StudioStatus::Inactive));
        assert!(decisions[0].unfeature);
    }

    #[test]
    fn inactive_featured_studio_is_only_unfeatured() {
        let mut s = studio(StudioStatus::Inactive, Some(now().minus_days(2)));
        s.is_featured = true;

        let decisions = compute_enforcement_decisions_at(&[s], now());

        assert_eq!(decisions[0].status_update, None);
        assert!(decisions[0].unfeature);
    }

    #[test]
    fn compute_is_repeatable_on_the_same_snapshot() {
        let mut featured = studio(StudioStatus::Active, Some(now().add_days(5)));
        featured.is_featured = true;
        featured.featured_until = Some(now().minus_days(3));
        let snapshot = vec![
            studio(StudioStatus::Active, Some(now().minus_days(1))),
            studio(StudioStatus::Active, Some(now().add_days(1))),
            featured,
        ];

        let first = compute_enforcement_decisions_at(&snapshot, now());
        let second = compute_enforcement_decisions_at(&snapshot, now());

        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn batches_group_ids_by_field() {
        let a = StudioId::new();
        let b = StudioId::new();
        let c = StudioId::new();
        let decisions = vec![
            EnforcementDecision { studio_id: a, status_update: Some(StudioStatus::Inactive), unfeature: true },
            EnforcementDecision { studio_id: b, status_update: Some(StudioStatus::Inactive), unfeature: false },
            EnforcementDecision { studio_id: c, status_update: None, unfeature: true },
        ];

        let batches = EnforcementBatches::from_decisions(&decisions);

        assert_eq!(batches.deactivate, vec![a, b]);
        assert_eq!(batches.unfeature, vec![a, c]);
        assert!(!batches.is_empty());
    }

    #[test]
    fn no_decisions_means_empty_batches() {
        assert!(EnforcementBatches::from_decisions(&[]).is_empty());
    }
}
