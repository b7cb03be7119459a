//! Enforcement pass against an in-memory directory.
//!
//! Drives the full read → decide → write loop through the ports and checks
//! that a second pass over the refreshed rows has nothing left to do.

mod common;

use std::sync::Arc;

use common::{InMemoryDirectory, StoredStudio};
use studio_directory::application::handlers::{
    apply_enforcement_decisions, RunEnforcementCommand, RunEnforcementHandler,
};
use studio_directory::domain::foundation::Timestamp;
use studio_directory::domain::membership::MembershipTier;
use studio_directory::domain::studio::{compute_enforcement_decisions_at, StudioStatus};
use studio_directory::ports::StudioProjectionReader;

fn handler(store: &Arc<InMemoryDirectory>) -> RunEnforcementHandler {
    RunEnforcementHandler::new(store.clone(), store.clone())
}

// ════════════════════════════════════════════════════════════════════════════════
// Status axis
// ════════════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn lapsed_subscription_deactivates_and_converges() {
    let now = Timestamp::now();
    let store = Arc::new(InMemoryDirectory::new());
    let owner = store.add_user(MembershipTier::Premium);
    store.add_subscription(owner, Some(now.minus_days(1)), now.minus_days(366));
    let studio = store.add_studio(StoredStudio::active(owner));

    let candidates = store.load_enforcement_candidates().await.unwrap();
    let decisions = compute_enforcement_decisions_at(&candidates, now);
    assert_eq!(decisions.len(), 1);
    assert_eq!(decisions[0].studio_id, studio);
    assert_eq!(decisions[0].status_update, Some(StudioStatus::Inactive));

    let summary = apply_enforcement_decisions(store.as_ref(), &decisions)
        .await
        .unwrap();
    assert_eq!(summary.status_updates, 1);
    assert_eq!(summary.unfeatured_updates, 0);
    assert_eq!(store.studio(&studio).status, StudioStatus::Inactive);

    let refreshed = store.load_enforcement_candidates().await.unwrap();
    assert!(compute_enforcement_decisions_at(&refreshed, now).is_empty());
}

#[tokio::test]
async fn older_valid_window_does_not_rescue_lapsed_owner() {
    let now = Timestamp::now();
    let store = Arc::new(InMemoryDirectory::new());
    let owner = store.add_user(MembershipTier::Premium);
    store.add_subscription(owner, Some(now.add_days(200)), now.minus_days(400));
    store.add_subscription(owner, Some(now.minus_days(2)), now.minus_days(30));
    let studio = store.add_studio(StoredStudio::active(owner));

    let result = handler(&store)
        .handle_at(RunEnforcementCommand::default(), now)
        .await
        .unwrap();

    assert_eq!(result.summary.status_updates, 1);
    assert_eq!(store.studio(&studio).status, StudioStatus::Inactive);
}

#[tokio::test]
async fn owner_without_subscription_is_deactivated() {
    let now = Timestamp::now();
    let store = Arc::new(InMemoryDirectory::new());
    let owner = store.add_user(MembershipTier::Basic);
    let studio = store.add_studio(StoredStudio::active(owner));

    handler(&store)
        .handle_at(RunEnforcementCommand::default(), now)
        .await
        .unwrap();

    assert_eq!(store.studio(&studio).status, StudioStatus::Inactive);
}

// ════════════════════════════════════════════════════════════════════════════════
// Featured axis
// ════════════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn expired_feature_with_valid_subscription_is_only_unfeatured() {
    let now = Timestamp::now();
    let store = Arc::new(InMemoryDirectory::new());
    let owner = store.add_user(MembershipTier::Premium);
    store.add_subscription(owner, Some(now.add_days(90)), now.minus_days(275));
    let studio =
        store.add_studio(StoredStudio::active(owner).featured_until(now.minus_days(1)));

    let candidates = store.load_enforcement_candidates().await.unwrap();
    let decisions = compute_enforcement_decisions_at(&candidates, now);
    assert_eq!(decisions.len(), 1);
    assert!(decisions[0].unfeature);
    assert_eq!(decisions[0].status_update, None);

    let summary = apply_enforcement_decisions(store.as_ref(), &decisions)
        .await
        .unwrap();
    assert_eq!(summary.status_updates, 0);
    assert_eq!(summary.unfeatured_updates, 1);

    let stored = store.studio(&studio);
    assert_eq!(stored.status, StudioStatus::Active);
    assert!(!stored.is_featured);
    assert_eq!(stored.featured_until, None);
}

#[tokio::test]
async fn lapsed_featured_studio_gets_both_updates_in_one_pass() {
    let now = Timestamp::now();
    let store = Arc::new(InMemoryDirectory::new());
    let owner = store.add_user(MembershipTier::Premium);
    store.add_subscription(owner, Some(now.minus_days(3)), now.minus_days(368));
    let studio =
        store.add_studio(StoredStudio::active(owner).featured_until(now.add_days(10)));

    let result = handler(&store)
        .handle_at(RunEnforcementCommand::default(), now)
        .await
        .unwrap();

    assert_eq!(result.decisions.len(), 1);
    assert_eq!(result.summary.status_updates, 1);
    assert_eq!(result.summary.unfeatured_updates, 1);

    let stored = store.studio(&studio);
    assert_eq!(stored.status, StudioStatus::Inactive);
    assert!(!stored.is_featured);

    let second = handler(&store)
        .handle_at(RunEnforcementCommand::default(), now)
        .await
        .unwrap();
    assert!(second.decisions.is_empty());
    assert_eq!(second.scanned, 0);
}

// ════════════════════════════════════════════════════════════════════════════════
// Stale decisions
// ════════════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn renewal_after_snapshot_keeps_listing_active() {
    let now = Timestamp::now();
    let store = Arc::new(InMemoryDirectory::new());
    let owner = store.add_user(MembershipTier::Premium);
    let window = store.add_subscription(owner, Some(now.minus_days(1)), now.minus_days(366));
    let studio = store.add_studio(StoredStudio::active(owner));

    let candidates = store.load_enforcement_candidates().await.unwrap();
    let decisions = compute_enforcement_decisions_at(&candidates, now);
    assert_eq!(decisions.len(), 1);

    store.set_subscription_end(&window, now.add_days(394));

    let summary = apply_enforcement_decisions(store.as_ref(), &decisions)
        .await
        .unwrap();
    assert_eq!(summary.status_updates, 0);
    assert_eq!(store.studio(&studio).status, StudioStatus::Active);
}

#[tokio::test]
async fn refeature_after_snapshot_keeps_listing_featured() {
    let now = Timestamp::now();
    let store = Arc::new(InMemoryDirectory::new());
    let owner = store.add_user(MembershipTier::Premium);
    store.add_subscription(owner, Some(now.add_days(90)), now.minus_days(275));
    let studio =
        store.add_studio(StoredStudio::active(owner).featured_until(now.minus_days(1)));

    let candidates = store.load_enforcement_candidates().await.unwrap();
    let decisions = compute_enforcement_decisions_at(&candidates, now);
    assert!(decisions[0].unfeature);

    store.set_featured_until(&studio, now.add_days(30));

    let summary = apply_enforcement_decisions(store.as_ref(), &decisions)
        .await
        .unwrap();
    assert_eq!(summary.unfeatured_updates, 0);
    assert!(store.studio(&studio).is_featured);
}

// ════════════════════════════════════════════════════════════════════════════════
// Mixed directory
// ════════════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn healthy_listings_are_left_alone() {
    let now = Timestamp::now();
    let store = Arc::new(InMemoryDirectory::new());

    let healthy_owner = store.add_user(MembershipTier::Premium);
    store.add_subscription(healthy_owner, Some(now.add_days(100)), now.minus_days(265));
    let healthy =
        store.add_studio(StoredStudio::active(healthy_owner).featured_until(now.add_days(5)));

    let lapsed_owner = store.add_user(MembershipTier::Basic);
    store.add_subscription(lapsed_owner, Some(now.minus_days(10)), now.minus_days(375));
    let lapsed = store.add_studio(StoredStudio::active(lapsed_owner));

    let result = handler(&store)
        .handle_at(RunEnforcementCommand::default(), now)
        .await
        .unwrap();

    assert_eq!(result.scanned, 2);
    assert_eq!(result.decisions.len(), 1);
    assert_eq!(result.decisions[0].studio_id, lapsed);

    let kept = store.studio(&healthy);
    assert_eq!(kept.status, StudioStatus::Active);
    assert!(kept.is_featured);
}

#[tokio::test]
async fn dry_run_reports_without_writing() {
    let now = Timestamp::now();
    let store = Arc::new(InMemoryDirectory::new());
    let owner = store.add_user(MembershipTier::Basic);
    store.add_subscription(owner, Some(now.minus_days(1)), now.minus_days(366));
    let studio = store.add_studio(StoredStudio::active(owner));

    let result = handler(&store)
        .handle_at(RunEnforcementCommand { dry_run: true }, now)
        .await
        .unwrap();

    assert!(result.dry_run);
    assert_eq!(result.decisions.len(), 1);
    assert_eq!(result.summary.status_updates, 0);
    assert_eq!(store.studio(&studio).status, StudioStatus::Active);
}

#[tokio::test]
async fn write_failure_propagates() {
    let now = Timestamp::now();
    let store = Arc::new(InMemoryDirectory::new());
    let owner = store.add_user(MembershipTier::Basic);
    store.add_subscription(owner, Some(now.minus_days(1)), now.minus_days(366));
    store.add_studio(StoredStudio::active(owner));
    store.fail_writes();

    let result = handler(&store)
        .handle_at(RunEnforcementCommand::default(), now)
        .await;

    assert!(result.is_err());
}
