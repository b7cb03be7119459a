//! In-memory store backing every port, shared by the integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use studio_directory::domain::foundation::{
    DomainError, ErrorCode, StudioId, SubscriptionId, Timestamp, UserId,
};
use studio_directory::domain::membership::{
    MembershipTier, StudioType, SubscriptionStatus, SubscriptionWindow,
};
use studio_directory::domain::studio::{StudioListing, StudioProjection, StudioStatus};
use studio_directory::ports::{
    MembershipReader, StudioEnforcementWriter, StudioProjectionReader, StudioRepository,
    SubscriptionRepository,
};

/// A studio row as the directory stores it.
#[derive(Debug, Clone)]
pub struct StoredStudio {
    pub id: StudioId,
    pub owner_id: UserId,
    pub status: StudioStatus,
    pub is_featured: bool,
    pub featured_until: Option<Timestamp>,
    pub studio_types: Vec<StudioType>,
    pub updated_at: Timestamp,
}

impl StoredStudio {
    pub fn active(owner_id: UserId) -> Self {
        Self {
            id: StudioId::new(),
            owner_id,
            status: StudioStatus::Active,
            is_featured: false,
            featured_until: None,
            studio_types: vec![StudioType::Recording],
            updated_at: Timestamp::now(),
        }
    }

    pub fn featured_until(mut self, until: Timestamp) -> Self {
        self.is_featured = true;
        self.featured_until = Some(until);
        self
    }
}

#[derive(Default)]
pub struct InMemoryDirectory {
    tiers: Mutex<HashMap<UserId, MembershipTier>>,
    subscriptions: Mutex<Vec<SubscriptionWindow>>,
    studios: Mutex<Vec<StoredStudio>>,
    fail_writes: Mutex<bool>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_user(&self, tier: MembershipTier) -> UserId {
        let id = UserId::new();
        self.tiers.lock().unwrap().insert(id, tier);
        id
    }

    pub fn add_subscription(
        &self,
        user_id: UserId,
        end: Option<Timestamp>,
        created_at: Timestamp,
    ) -> SubscriptionId {
        let window = SubscriptionWindow {
            id: SubscriptionId::new(),
            user_id,
            status: SubscriptionStatus::Active,
            current_period_start: end.map(|e| e.minus_days(365)),
            current_period_end: end,
            created_at,
        };
        let id = window.id;
        self.subscriptions.lock().unwrap().push(window);
        id
    }

    pub fn add_studio(&self, studio: StoredStudio) -> StudioId {
        let id = studio.id;
        self.studios.lock().unwrap().push(studio);
        id
    }

    pub fn studio(&self, id: &StudioId) -> StoredStudio {
        self.studios
            .lock()
            .unwrap()
            .iter()
            .find(|s| &s.id == id)
            .cloned()
            .expect("studio exists")
    }

    pub fn subscription(&self, id: &SubscriptionId) -> SubscriptionWindow {
        self.subscriptions
            .lock()
            .unwrap()
            .iter()
            .find(|w| &w.id == id)
            .cloned()
            .expect("subscription exists")
    }

    /// Moves a subscription's end date, as a renewal would.
    pub fn set_subscription_end(&self, id: &SubscriptionId, end: Timestamp) {
        let mut windows = self.subscriptions.lock().unwrap();
        if let Some(window) = windows.iter_mut().find(|w| &w.id == id) {
            window.current_period_end = Some(end);
        }
    }

    pub fn set_featured_until(&self, id: &StudioId, until: Timestamp) {
        let mut studios = self.studios.lock().unwrap();
        if let Some(studio) = studios.iter_mut().find(|s| &s.id == id) {
            studio.is_featured = true;
            studio.featured_until = Some(until);
        }
    }

    pub fn fail_writes(&self) {
        *self.fail_writes.lock().unwrap() = true;
    }

    fn check_writable(&self) -> Result<(), DomainError> {
        if *self.fail_writes.lock().unwrap() {
            return Err(DomainError::new(
                ErrorCode::DatabaseError,
                "write rejected by test store",
            ));
        }
        Ok(())
    }

    fn latest_for(&self, user_id: &UserId) -> Option<SubscriptionWindow> {
        let windows = self.subscriptions.lock().unwrap();
        SubscriptionWindow::most_recent(windows.iter().filter(|w| &w.user_id == user_id)).cloned()
    }

    fn owner_lapsed(&self, owner_id: &UserId, now: &Timestamp) -> bool {
        self.latest_for(owner_id)
            .map(|w| w.is_expired_at(now))
            .unwrap_or(true)
    }
}

#[async_trait]
impl MembershipReader for InMemoryDirectory {
    async fn get_tier(&self, user_id: &UserId) -> Result<Option<MembershipTier>, DomainError> {
        Ok(self.tiers.lock().unwrap().get(user_id).copied())
    }
}

#[async_trait]
impl SubscriptionRepository for InMemoryDirectory {
    async fn find_latest_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<SubscriptionWindow>, DomainError> {
        Ok(self.latest_for(user_id))
    }

    async fn update(&self, window: &SubscriptionWindow) -> Result<(), DomainError> {
        self.check_writable()?;
        let mut windows = self.subscriptions.lock().unwrap();
        match windows.iter_mut().find(|w| w.id == window.id) {
            Some(stored) => {
                *stored = window.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::SubscriptionNotFound,
                "no such subscription",
            )),
        }
    }
}

#[async_trait]
impl StudioRepository for InMemoryDirectory {
    async fn find_by_id(&self, id: &StudioId) -> Result<Option<StudioListing>, DomainError> {
        Ok(self
            .studios
            .lock()
            .unwrap()
            .iter()
            .find(|s| &s.id == id)
            .map(|s| StudioListing {
                id: s.id,
                owner_id: s.owner_id,
                status: s.status,
                studio_types: s.studio_types.clone(),
                updated_at: s.updated_at,
            }))
    }

    async fn update_studio_types(&self, listing: &StudioListing) -> Result<(), DomainError> {
        self.check_writable()?;
        let mut studios = self.studios.lock().unwrap();
        if let Some(stored) = studios.iter_mut().find(|s| s.id == listing.id) {
            stored.studio_types = listing.studio_types.clone();
            stored.updated_at = listing.updated_at;
        }
        Ok(())
    }
}

#[async_trait]
impl StudioProjectionReader for InMemoryDirectory {
    async fn load_enforcement_candidates(&self) -> Result<Vec<StudioProjection>, DomainError> {
        let studios = self.studios.lock().unwrap().clone();
        Ok(studios
            .into_iter()
            .filter(|s| s.status == StudioStatus::Active || s.is_featured)
            .map(|s| StudioProjection {
                id: s.id,
                status: s.status,
                is_featured: s.is_featured,
                featured_until: s.featured_until,
                latest_subscription: self.latest_for(&s.owner_id),
            })
            .collect())
    }
}

#[async_trait]
impl StudioEnforcementWriter for InMemoryDirectory {
    async fn deactivate_studios(&self, ids: &[StudioId]) -> Result<u64, DomainError> {
        self.check_writable()?;
        let now = Timestamp::now();
        let mut studios = self.studios.lock().unwrap();
        let mut changed = 0;
        for studio in studios.iter_mut().filter(|s| {
            ids.contains(&s.id)
                && s.status == StudioStatus::Active
                && self.owner_lapsed(&s.owner_id, &now)
        }) {
            studio.status = StudioStatus::Inactive;
            changed += 1;
        }
        Ok(changed)
    }

    async fn unfeature_studios(&self, ids: &[StudioId]) -> Result<u64, DomainError> {
        self.check_writable()?;
        let now = Timestamp::now();
        let mut studios = self.studios.lock().unwrap();
        let mut changed = 0;
        for studio in studios.iter_mut().filter(|s| {
            let feature_expired = s.featured_until.map(|u| u.is_before(&now)).unwrap_or(false);
            ids.contains(&s.id)
                && s.is_featured
                && (feature_expired || self.owner_lapsed(&s.owner_id, &now))
        }) {
            studio.is_featured = false;
            studio.featured_until = None;
            changed += 1;
        }
        Ok(changed)
    }
}
