//! Studio listing entity (the subset this crate edits).

use serde::Serialize;

use crate::domain::foundation::{StudioId, Timestamp, UserId};
use crate::domain::membership::{enforce_studio_type_rules, MembershipTier, StudioType};

use super::StudioStatus;

/// A studio listing as seen by the profile-edit path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudioListing {
    pub id: StudioId,
    pub owner_id: UserId,
    pub status: StudioStatus,
    pub studio_types: Vec<StudioType>,
    pub updated_at: Timestamp,
}

/// Outcome of writing a submitted studio type selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudioTypeChange {
    /// What the listing now carries.
    pub kept: Vec<StudioType>,
    /// Submitted tags removed by the tier rules, in submission order.
    pub dropped: Vec<StudioType>,
}

impl StudioListing {
    /// Replaces the listing's studio types with what `tier` allows of
    /// `submitted`.
    pub fn apply_studio_types(
        &mut self,
        submitted: &[StudioType],
        tier: MembershipTier,
        now: Timestamp,
    ) -> StudioTypeChange {
        let kept = enforce_studio_type_rules(submitted, tier);

        let mut unmatched = kept.clone();
        let mut dropped = Vec::new();
        for tag in submitted {
            match unmatched.iter().position(|k| k == tag) {
                Some(pos) => {
                    unmatched.remove(pos);
                }
                None => dropped.push(tag.clone()),
            }
        }

        self.studio_types = kept.clone();
        self.updated_at = now;

        StudioTypeChange { kept, dropped }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing() -> StudioListing {
        StudioListing {
            id: StudioId::new(),
            owner_id: UserId::new(),
            status: StudioStatus::Active,
            studio_types: vec![StudioType::Home],
            updated_at: Timestamp::now().minus_days(10),
        }
    }

    #[test]
    fn basic_listing_keeps_first_allowed_type() {
        let mut studio = listing();
        let now = Timestamp::now();

        let change = studio.apply_studio_types(
            &[StudioType::Voiceover, StudioType::Recording, StudioType::Podcast],
            MembershipTier::Basic,
            now,
        );

        assert_eq!(change.kept, vec![StudioType::Recording]);
        assert_eq!(change.dropped, vec![StudioType::Voiceover, StudioType::Podcast]);
        assert_eq!(studio.studio_types, vec![StudioType::Recording]);
        assert_eq!(studio.updated_at, now);
    }

    #[test]
    fn premium_listing_with_voiceover_drops_the_rest() {
        let mut studio = listing();

        let change = studio.apply_studio_types(
            &[StudioType::Home, StudioType::Voiceover],
            MembershipTier::Premium,
            Timestamp::now(),
        );

        assert_eq!(change.kept, vec![StudioType::Voiceover]);
        assert_eq!(change.dropped, vec![StudioType::Home]);
    }

    #[test]
    fn nothing_dropped_when_everything_is_allowed() {
        let mut studio = listing();

        let change = studio.apply_studio_types(
            &[StudioType::Home, StudioType::Podcast],
            MembershipTier::Premium,
            Timestamp::now(),
        );

        assert!(change.dropped.is_empty());
        assert_eq!(studio.studio_types, vec![StudioType::Home, StudioType::Podcast]);
    }

    #[test]
    fn duplicate_beyond_cap_is_reported_once() {
        let mut studio = listing();

        let change = studio.apply_studio_types(
            &[StudioType::Home, StudioType::Home],
            MembershipTier::Basic,
            Timestamp::now(),
        );

        assert_eq!(change.kept, vec![StudioType::Home]);
        assert_eq!(change.dropped, vec![StudioType::Home]);
    }
}
