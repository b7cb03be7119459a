//! Tier-based listing limits configuration.
//!
//! Defines what a studio listing may show for each membership tier.

use serde::Serialize;

use super::{MembershipTier, StudioType};

/// Listing limits for a membership tier.
///
/// One static record exists per tier; values never change at runtime.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct TierLimits {
    /// The tier these limits apply to.
    pub tier: MembershipTier,
    /// Maximum gallery images.
    pub images_max: u32,
    /// Maximum studio types on the listing. None = unlimited.
    pub studio_types_max: Option<u32>,
    /// Studio types the tier may never carry.
    pub studio_types_excluded: &'static [StudioType],
    /// Whether the phone number is shown publicly.
    pub phone_visibility: bool,
    /// Whether map directions are shown publicly.
    pub directions_visibility: bool,
}

static BASIC_LIMITS: TierLimits = TierLimits {
    tier: MembershipTier::Basic,
    images_max: 2,
    studio_types_max: Some(1),
    studio_types_excluded: &[StudioType::Voiceover],
    phone_visibility: false,
    directions_visibility: false,
};

static PREMIUM_LIMITS: TierLimits = TierLimits {
    tier: MembershipTier::Premium,
    images_max: 25,
    studio_types_max: None,
    studio_types_excluded: &[],
    phone_visibility: true,
    directions_visibility: true,
};

impl TierLimits {
    /// Get the limits for a specific tier.
    ///
    /// # Tier Configuration
    ///
    /// | Tier | Images | Studio types | Excluded | Phone | Directions |
    /// |------|--------|--------------|----------|-------|------------|
    /// | Basic | 2 | 1 | VOICEOVER | No | No |
    /// | Premium | 25 | Unlimited | - | Yes | Yes |
    pub fn for_tier(tier: MembershipTier) -> &'static TierLimits {
        match tier {
            MembershipTier::Basic => &BASIC_LIMITS,
            MembershipTier::Premium => &PREMIUM_LIMITS,
        }
    }

    /// Check if the image limit has been reached.
    pub fn image_limit_reached(&self, current_images: u32) -> bool {
        current_images >= self.images_max
    }

    /// Check if the tier forbids a studio type outright.
    pub fn excludes(&self, studio_type: &StudioType) -> bool {
        self.studio_types_excluded.contains(studio_type)
    }
}
