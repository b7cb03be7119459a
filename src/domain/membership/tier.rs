//! Membership tier definitions.
//!
//! Represents the membership levels a studio owner can hold.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::MembershipError;

/// Membership tier.
///
/// Determines listing capabilities (images, studio types, contact details).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MembershipTier {
    /// Free listing.
    /// - 1 studio type, never VOICEOVER
    /// - Phone number and directions hidden
    Basic,

    /// Paid listing.
    /// - Unlimited studio types
    /// - Phone number and directions shown
    Premium,
}

impl MembershipTier {
    /// All known tiers, in rank order.
    pub const ALL: [MembershipTier; 2] = [MembershipTier::Basic, MembershipTier::Premium];

    /// Returns true if this tier is a paid tier.
    pub fn is_paid(&self) -> bool {
        matches!(self, MembershipTier::Premium)
    }

    /// Returns the storage/wire form of this tier.
    pub fn as_str(&self) -> &'static str {
        match self {
            MembershipTier::Basic => "BASIC",
            MembershipTier::Premium => "PREMIUM",
        }
    }

    /// Returns the display name for this tier.
    pub fn display_name(&self) -> &'static str {
        match self {
            MembershipTier::Basic => "Basic",
            MembershipTier::Premium => "Premium",
        }
    }
}

impl FromStr for MembershipTier {
    type Err = MembershipError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "BASIC" => Ok(MembershipTier::Basic),
            "PREMIUM" => Ok(MembershipTier::Premium),
            _ => Err(MembershipError::invalid_tier(s)),
        }
    }
}

impl std::fmt::Display for MembershipTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
