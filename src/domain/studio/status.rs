//! Studio listing status.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::domain::foundation::{StateMachine, ValidationError};

/// Whether a studio listing is publicly visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StudioStatus {
    /// Listed in the directory.
    Active,
    /// Hidden from the directory, typically after the owner's membership lapsed.
    Inactive,
}

impl StudioStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StudioStatus::Active => "ACTIVE",
            StudioStatus::Inactive => "INACTIVE",
        }
    }
}

impl FromStr for StudioStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ACTIVE" => Ok(StudioStatus::Active),
            "INACTIVE" => Ok(StudioStatus::Inactive),
            other => Err(ValidationError::invalid_format(
                "studio_status",
                format!("unknown value {}", other),
            )),
        }
    }
}

impl StateMachine for StudioStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use StudioStatus::*;
        matches!(
            (self, target),
            // Membership lapsed
            (Active, Inactive)
            // Payment received again
                | (Inactive, Active)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use StudioStatus::*;
        match self {
            Active => vec![Inactive],
            Inactive => vec![Active],
        }
    }
}
