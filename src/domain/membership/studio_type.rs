//! Studio type tags and the tier rules applied when a listing's types are
//! written.
//!
//! Rules run in a fixed order, each step feeding the next:
//!
//! 1. Tags the tier excludes are dropped.
//! 2. `VOICEOVER` is exclusive: if it survives alongside anything else, the
//!    selection collapses to `[VOICEOVER]`.
//! 3. The tier's maximum is applied by truncation, first-submitted tags win.
//!
//! Duplicates are not removed here and count against the maximum; callers
//! that care should deduplicate before submitting.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{MembershipTier, TierLimits};

/// Category label a studio listing can carry.
///
/// Unrecognized tags are kept verbatim in [`StudioType::Other`] so that the
/// rules stay total over arbitrary input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StudioType {
    Home,
    Recording,
    Podcast,
    Voiceover,
    VoCoach,
    AudioProducer,
    Other(UnknownTag),
}

/// A tag outside the known set.
///
/// Only built by parsing, so it never holds a known tag's spelling.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnknownTag(String);

impl UnknownTag {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl StudioType {
    /// Returns the storage/wire tag.
    pub fn as_str(&self) -> &str {
        match self {
            StudioType::Home => "HOME",
            StudioType::Recording => "RECORDING",
            StudioType::Podcast => "PODCAST",
            StudioType::Voiceover => "VOICEOVER",
            StudioType::VoCoach => "VO_COACH",
            StudioType::AudioProducer => "AUDIO_PRODUCER",
            StudioType::Other(tag) => tag.as_str(),
        }
    }

    fn known(tag: &str) -> Option<Self> {
        match tag {
            "HOME" => Some(StudioType::Home),
            "RECORDING" => Some(StudioType::Recording),
            "PODCAST" => Some(StudioType::Podcast),
            "VOICEOVER" => Some(StudioType::Voiceover),
            "VO_COACH" => Some(StudioType::VoCoach),
            "AUDIO_PRODUCER" => Some(StudioType::AudioProducer),
            _ => None,
        }
    }
}

impl From<&str> for StudioType {
    fn from(tag: &str) -> Self {
        StudioType::known(tag).unwrap_or_else(|| StudioType::Other(UnknownTag(tag.to_string())))
    }
}

impl From<String> for StudioType {
    fn from(tag: String) -> Self {
        StudioType::known(&tag).unwrap_or(StudioType::Other(UnknownTag(tag)))
    }
}

impl From<StudioType> for String {
    fn from(studio_type: StudioType) -> Self {
        match studio_type {
            StudioType::Other(UnknownTag(tag)) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for StudioType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filters a submitted studio type selection down to what `tier` allows.
///
/// Pure and total: any list is accepted, unrecognized tags pass through
/// unless the tier explicitly excludes them. Applying the result again with
/// the same tier yields the same list.
pub fn enforce_studio_type_rules(submitted: &[StudioType], tier: MembershipTier) -> Vec<StudioType> {
    let limits = TierLimits::for_tier(tier);

    let mut allowed: Vec<StudioType> = submitted
        .iter()
        .filter(|studio_type| !limits.excludes(studio_type))
        .cloned()
        .collect();

    if allowed.len() > 1 && allowed.contains(&StudioType::Voiceover) {
        allowed = vec![StudioType::Voiceover];
    }

    if let Some(max) = limits.studio_types_max {
        allowed.truncate(max as usize);
    }

    allowed
}
