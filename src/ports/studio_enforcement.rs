//! Ports used by membership enforcement runs.
//!
//! Enforcement reads a snapshot through [`StudioProjectionReader`], decides in
//! pure code, then writes through [`StudioEnforcementWriter`].
//!
//! # Design
//!
//! - **Batched writes**: one statement per target field, keyed by a list of ids
//! - **Re-checking writes**: implementations only touch rows the change still
//!   applies to, so a stale or repeated batch is a no-op
//! - **No cross-batch transaction**: each batch is atomic on its own

use crate::domain::foundation::{DomainError, StudioId};
use crate::domain::studio::StudioProjection;
use async_trait::async_trait;

/// Loads listings that may need enforcement.
#[async_trait]
pub trait StudioProjectionReader: Send + Sync {
    /// Load every listing that is active or featured, with the owner's
    /// most-recently-created subscription window.
    async fn load_enforcement_candidates(&self) -> Result<Vec<StudioProjection>, DomainError>;
}

/// Applies enforcement decisions in batches.
#[async_trait]
pub trait StudioEnforcementWriter: Send + Sync {
    /// Set status to `INACTIVE` for the given listings that are still active
    /// and whose owner's latest subscription has still lapsed.
    ///
    /// Returns the number of rows changed.
    async fn deactivate_studios(&self, ids: &[StudioId]) -> Result<u64, DomainError>;

    /// Clear the featured flag and `featured_until` for the given listings
    /// that are still featured and whose feature or owner subscription has
    /// still expired.
    ///
    /// Returns the number of rows changed.
    async fn unfeature_studios(&self, ids: &[StudioId]) -> Result<u64, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enforcement_ports_are_object_safe() {
        fn _accepts_reader(_reader: &dyn StudioProjectionReader) {}
        fn _accepts_writer(_writer: &dyn StudioEnforcementWriter) {}
    }
}
