//! Studio repository port (profile-edit write side).

use crate::domain::foundation::{DomainError, StudioId};
use crate::domain::studio::StudioListing;
use async_trait::async_trait;

/// Repository port for studio listings.
#[async_trait]
pub trait StudioRepository: Send + Sync {
    /// Find a listing by ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &StudioId) -> Result<Option<StudioListing>, DomainError>;

    /// Replace the listing's studio types.
    ///
    /// # Errors
    ///
    /// - `StudioNotFound` if the listing doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update_studio_types(&self, listing: &StudioListing) -> Result<(), DomainError>;
}
