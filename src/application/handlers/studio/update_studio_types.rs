//! UpdateStudioTypesHandler - Profile edit of a listing's studio types.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::foundation::{StudioId, Timestamp, UserId};
use crate::domain::membership::{MembershipError, MembershipTier, StudioType};
use crate::domain::studio::StudioTypeChange;
use crate::ports::{MembershipReader, StudioRepository};

/// Command to replace a listing's studio types.
#[derive(Debug, Clone)]
pub struct UpdateStudioTypesCommand {
    pub studio_id: StudioId,
    pub user_id: UserId,
    /// Tags in the order the owner submitted them.
    pub studio_types: Vec<StudioType>,
}

/// Result of a studio types update.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateStudioTypesResult {
    pub studio_id: StudioId,
    pub tier: MembershipTier,
    #[serde(flatten)]
    pub change: StudioTypeChange,
}

/// Handler for studio type edits.
///
/// The owner's tier decides what survives. Owners without a tier on record
/// are treated as BASIC.
pub struct UpdateStudioTypesHandler {
    studios: Arc<dyn StudioRepository>,
    memberships: Arc<dyn MembershipReader>,
}

impl UpdateStudioTypesHandler {
    pub fn new(
        studios: Arc<dyn StudioRepository>,
        memberships: Arc<dyn MembershipReader>,
    ) -> Self {
        Self {
            studios,
            memberships,
        }
    }

    pub async fn handle(
        &self,
        cmd: UpdateStudioTypesCommand,
    ) -> Result<UpdateStudioTypesResult, MembershipError> {
        let mut listing = self
            .studios
            .find_by_id(&cmd.studio_id)
            .await?
            .ok_or(MembershipError::StudioNotFound(cmd.studio_id))?;

        if listing.owner_id != cmd.user_id {
            return Err(MembershipError::not_studio_owner(cmd.studio_id, cmd.user_id));
        }

        let tier = self
            .memberships
            .get_tier(&listing.owner_id)
            .await?
            .unwrap_or(MembershipTier::Basic);

        let change = listing.apply_studio_types(&cmd.studio_types, tier, Timestamp::now());
        self.studios.update_studio_types(&listing).await?;

        if !change.dropped.is_empty() {
            tracing::info!(
                studio_id = %cmd.studio_id,
                tier = %tier,
                dropped = ?change.dropped,
                "Studio types trimmed to tier limits"
            );
        }

        Ok(UpdateStudioTypesResult {
            studio_id: cmd.studio_id,
            tier,
            change,
        })
    }
}
