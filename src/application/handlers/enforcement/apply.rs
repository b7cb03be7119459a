//! Apply step for enforcement decisions.

use crate::domain::foundation::DomainError;
use crate::domain::studio::{EnforcementBatches, EnforcementDecision, EnforcementSummary};
use crate::ports::StudioEnforcementWriter;

/// Writes `decisions` through `writer`, one batch per target field.
///
/// Empty batches are skipped. The two batches are not wrapped in a shared
/// transaction; if the second fails the first stays applied and a rerun
/// finishes the job, since the writer only touches rows still needing it.
pub async fn apply_enforcement_decisions(
    writer: &dyn StudioEnforcementWriter,
    decisions: &[EnforcementDecision],
) -> Result<EnforcementSummary, DomainError> {
    let batches = EnforcementBatches::from_decisions(decisions);
    let mut summary = EnforcementSummary::default();

    if batches.is_empty() {
        tracing::debug!("No enforcement changes to apply");
        return Ok(summary);
    }

    if !batches.deactivate.is_empty() {
        summary.status_updates = writer.deactivate_studios(&batches.deactivate).await?;
        tracing::info!(
            requested = batches.deactivate.len(),
            updated = summary.status_updates,
            "Deactivated studios with lapsed memberships"
        );
    }

    if !batches.unfeature.is_empty() {
        summary.unfeatured_updates = writer.unfeature_studios(&batches.unfeature).await?;
        tracing::info!(
            requested = batches.unfeature.len(),
            updated = summary.unfeatured_updates,
            "Removed featured placement"
        );
    }

    Ok(summary)
}
