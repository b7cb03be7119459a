//! RunEnforcementHandler - Maintenance command that enforces membership
//! lapses on studio listings.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::foundation::{DomainError, Timestamp};
use crate::domain::studio::{
    compute_enforcement_decisions_at, EnforcementDecision, EnforcementSummary,
};
use crate::ports::{StudioEnforcementWriter, StudioProjectionReader};

use super::apply_enforcement_decisions;

/// Command to run one enforcement pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunEnforcementCommand {
    /// Compute and report decisions without writing them.
    pub dry_run: bool,
}

/// Outcome of an enforcement pass.
#[derive(Debug, Clone, Serialize)]
pub struct RunEnforcementResult {
    pub dry_run: bool,
    /// Listings inspected.
    pub scanned: usize,
    pub decisions: Vec<EnforcementDecision>,
    /// Rows changed. Always zero for a dry run.
    pub summary: EnforcementSummary,
}

/// Handler for enforcement passes.
///
/// Safe to run repeatedly: a second pass over unchanged data finds nothing
/// to do.
pub struct RunEnforcementHandler {
    reader: Arc<dyn StudioProjectionReader>,
    writer: Arc<dyn StudioEnforcementWriter>,
    log_limit: usize,
}

impl RunEnforcementHandler {
    pub fn new(
        reader: Arc<dyn StudioProjectionReader>,
        writer: Arc<dyn StudioEnforcementWriter>,
    ) -> Self {
        Self {
            reader,
            writer,
            log_limit: 20,
        }
    }

    /// Caps how many individual decisions are logged per pass.
    pub fn with_log_limit(mut self, log_limit: usize) -> Self {
        self.log_limit = log_limit;
        self
    }

    pub async fn handle(
        &self,
        cmd: RunEnforcementCommand,
    ) -> Result<RunEnforcementResult, DomainError> {
        self.handle_at(cmd, Timestamp::now()).await
    }

    /// Runs a pass relative to `now`.
    pub async fn handle_at(
        &self,
        cmd: RunEnforcementCommand,
        now: Timestamp,
    ) -> Result<RunEnforcementResult, DomainError> {
        let studios = self.reader.load_enforcement_candidates().await?;
        let decisions = compute_enforcement_decisions_at(&studios, now);

        tracing::info!(
            scanned = studios.len(),
            decisions = decisions.len(),
            dry_run = cmd.dry_run,
            "Computed enforcement decisions"
        );

        for decision in decisions.iter().take(self.log_limit) {
            tracing::debug!(
                studio_id = %decision.studio_id,
                deactivate = decision.status_update.is_some(),
                unfeature = decision.unfeature,
                "Enforcement decision"
            );
        }

        let summary = if cmd.dry_run {
            EnforcementSummary::default()
        } else {
            apply_enforcement_decisions(self.writer.as_ref(), &decisions).await?
        };

        Ok(RunEnforcementResult {
            dry_run: cmd.dry_run,
            scanned: studios.len(),
            decisions,
            summary,
        })
    }
}
