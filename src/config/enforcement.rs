//! Enforcement run configuration

use serde::Deserialize;

use super::error::ValidationError;

const MAX_LOG_LIMIT: usize = 1000;

/// Settings for membership enforcement passes
#[derive(Debug, Clone, Deserialize)]
pub struct EnforcementConfig {
    /// Report decisions without writing them. The `--dry-run` flag also
    /// forces this on.
    #[serde(default)]
    pub dry_run: bool,

    /// Individual decisions logged per pass
    #[serde(default = "default_batch_log_limit")]
    pub batch_log_limit: usize,
}

impl EnforcementConfig {
    /// Validate enforcement configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.batch_log_limit > MAX_LOG_LIMIT {
            return Err(ValidationError::LogLimitTooLarge);
        }
        Ok(())
    }
}

impl Default for EnforcementConfig {
    fn default() -> Self {
        Self {
            dry_run: false,
            batch_log_limit: default_batch_log_limit(),
        }
    }
}

fn default_batch_log_limit() -> usize {
    20
}
