//! Enforcement handlers.
//!
//! Deactivation and unfeaturing of listings whose owners' memberships have
//! lapsed. Decisions come from `domain::studio`; this module loads the
//! snapshot and writes the results.

mod apply;
mod run_enforcement;

pub use apply::apply_enforcement_decisions;
pub use run_enforcement::{RunEnforcementCommand, RunEnforcementHandler, RunEnforcementResult};
