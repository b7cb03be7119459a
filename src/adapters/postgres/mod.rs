//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresStudioEnforcement` - Enforcement snapshot and batched writes
//! - `PostgresStudioRepository` - Listing reads and studio type writes
//! - `PostgresSubscriptionRepository` - Latest subscription window, renewals
//! - `PostgresMembershipReader` - Owner tier lookup

mod membership_reader;
mod rows;
mod studio_enforcement;
mod studio_repository;
mod subscription_repository;

pub use membership_reader::PostgresMembershipReader;
pub use studio_enforcement::PostgresStudioEnforcement;
pub use studio_repository::PostgresStudioRepository;
pub use subscription_repository::PostgresSubscriptionRepository;
