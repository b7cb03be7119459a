//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Membership Ports
//!
//! - `MembershipReader` - Tier lookup for a studio owner
//! - `SubscriptionRepository` - Latest subscription window, renewal writes
//!
//! ## Studio Ports
//!
//! - `StudioRepository` - Listing reads and studio type writes
//! - `StudioProjectionReader` - Enforcement snapshot
//! - `StudioEnforcementWriter` - Batched enforcement writes

mod membership_reader;
mod studio_enforcement;
mod studio_repository;
mod subscription_repository;

pub use membership_reader::MembershipReader;
pub use studio_enforcement::{StudioEnforcementWriter, StudioProjectionReader};
pub use studio_repository::StudioRepository;
pub use subscription_repository::SubscriptionRepository;
