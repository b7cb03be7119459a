//! Studio Directory - Membership core for a recording studio listing site
//!
//! This crate implements tier limits, studio type rules, membership renewals
//! and the enforcement pass that deactivates and unfeatures listings whose
//! owners' memberships have lapsed.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
