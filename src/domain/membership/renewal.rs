//! Membership renewal products and their date arithmetic.
//!
//! Two products exist:
//!
//! - **Early renewal**: extends a still-valid membership by one year plus a
//!   30-day bonus. Only offered while at least 30 days remain.
//! - **5-year renewal**: adds five years to whichever is later, now or the
//!   current expiry.
//!
//! All day arithmetic uses fixed 24-hour days, never calendar years.
//! Callers must run [`validate_renewal_request`] before either calculator.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::Timestamp;

use super::MembershipError;

/// Days added by a one-year renewal.
pub const RENEWAL_DAYS: i64 = 365;

/// Bonus days granted by an early renewal.
pub const EARLY_RENEWAL_BONUS_DAYS: i64 = 30;

/// Days added by a 5-year renewal.
pub const FIVE_YEAR_RENEWAL_DAYS: i64 = 1825;

/// Minimum days that must remain for early renewal.
pub const EARLY_RENEWAL_MIN_DAYS_REMAINING: i64 = 30;

/// Renewal product offered to an existing member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RenewalType {
    #[serde(rename = "early")]
    Early,
    #[serde(rename = "5year")]
    FiveYear,
}

impl RenewalType {
    /// All renewal products, in display order.
    pub const ALL: [RenewalType; 2] = [RenewalType::Early, RenewalType::FiveYear];

    /// Returns the request/wire form.
    pub fn as_str(&self) -> &'static str {
        match self {
            RenewalType::Early => "early",
            RenewalType::FiveYear => "5year",
        }
    }
}

impl FromStr for RenewalType {
    type Err = MembershipError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "early" => Ok(RenewalType::Early),
            "5year" => Ok(RenewalType::FiveYear),
            other => Err(MembershipError::invalid_renewal_type(other)),
        }
    }
}

impl fmt::Display for RenewalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// New expiry for an early renewal: `current_expiry + 395 days`.
///
/// There is no fallback for a member without an expiry. Early renewal is
/// only offered to members who already have one, and the caller must check.
pub fn calculate_early_renewal_expiry(current_expiry: Timestamp) -> Timestamp {
    current_expiry.add_days(RENEWAL_DAYS + EARLY_RENEWAL_BONUS_DAYS)
}

/// New expiry for a 5-year renewal, measured from the current moment.
pub fn calculate_five_year_renewal_expiry(current_expiry: Option<Timestamp>) -> Timestamp {
    calculate_five_year_renewal_expiry_at(current_expiry, Timestamp::now())
}

/// New expiry for a 5-year renewal relative to `now`.
///
/// Extends from the current expiry while it is strictly in the future,
/// otherwise from `now`.
pub fn calculate_five_year_renewal_expiry_at(
    current_expiry: Option<Timestamp>,
    now: Timestamp,
) -> Timestamp {
    let base = match current_expiry {
        Some(expiry) if expiry.is_after(&now) => expiry,
        _ => now,
    };
    base.add_days(FIVE_YEAR_RENEWAL_DAYS)
}

/// Whether enough time remains for an early renewal (30 days, inclusive).
pub fn is_eligible_for_early_renewal(days_remaining: i64) -> bool {
    days_remaining >= EARLY_RENEWAL_MIN_DAYS_REMAINING
}

/// Days until `expiry`, rounded up. Negative once expired.
pub fn calculate_days_until_expiry(expiry: Timestamp) -> i64 {
    calculate_days_until_expiry_at(expiry, Timestamp::now())
}

/// Days from `now` until `expiry`, rounded up.
pub fn calculate_days_until_expiry_at(expiry: Timestamp, now: Timestamp) -> i64 {
    expiry.days_until_from(&now)
}

/// Gate every renewal request must pass before an expiry is calculated.
///
/// Rejects unknown renewal types and early renewals with fewer than 30 days
/// remaining. The error's `message()` is suitable for showing to the member.
pub fn validate_renewal_request(
    renewal_type: &str,
    days_remaining: i64,
) -> Result<RenewalType, MembershipError> {
    let renewal_type: RenewalType = renewal_type.parse()?;

    if renewal_type == RenewalType::Early && !is_eligible_for_early_renewal(days_remaining) {
        return Err(MembershipError::early_renewal_ineligible(days_remaining));
    }

    Ok(renewal_type)
}

/// Price of a renewal product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RenewalPrice {
    /// Amount in pence.
    pub amount_pence: i64,
    /// ISO 4217 currency code.
    pub currency: &'static str,
    /// Display form of the amount.
    pub formatted: &'static str,
    /// Marketing savings figure, if the product advertises one.
    ///
    /// This is a configured display string, not derived from `amount_pence`.
    pub savings: Option<&'static str>,
}

impl RenewalPrice {
    /// Static price lookup.
    pub fn for_type(renewal_type: RenewalType) -> Self {
        match renewal_type {
            RenewalType::Early => Self {
                amount_pence: 2_500,
                currency: "GBP",
                formatted: "£25",
                savings: None,
            },
            RenewalType::FiveYear => Self {
                amount_pence: 8_000,
                currency: "GBP",
                formatted: "£80",
                savings: Some("£45"),
            },
        }
    }
}

/// Day counts shown to a member before they confirm a renewal.
///
/// `total` is the length of the period being added. It does not include
/// `current`, which only echoes the days the member already has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RenewalBreakdown {
    pub current: i64,
    pub added: i64,
    pub bonus: i64,
    pub total: i64,
}

impl RenewalBreakdown {
    pub fn for_renewal(days_remaining: i64, renewal_type: RenewalType) -> Self {
        let (added, bonus) = match renewal_type {
            RenewalType::Early => (RENEWAL_DAYS, EARLY_RENEWAL_BONUS_DAYS),
            RenewalType::FiveYear => (FIVE_YEAR_RENEWAL_DAYS, 0),
        };
        Self {
            current: days_remaining,
            added,
            bonus,
            total: added + bonus,
        }
    }
}
