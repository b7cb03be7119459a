//! HTTP DTOs (Data Transfer Objects) for membership and listing endpoints.
//!
//! These types define the JSON request/response structure of the API.
//! They serve as the boundary between HTTP and the application layer.

use serde::{Deserialize, Serialize};

use crate::application::handlers::{
    GetRenewalOptionsResult, RenewMembershipResult, RenewalOption, RunEnforcementResult,
    UpdateStudioTypesResult,
};
use crate::domain::foundation::Timestamp;
use crate::domain::membership::{RenewalBreakdown, RenewalPrice, TierLimits};
use crate::domain::studio::EnforcementDecision;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to renew the caller's membership.
#[derive(Debug, Clone, Deserialize)]
pub struct RenewMembershipRequest {
    /// `early` or `5year`.
    pub renewal_type: String,
}

/// Request to replace a listing's studio types.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateStudioTypesRequest {
    /// Tags in order of preference.
    pub studio_types: Vec<String>,
}

/// Request to run an enforcement pass.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RunEnforcementRequest {
    #[serde(default)]
    pub dry_run: bool,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Listing limits for a tier.
#[derive(Debug, Clone, Serialize)]
pub struct TierLimitsResponse {
    pub tier: String,
    pub images_max: u32,
    /// Null means unlimited.
    pub studio_types_max: Option<u32>,
    pub studio_types_excluded: Vec<String>,
    pub phone_visibility: bool,
    pub directions_visibility: bool,
}

impl From<&TierLimits> for TierLimitsResponse {
    fn from(limits: &TierLimits) -> Self {
        Self {
            tier: limits.tier.as_str().to_string(),
            images_max: limits.images_max,
            studio_types_max: limits.studio_types_max,
            studio_types_excluded: limits
                .studio_types_excluded
                .iter()
                .map(|t| t.as_str().to_string())
                .collect(),
            phone_visibility: limits.phone_visibility,
            directions_visibility: limits.directions_visibility,
        }
    }
}

/// Price of a renewal product.
#[derive(Debug, Clone, Serialize)]
pub struct PriceResponse {
    pub amount_pence: i64,
    pub currency: String,
    pub formatted: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub savings: Option<String>,
}

impl From<RenewalPrice> for PriceResponse {
    fn from(price: RenewalPrice) -> Self {
        Self {
            amount_pence: price.amount_pence,
            currency: price.currency.to_string(),
            formatted: price.formatted.to_string(),
            savings: price.savings.map(str::to_string),
        }
    }
}

/// Outcome of a renewal.
#[derive(Debug, Clone, Serialize)]
pub struct RenewMembershipResponse {
    pub renewal_type: String,
    pub previous_expiry: Option<Timestamp>,
    pub new_expiry: Timestamp,
    pub price: PriceResponse,
    pub breakdown: RenewalBreakdown,
}

impl From<RenewMembershipResult> for RenewMembershipResponse {
    fn from(result: RenewMembershipResult) -> Self {
        Self {
            renewal_type: result.renewal_type.as_str().to_string(),
            previous_expiry: result.previous_expiry,
            new_expiry: result.new_expiry,
            price: result.price.into(),
            breakdown: result.breakdown,
        }
    }
}

/// One renewal product as offered to the caller.
#[derive(Debug, Clone, Serialize)]
pub struct RenewalOptionResponse {
    pub renewal_type: String,
    pub eligible: bool,
    pub price: PriceResponse,
    pub breakdown: RenewalBreakdown,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_expiry: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl From<RenewalOption> for RenewalOptionResponse {
    fn from(option: RenewalOption) -> Self {
        Self {
            renewal_type: option.renewal_type.as_str().to_string(),
            eligible: option.eligible,
            price: option.price.into(),
            breakdown: option.breakdown,
            new_expiry: option.new_expiry,
            reason: option.reason,
        }
    }
}

/// Renewal products available to the caller.
#[derive(Debug, Clone, Serialize)]
pub struct RenewalOptionsResponse {
    pub current_expiry: Option<Timestamp>,
    pub days_remaining: Option<i64>,
    pub options: Vec<RenewalOptionResponse>,
}

impl From<GetRenewalOptionsResult> for RenewalOptionsResponse {
    fn from(result: GetRenewalOptionsResult) -> Self {
        Self {
            current_expiry: result.current_expiry,
            days_remaining: result.days_remaining,
            options: result.options.into_iter().map(Into::into).collect(),
        }
    }
}

/// Studio types after tier rules were applied.
#[derive(Debug, Clone, Serialize)]
pub struct StudioTypesResponse {
    pub studio_id: String,
    pub tier: String,
    pub studio_types: Vec<String>,
    /// Submitted tags the tier did not allow.
    pub dropped: Vec<String>,
}

impl From<UpdateStudioTypesResult> for StudioTypesResponse {
    fn from(result: UpdateStudioTypesResult) -> Self {
        Self {
            studio_id: result.studio_id.to_string(),
            tier: result.tier.as_str().to_string(),
            studio_types: result.change.kept.into_iter().map(String::from).collect(),
            dropped: result.change.dropped.into_iter().map(String::from).collect(),
        }
    }
}

/// One enforcement decision.
#[derive(Debug, Clone, Serialize)]
pub struct EnforcementDecisionResponse {
    pub studio_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    pub unfeature: bool,
}

impl From<EnforcementDecision> for EnforcementDecisionResponse {
    fn from(decision: EnforcementDecision) -> Self {
        Self {
            studio_id: decision.studio_id.to_string(),
            status: decision.status_update.map(|s| s.as_str().to_string()),
            unfeature: decision.unfeature,
        }
    }
}

/// Outcome of an enforcement pass.
#[derive(Debug, Clone, Serialize)]
pub struct EnforcementRunResponse {
    pub dry_run: bool,
    pub scanned: usize,
    pub status_updates: u64,
    pub unfeatured_updates: u64,
    pub decisions: Vec<EnforcementDecisionResponse>,
}

impl From<RunEnforcementResult> for EnforcementRunResponse {
    fn from(result: RunEnforcementResult) -> Self {
        Self {
            dry_run: result.dry_run,
            scanned: result.scanned,
            status_updates: result.summary.status_updates,
            unfeatured_updates: result.summary.unfeatured_updates,
            decisions: result.decisions.into_iter().map(Into::into).collect(),
        }
    }
}

/// Standard error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub error_code: String,
    /// Human-readable error message.
    pub message: String,
    /// Additional details (optional).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
            details: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::StudioId;
    use crate::domain::membership::{MembershipTier, RenewalType};
    use crate::domain::studio::StudioStatus;

    #[test]
    fn run_enforcement_request_defaults_to_live_run() {
        let req: RunEnforcementRequest = serde_json::from_str("{}").unwrap();
        assert!(!req.dry_run);

        let req: RunEnforcementRequest = serde_json::from_str(r#"{"dry_run": true}"#).unwrap();
        assert!(req.dry_run);
    }

    #[test]
    fn tier_limits_response_serializes_null_for_unlimited() {
        let response = TierLimitsResponse::from(TierLimits::for_tier(MembershipTier::Premium));
        let json = serde_json::to_value(&response).unwrap();
        assert!(json["studio_types_max"].is_null());
        assert_eq!(json["images_max"], 25);
    }

    #[test]
    fn tier_limits_response_lists_exclusions() {
        let response = TierLimitsResponse::from(TierLimits::for_tier(MembershipTier::Basic));
        assert_eq!(response.tier, "BASIC");
        assert_eq!(response.studio_types_excluded, vec!["VOICEOVER".to_string()]);
    }

    #[test]
    fn price_response_omits_missing_savings() {
        let json =
            serde_json::to_string(&PriceResponse::from(RenewalPrice::for_type(RenewalType::Early)))
                .unwrap();
        assert!(!json.contains("savings"));
        assert!(json.contains("£25"));
    }

    #[test]
    fn decision_response_uses_wire_status() {
        let response = EnforcementDecisionResponse::from(EnforcementDecision {
            studio_id: StudioId::new(),
            status_update: Some(StudioStatus::Inactive),
            unfeature: false,
        });
        assert_eq!(response.status.as_deref(), Some("INACTIVE"));
    }

    #[test]
    fn error_response_serializes_without_details_when_none() {
        let json = serde_json::to_string(&ErrorResponse::new("NOT_FOUND", "Not found")).unwrap();
        assert!(!json.contains("details"));
    }
}
