//! HTTP handlers for membership and listing endpoints.
//!
//! These handlers connect Axum routes to application layer command/query handlers.

use std::sync::Arc;

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::{
    GetRenewalOptionsHandler, GetRenewalOptionsQuery, RenewMembershipCommand,
    RenewMembershipHandler, RunEnforcementCommand, RunEnforcementHandler,
    UpdateStudioTypesCommand, UpdateStudioTypesHandler,
};
use crate::domain::foundation::{ErrorCode, StudioId};
use crate::domain::membership::{MembershipError, MembershipTier, StudioType, TierLimits};
use crate::ports::{
    MembershipReader, StudioEnforcementWriter, StudioProjectionReader, StudioRepository,
    SubscriptionRepository,
};

use super::dto::{
    EnforcementRunResponse, ErrorResponse, RenewMembershipRequest, RenewMembershipResponse,
    RenewalOptionsResponse, RunEnforcementRequest, StudioTypesResponse, TierLimitsResponse,
    UpdateStudioTypesRequest,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies.
///
/// Cloned per request; every dependency is behind an `Arc`.
#[derive(Clone)]
pub struct MembershipAppState {
    pub subscription_repository: Arc<dyn SubscriptionRepository>,
    pub studio_repository: Arc<dyn StudioRepository>,
    pub membership_reader: Arc<dyn MembershipReader>,
    pub projection_reader: Arc<dyn StudioProjectionReader>,
    pub enforcement_writer: Arc<dyn StudioEnforcementWriter>,
    /// Upper bound on decisions logged per enforcement pass.
    pub enforcement_log_limit: usize,
}

impl MembershipAppState {
    /// Create handlers on demand from the shared state.
    pub fn renew_membership_handler(&self) -> RenewMembershipHandler {
        RenewMembershipHandler::new(self.subscription_repository.clone())
    }

    pub fn renewal_options_handler(&self) -> GetRenewalOptionsHandler {
        GetRenewalOptionsHandler::new(self.subscription_repository.clone())
    }

    pub fn update_studio_types_handler(&self) -> UpdateStudioTypesHandler {
        UpdateStudioTypesHandler::new(
            self.studio_repository.clone(),
            self.membership_reader.clone(),
        )
    }

    pub fn run_enforcement_handler(&self) -> RunEnforcementHandler {
        RunEnforcementHandler::new(
            self.projection_reader.clone(),
            self.enforcement_writer.clone(),
        )
        .with_log_limit(self.enforcement_log_limit)
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Query Handlers (GET endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// GET /membership/limits/:tier - Listing limits for a tier
pub async fn get_tier_limits(
    Path(tier): Path<String>,
) -> Result<impl IntoResponse, MembershipApiError> {
    let tier: MembershipTier = tier.parse()?;
    Ok(Json(TierLimitsResponse::from(TierLimits::for_tier(tier))))
}

/// GET /membership/renewal/options - Renewal products for the caller
pub async fn get_renewal_options(
    State(state): State<MembershipAppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, MembershipApiError> {
    let handler = state.renewal_options_handler();
    let query = GetRenewalOptionsQuery {
        user_id: user.user_id,
    };

    let result = handler.handle(query).await?;

    Ok(Json(RenewalOptionsResponse::from(result)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Command Handlers (POST/PUT endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// POST /membership/renewal - Renew the caller's membership
pub async fn renew_membership(
    State(state): State<MembershipAppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<RenewMembershipRequest>,
) -> Result<impl IntoResponse, MembershipApiError> {
    let handler = state.renew_membership_handler();
    let cmd = RenewMembershipCommand {
        user_id: user.user_id,
        renewal_type: request.renewal_type,
    };

    let result = handler.handle(cmd).await?;

    Ok(Json(RenewMembershipResponse::from(result)))
}

/// PUT /studios/:id/types - Replace a listing's studio types
pub async fn update_studio_types(
    State(state): State<MembershipAppState>,
    RequireAuth(user): RequireAuth,
    Path(studio_id): Path<String>,
    Json(request): Json<UpdateStudioTypesRequest>,
) -> Result<impl IntoResponse, MembershipApiError> {
    let studio_id: StudioId = studio_id
        .parse()
        .map_err(|_| MembershipError::validation("studio_id", "Must be a valid UUID"))?;

    let handler = state.update_studio_types_handler();
    let cmd = UpdateStudioTypesCommand {
        studio_id,
        user_id: user.user_id,
        studio_types: request
            .studio_types
            .into_iter()
            .map(StudioType::from)
            .collect(),
    };

    let result = handler.handle(cmd).await?;

    Ok(Json(StudioTypesResponse::from(result)))
}

/// POST /admin/enforcement/run - Run an enforcement pass (admin only)
pub async fn run_enforcement(
    State(state): State<MembershipAppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<RunEnforcementRequest>,
) -> Result<impl IntoResponse, MembershipApiError> {
    if !user.is_admin {
        return Err(MembershipError::admin_required(user.user_id).into());
    }

    let handler = state.run_enforcement_handler();

    let result = handler
        .handle(RunEnforcementCommand {
            dry_run: request.dry_run,
        })
        .await?;

    Ok((StatusCode::OK, Json(EnforcementRunResponse::from(result))))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts domain errors to HTTP responses.
#[derive(Debug)]
pub struct MembershipApiError(MembershipError);

impl From<MembershipError> for MembershipApiError {
    fn from(err: MembershipError) -> Self {
        Self(err)
    }
}

impl From<crate::domain::foundation::DomainError> for MembershipApiError {
    fn from(err: crate::domain::foundation::DomainError) -> Self {
        Self(MembershipError::from(err))
    }
}

impl IntoResponse for MembershipApiError {
    fn into_response(self) -> axum::response::Response {
        let code = self.0.code();
        let status = match code {
            ErrorCode::StudioNotFound | ErrorCode::SubscriptionNotFound => StatusCode::NOT_FOUND,
            ErrorCode::Forbidden => StatusCode::FORBIDDEN,
            ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorCode::DatabaseError | ErrorCode::InternalError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            _ => StatusCode::BAD_REQUEST,
        };

        if status.is_server_error() {
            tracing::error!(error = %self.0, "Request failed");
        }

        let body = ErrorResponse::new(code.to_string(), self.0.message());
        (status, Json(body)).into_response()
    }
}
