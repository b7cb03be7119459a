//! Axum router configuration for membership and listing endpoints.

use std::time::Duration;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::adapters::http::middleware::identity_middleware;

use super::handlers::{
    get_renewal_options, get_tier_limits, renew_membership, run_enforcement, update_studio_types,
    MembershipAppState,
};

/// Membership routes.
///
/// - `GET /limits/:tier` - Listing limits for a tier (public)
/// - `GET /renewal/options` - Renewal products for the caller
/// - `POST /renewal` - Renew the caller's membership
pub fn membership_routes() -> Router<MembershipAppState> {
    Router::new()
        .route("/limits/:tier", get(get_tier_limits))
        .route("/renewal/options", get(get_renewal_options))
        .route("/renewal", post(renew_membership))
}

/// Listing routes.
///
/// - `PUT /:id/types` - Replace a listing's studio types (owner only)
pub fn studio_routes() -> Router<MembershipAppState> {
    Router::new().route("/:id/types", put(update_studio_types))
}

/// Admin routes.
///
/// - `POST /enforcement/run` - Run an enforcement pass
pub fn admin_routes() -> Router<MembershipAppState> {
    Router::new().route("/enforcement/run", post(run_enforcement))
}

/// Create the complete router.
///
/// Identity is read from gateway headers on every request; handlers decide
/// whether they need it.
///
/// # Example
///
/// ```ignore
/// let app = membership_router(Duration::from_secs(30)).with_state(app_state);
/// axum::serve(listener, app).await?;
/// ```
pub fn membership_router(request_timeout: Duration) -> Router<MembershipAppState> {
    Router::new()
        .nest("/membership", membership_routes())
        .nest("/studios", studio_routes())
        .nest("/admin", admin_routes())
        .layer(middleware::from_fn(identity_middleware))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
}
