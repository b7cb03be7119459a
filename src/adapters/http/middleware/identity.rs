//! Caller identity middleware and extractor for axum.
//!
//! Authentication happens at the gateway in front of this service. The
//! gateway forwards the caller as headers:
//!
//! - `x-user-id` - the caller's user UUID
//! - `x-user-role` - `admin` for staff, absent otherwise
//!
//! ```text
//! Request → identity_middleware → injects AuthenticatedUser into extensions
//!                                          ↓
//!                                  Handler → RequireAuth extractor reads from extensions
//! ```
//!
//! # Example
//!
//! ```ignore
//! let app = Router::new()
//!     .route("/membership/renewal", post(renew))
//!     .layer(middleware::from_fn(identity_middleware));
//!
//! async fn renew(RequireAuth(user): RequireAuth) -> String {
//!     user.user_id.to_string()
//! }
//! ```

use axum::{
    extract::Request,
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::domain::foundation::UserId;

/// Header carrying the caller's user id.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Header carrying the caller's role.
pub const USER_ROLE_HEADER: &str = "x-user-role";

/// The caller, as forwarded by the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub is_admin: bool,
}

impl AuthenticatedUser {
    /// Reads the caller from gateway headers.
    ///
    /// Returns `Ok(None)` when no identity was forwarded and an error when
    /// one was forwarded but is malformed.
    fn from_headers(headers: &HeaderMap) -> Result<Option<Self>, AuthRejection> {
        let Some(raw) = headers.get(USER_ID_HEADER) else {
            return Ok(None);
        };

        let user_id = raw
            .to_str()
            .ok()
            .and_then(|s| s.trim().parse::<UserId>().ok())
            .ok_or(AuthRejection::MalformedIdentity)?;

        let is_admin = headers
            .get(USER_ROLE_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(|role| role.eq_ignore_ascii_case("admin"))
            .unwrap_or(false);

        Ok(Some(Self { user_id, is_admin }))
    }
}

/// Middleware that turns gateway identity headers into an `AuthenticatedUser`.
///
/// Requests without identity continue unauthenticated; handlers use
/// `RequireAuth` to demand one. A malformed identity is rejected with 401.
pub async fn identity_middleware(mut request: Request, next: Next) -> Response {
    match AuthenticatedUser::from_headers(request.headers()) {
        Ok(Some(user)) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Ok(None) => next.run(request).await,
        Err(rejection) => {
            tracing::warn!("Rejected request with malformed identity header");
            rejection.into_response()
        }
    }
}

/// Extractor that requires an authenticated caller.
///
/// # Example
///
/// ```ignore
/// async fn my_handler(RequireAuth(user): RequireAuth) -> impl IntoResponse {
///     format!("Hello, {}!", user.user_id)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RequireAuth(pub AuthenticatedUser);

impl<S> axum::extract::FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            parts
                .extensions
                .get::<AuthenticatedUser>()
                .cloned()
                .map(RequireAuth)
                .ok_or(AuthRejection::Unauthenticated)
        })
    }
}

/// Rejection type for identity failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthRejection {
    /// No identity was forwarded.
    Unauthenticated,
    /// The identity header was not a valid user id.
    MalformedIdentity,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let (code, message) = match self {
            AuthRejection::Unauthenticated => ("UNAUTHENTICATED", "Authentication required"),
            AuthRejection::MalformedIdentity => ("UNAUTHENTICATED", "Invalid identity header"),
        };

        (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({
                "error_code": code,
                "message": message,
            })),
        )
            .into_response()
    }
}
