//! Identity token authentication middleware.
//!
//! This middleware intercepts every protected request to:
//! 1. Extract the bearer token from the Authorization header
//! 2. Verify it against the identity provider's secret
//! 3. Inject the caller's identity into the request
//! 4. Reject unauthenticated requests with HTTP 401
//!
//! It runs before body extraction, so a request without identity is rejected
//! before its payload is ever parsed or validated.

use crate::{app::AppState, error::AppError};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

/// Authentication context attached to authenticated requests.
///
/// Handlers extract it with `Extension<AuthContext>`.
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// Account id of the caller; every stored site is keyed under it
    pub user_id: String,
}

/// Bearer token authentication middleware function.
///
/// # Headers
///
/// Expected header format:
/// ```text
/// Authorization: Bearer <identity token>
/// ```
///
/// # Returns
///
/// - `Ok(Response)` if authenticated successfully (calls next handler)
/// - `Err(AppError::Unauthenticated)` otherwise (returns 401)
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(AppError::Unauthenticated)?;

    let identity = state.verifier.verify(token).map_err(|e| {
        tracing::debug!("Rejected identity token: {}", e);
        AppError::Unauthenticated
    })?;

    request.extensions_mut().insert(AuthContext {
        user_id: identity.user_id,
    });

    Ok(next.run(request).await)
}
