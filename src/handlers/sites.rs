//! Site generation and dashboard HTTP handlers.
//!
//! This module implements the site-related API endpoints:
//! - POST /api/v1/sites/generate - Generate and save a new site
//! - GET /api/v1/sites - List the caller's sites, newest first
//! - GET /api/v1/sites/{id} - Get one of the caller's sites

use crate::{
    app::AppState,
    error::AppError,
    middleware::auth::AuthContext,
    models::business::{GenerateSiteRequest, GenerateSiteResponse},
    models::site::SiteResponse,
    services::site_service,
};
use axum::{
    Extension, Json,
    extract::{Path, State, rejection::JsonRejection},
};
use uuid::Uuid;

/// Generate a website from a business description.
///
/// # Endpoint
///
/// `POST /api/v1/sites/generate`
///
/// # Request Body
///
/// ```json
/// {
///   "formData": {
///     "businessName": "Dan's Barber Shop",
///     "businessType": "Barber Shop",
///     "branding": { "primaryColor": "#059669" },
///     "contact": { "email": "contact@dansbarbers.com", "phone": "555-123-4567" },
///     "services": [{ "name": "Men's Haircut", "price": "45", "duration": "30" }]
///   }
/// }
/// ```
///
/// # Response
///
/// - **Success (200 OK)**: `{ "html": "<!DOCTYPE html>..." }`
/// - **Error (400)**: `invalid-argument`, body unusable or required fields missing
/// - **Error (401)**: `unauthenticated`
/// - **Error (500)**: `internal`, generation or storage failed
pub async fn generate_site(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    payload: Result<Json<GenerateSiteRequest>, JsonRejection>,
) -> Result<Json<GenerateSiteResponse>, AppError> {
    let Json(request) = payload.map_err(|rejection| AppError::InvalidArgument(rejection.body_text()))?;

    let form_data = request.form_data.ok_or_else(|| {
        AppError::InvalidArgument(
            "The request must include a 'formData' object.".to_string(),
        )
    })?;

    tracing::info!("Generation requested by {}", auth.user_id);

    let html = site_service::generate_site(
        state.generator.as_ref(),
        state.store.as_ref(),
        &auth.user_id,
        form_data,
    )
    .await?;

    Ok(Json(GenerateSiteResponse { html }))
}

/// List all sites generated by the caller.
///
/// # Endpoint
///
/// `GET /api/v1/sites`
///
/// # Ordering
///
/// Newest first, by `createdAt`.
///
/// # Response
///
/// - **Success (200 OK)**: array of sites (may be empty)
/// - **Error (500)**: "Failed to load your websites."
pub async fn list_sites(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<Vec<SiteResponse>>, AppError> {
    let sites = site_service::list_sites(state.store.as_ref(), &auth.user_id).await?;

    Ok(Json(sites.into_iter().map(Into::into).collect()))
}

/// Get one site, e.g. to preview it from the dashboard.
///
/// Returns 404 if the site doesn't exist OR belongs to another user.
pub async fn get_site(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(site_id): Path<Uuid>,
) -> Result<Json<SiteResponse>, AppError> {
    let site = site_service::get_site(state.store.as_ref(), &auth.user_id, site_id).await?;

    Ok(Json(site.into()))
}
