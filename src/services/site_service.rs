//! Site generation and dashboard reads.
//!
//! The generator and store are passed in explicitly so handlers use the
//! production clients and tests use doubles.

use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::business::{BusinessDescription, check_form_data};
use crate::models::site::{GeneratedSite, NewGeneratedSite};
use crate::services::generator::SiteGenerator;
use crate::services::site_store::SiteStore;
use crate::services::{prompt, sanitize};

/// Parse and validate `formData` into a typed description.
///
/// # Errors
///
/// - `InvalidArgument` if `formData` is not a JSON object, or an optional
///   section (`contact`, `services`) has the wrong shape
/// - `Validation` listing every missing, blank or wrongly typed required field
pub fn validate_form_data(form_data: &serde_json::Value) -> Result<BusinessDescription, AppError> {
    if !form_data.is_object() {
        return Err(AppError::InvalidArgument(
            "formData must be a JSON object".to_string(),
        ));
    }

    check_form_data(form_data)?;

    BusinessDescription::deserialize(form_data)
        .map_err(|e| AppError::InvalidArgument(format!("formData is malformed: {}", e)))
}

/// Generate a site for `owner_id` and persist it.
///
/// # Process
///
/// 1. Validate `formData` (before any external call)
/// 2. Build the prompt
/// 3. Call the generative service once
/// 4. Strip code fences and check the result is an HTML document
/// 5. Write one record holding `formData` verbatim
/// 6. Return the stored HTML
///
/// Nothing is retried. Any failure aborts the request and nothing is written.
pub async fn generate_site(
    generator: &dyn SiteGenerator,
    store: &dyn SiteStore,
    owner_id: &str,
    form_data: serde_json::Value,
) -> Result<String, AppError> {
    let description = validate_form_data(&form_data)?;

    let prompt = prompt::build_prompt(&description);
    tracing::debug!(
        "Generating site for {} ({} chars of prompt)",
        description.business_name(),
        prompt.len()
    );

    let raw = generator.generate(&prompt).await?;

    let html = sanitize::strip_code_fences(&raw);
    sanitize::ensure_html_document(&html)?;

    let site = store
        .insert_site(NewGeneratedSite::new(owner_id, form_data, html))
        .await
        .map_err(AppError::SaveFailed)?;

    tracing::info!(
        "Stored generated site {} for user {} ({} bytes)",
        site.id,
        owner_id,
        site.generated_html.len()
    );

    Ok(site.generated_html)
}

/// All sites owned by `owner_id`, newest first.
pub async fn list_sites(
    store: &dyn SiteStore,
    owner_id: &str,
) -> Result<Vec<GeneratedSite>, AppError> {
    store.list_sites(owner_id).await.map_err(AppError::LoadFailed)
}

/// One site owned by `owner_id`.
///
/// Sites owned by someone else are reported as not found.
pub async fn get_site(
    store: &dyn SiteStore,
    owner_id: &str,
    site_id: Uuid,
) -> Result<GeneratedSite, AppError> {
    store
        .get_site(owner_id, site_id)
        .await
        .map_err(AppError::LoadFailed)?
        .ok_or(AppError::SiteNotFound)
}
