//! Generated site records and their API representation.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Represents a generated site record from the database.
///
/// # Database Table
///
/// Maps to the `generated_sites` table. Each record:
/// - Belongs to exactly one user (via `owner_id`)
/// - Is written once per successful generation and never updated
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct GeneratedSite {
    /// Opaque identifier generated by the service
    pub id: Uuid,

    /// Subject of the identity token that created this site
    ///
    /// Every query filters by `owner_id` so users only ever see their own sites.
    pub owner_id: String,

    /// The `formData` object exactly as the caller submitted it
    pub form_data: serde_json::Value,

    /// Sanitized HTML document returned by the generative service
    pub generated_html: String,

    /// Server-assigned write timestamp
    pub created_at: DateTime<Utc>,

    /// Reserved for a future payment flow; always false on creation
    pub is_paid: bool,
}

/// Fields supplied by the service when persisting a new site.
///
/// `created_at` and `is_paid` are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewGeneratedSite {
    pub id: Uuid,
    pub owner_id: String,
    pub form_data: serde_json::Value,
    pub generated_html: String,
}

impl NewGeneratedSite {
    pub fn new(owner_id: &str, form_data: serde_json::Value, generated_html: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_id: owner_id.to_string(),
            form_data,
            generated_html,
        }
    }
}

/// Response body for site endpoints.
///
/// ```json
/// {
///   "id": "550e8400-e29b-41d4-a716-446655440000",
///   "formData": { "businessName": "Dan's Barber Shop", "...": "..." },
///   "generatedHtml": "<!DOCTYPE html>...</html>",
///   "createdAt": "2025-12-20T10:00:00Z",
///   "isPaid": false
/// }
/// ```
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteResponse {
    pub id: Uuid,
    pub form_data: serde_json::Value,
    pub generated_html: String,
    pub created_at: DateTime<Utc>,
    pub is_paid: bool,
}

/// Removes the internal `owner_id` field.
impl From<GeneratedSite> for SiteResponse {
    fn from(site: GeneratedSite) -> Self {
        Self {
            id: site.id,
            form_data: site.form_data,
            generated_html: site.generated_html,
            created_at: site.created_at,
            is_paid: site.is_paid,
        }
    }
}
