//! Error types and HTTP error response handling.
//!
//! This module defines all application errors and how they are converted
//! into HTTP responses with appropriate status codes and JSON bodies.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::models::business::ValidationErrors;
use crate::services::generator::GenerationError;

/// Message returned for every failure after validation has passed.
///
/// Upstream and storage details are logged, never sent to the caller.
const GENERATION_FAILED: &str =
    "An unexpected error occurred while generating the website. Please try again later.";

/// Application-wide error type.
///
/// Every variant surfaces to the caller as one of a small set of categories:
/// `unauthenticated`, `invalid-argument`, `not-found`, or `internal`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// No verified identity is attached to the request.
    ///
    /// Returns HTTP 401 Unauthorized.
    #[error("You must be logged in to perform this action.")]
    Unauthenticated,

    /// Request body is not usable at all (malformed JSON, missing `formData`).
    ///
    /// Returns HTTP 400 Bad Request.
    #[error("{0}")]
    InvalidArgument(String),

    /// `formData` parsed but required fields are missing.
    ///
    /// Returns HTTP 400 Bad Request with every violation listed.
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    /// The generative text service failed or could not be reached.
    #[error("Generation failed: {0}")]
    Generation(#[from] GenerationError),

    /// The generative service answered with something that is not an HTML document.
    #[error("AI returned invalid HTML format")]
    MalformedHtml,

    /// Writing the generated site failed.
    #[error("Failed to save generated site: {0}")]
    SaveFailed(#[source] sqlx::Error),

    /// Reading the dashboard listing failed.
    #[error("Failed to load websites: {0}")]
    LoadFailed(#[source] sqlx::Error),

    /// Requested site does not exist or belongs to someone else.
    ///
    /// Returns HTTP 404 Not Found.
    #[error("Website not found")]
    SiteNotFound,

    /// Any other database failure (health check).
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl AppError {
    /// Category code sent to the caller.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Unauthenticated => "unauthenticated",
            AppError::InvalidArgument(_) | AppError::Validation(_) => "invalid-argument",
            AppError::SiteNotFound => "not-found",
            AppError::Generation(_)
            | AppError::MalformedHtml
            | AppError::SaveFailed(_)
            | AppError::LoadFailed(_)
            | AppError::Database(_) => "internal",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AppError::InvalidArgument(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::SiteNotFound => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Convert AppError into an HTTP response.
///
/// # Response Format
///
/// ```json
/// {
///   "error": {
///     "code": "invalid-argument",
///     "message": "formData is invalid: businessName is required",
///     "violations": [{ "field": "businessName", "message": "is required" }]
///   }
/// }
/// ```
///
/// `violations` is only present for validation failures. Internal errors are
/// logged in full and answered with a generic message.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();

        let mut error = match &self {
            AppError::Generation(_)
            | AppError::MalformedHtml
            | AppError::SaveFailed(_) => {
                tracing::error!("Error generating website: {}", self);
                json!({ "code": code, "message": GENERATION_FAILED })
            }
            AppError::LoadFailed(_) => {
                tracing::error!("Error fetching websites: {}", self);
                json!({ "code": code, "message": "Failed to load your websites." })
            }
            AppError::Database(_) => {
                tracing::error!("{}", self);
                json!({ "code": code, "message": "An internal error occurred" })
            }
            _ => json!({ "code": code, "message": self.to_string() }),
        };

        if let AppError::Validation(errors) = &self {
            error["violations"] = json!(errors.violations);
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}
