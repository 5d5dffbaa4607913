//! Application configuration management.
//!
//! This module handles loading configuration from environment variables.
//! It uses the `envy` crate to automatically deserialize environment variables into a type-safe struct.

use serde::Deserialize;

/// Application configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `DATABASE_URL` (required): PostgreSQL connection string
/// - `SERVER_PORT` (optional): HTTP server port, defaults to 3000
/// - `GEMINI_API_KEY` (required): API key for the generative text service
/// - `GEMINI_MODEL` (optional): model name, defaults to `gemini-pro`
/// - `GEMINI_BASE_URL` (optional): API root, defaults to the public Google endpoint
/// - `GENERATION_TIMEOUT_SECS` (optional): per-call timeout, defaults to 120
/// - `IDENTITY_JWT_SECRET` (required): HMAC secret shared with the identity provider
/// - `IDENTITY_ISSUER` / `IDENTITY_AUDIENCE` (optional): expected `iss` / `aud` claims
/// - `CORS_ALLOWED_ORIGIN` (optional): origin of the web client, any origin if unset
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: String,

    #[serde(default = "default_port")]
    pub server_port: u16,

    pub gemini_api_key: String,

    #[serde(default = "default_model")]
    pub gemini_model: String,

    #[serde(default = "default_base_url")]
    pub gemini_base_url: String,

    #[serde(default = "default_timeout")]
    pub generation_timeout_secs: u64,

    pub identity_jwt_secret: String,

    pub identity_issuer: Option<String>,

    pub identity_audience: Option<String>,

    pub cors_allowed_origin: Option<String>,
}

/// Default port if SERVER_PORT environment variable is not set.
fn default_port() -> u16 {
    3000
}

fn default_model() -> String {
    "gemini-pro".to_string()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

/// Generation calls routinely take tens of seconds for a full page.
fn default_timeout() -> u64 {
    120
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// This method first attempts to load a `.env` file (which is optional),
    /// then reads environment variables and deserializes them into a Config struct.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Required environment variables are missing (e.g., DATABASE_URL)
    /// - Environment variable values cannot be parsed into expected types
    pub fn from_env() -> Result<Self, envy::Error> {
        // Try to load .env file if it exists (does nothing if not found)
        dotenvy::dotenv().ok();

        // Field names are automatically converted: database_url -> DATABASE_URL
        envy::from_env::<Config>()
    }
}
