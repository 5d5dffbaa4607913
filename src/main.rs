//! Site Builder Service - Main Application Entry Point
//!
//! A REST API that turns a small business's description into a generated
//! single-page website, saves it, and lists a user's saved sites.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **Database**: PostgreSQL with sqlx (async queries)
//! - **Authentication**: Identity provider JWTs (HS256)
//! - **Generation**: Gemini `generateContent` over reqwest
//! - **Format**: JSON requests/responses
//!
//! # Startup Flow
//!
//! 1. Load configuration from environment variables
//! 2. Create database connection pool and run migrations
//! 3. Build the generative service client and token verifier
//! 4. Build HTTP router with routes and middleware
//! 5. Start server on configured port

mod app;
mod config;
mod db;
mod error;
mod handlers;
mod identity;
mod middleware;
mod models;
mod services;
#[cfg(test)]
mod testing;

use std::{sync::Arc, time::Duration};

use anyhow::Context;
use axum::http::HeaderValue;
use tracing_subscriber::EnvFilter;

use crate::{
    app::AppState,
    identity::TokenVerifier,
    services::{generator::GeminiClient, site_store::PgSiteStore},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Reads RUST_LOG (defaults to "info" level)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = config::Config::from_env()?;
    tracing::info!("Configuration loaded");

    let pool = db::create_pool(&config.database_url).await?;
    tracing::info!("Database pool created");

    db::run_migrations(&pool).await?;
    tracing::info!("Database migrations complete");

    let generator = GeminiClient::new(
        &config.gemini_base_url,
        &config.gemini_model,
        config.gemini_api_key.clone(),
        Duration::from_secs(config.generation_timeout_secs),
    )
    .context("Invalid generative service configuration")?;
    tracing::info!("Using model {}", config.gemini_model);

    let verifier = TokenVerifier::new(
        &config.identity_jwt_secret,
        config.identity_issuer.as_deref(),
        config.identity_audience.as_deref(),
    );

    let cors_origin = config
        .cors_allowed_origin
        .as_deref()
        .map(HeaderValue::from_str)
        .transpose()
        .context("CORS_ALLOWED_ORIGIN is not a valid header value")?;

    let state = AppState {
        generator: Arc::new(generator),
        store: Arc::new(PgSiteStore::new(pool)),
        verifier: Arc::new(verifier),
    };
    let app = app::build_router(state, cors_origin);

    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
