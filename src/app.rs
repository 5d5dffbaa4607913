//! Shared application state and HTTP router.

use std::sync::Arc;

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware as axum_middleware,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    handlers,
    identity::TokenVerifier,
    middleware,
    services::{generator::SiteGenerator, site_store::SiteStore},
};

/// Dependencies shared by every handler.
///
/// Handlers never construct clients themselves; whatever is placed here is
/// what they use, which is how tests swap in doubles.
#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<dyn SiteGenerator>,
    pub store: Arc<dyn SiteStore>,
    pub verifier: Arc<TokenVerifier>,
}

/// Build the HTTP router.
///
/// `cors_origin` restricts browser access to the web client's origin; `None`
/// allows any origin.
pub fn build_router(state: AppState, cors_origin: Option<HeaderValue>) -> Router {
    // Routes that require a verified identity
    let authenticated_routes = Router::new()
        .route(
            "/api/v1/sites/generate",
            post(handlers::sites::generate_site),
        )
        .route("/api/v1/sites", get(handlers::sites::list_sites))
        .route("/api/v1/sites/{id}", get(handlers::sites::get_site))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::auth_middleware,
        ));

    let allow_origin = match cors_origin {
        Some(origin) => AllowOrigin::exact(origin),
        None => AllowOrigin::from(Any),
    };
    let cors = CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    Router::new()
        // Public routes (no authentication required)
        .route("/health", get(handlers::health::health_check))
        .merge(authenticated_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
