//! Route definitions for the Estately HTTP API.
//!
//! Routes are mounted at the root. The router receives `AppState` and
//! threads it through every handler via Axum's `State` extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method, header},
    routing::{delete, get, post, put},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use estately_core::config::app::CorsConfig;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let max_body = state.config.server.max_body_bytes as usize;
    let cors = build_cors_layer(&state.config.server.cors);

    Router::new()
        .merge(auth_routes())
        .merge(listing_routes())
        .merge(health_routes())
        .layer(DefaultBodyLimit::max(max_body))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Account endpoints: register, login, logout, me, delete account.
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/auth/me", get(handlers::auth::me))
        .route("/auth/me", delete(handlers::auth::delete_me))
}

/// Listing search and CRUD.
fn listing_routes() -> Router<AppState> {
    Router::new()
        .route("/properties", get(handlers::listing::list))
        .route("/properties", post(handlers::listing::create))
        .route("/properties/mine/all", get(handlers::listing::mine))
        .route("/properties/{id}", get(handlers::listing::get))
        .route("/properties/{id}", put(handlers::listing::update))
        .route("/properties/{id}", delete(handlers::listing::delete))
}

/// Health check (no auth required).
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

/// Build the CORS layer from configuration.
///
/// A wildcard origin disables credentials, so cookie-based sessions only
/// work with an explicit origin list.
fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    let mut cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .max_age(std::time::Duration::from_secs(config.max_age_seconds));

    if config.allowed_origins.contains(&"*".to_string()) {
        cors = cors.allow_origin(Any).allow_headers(Any);
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors = cors
            .allow_origin(origins)
            .allow_headers([header::CONTENT_TYPE])
            .allow_credentials(config.allow_credentials);
    }

    cors
}
