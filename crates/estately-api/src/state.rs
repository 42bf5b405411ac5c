//! Application state shared across all handlers.

use std::sync::Arc;

use estately_auth::jwt::decoder::TokenDecoder;
use estately_core::config::AppConfig;
use estately_core::traits::ImageStore;
use estately_database::DatabasePool;
use estately_service::{AuthService, ListingService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. All fields are
/// `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Database pool, used directly only by the health check.
    pub db: DatabasePool,
    /// Image store, used directly only by the health check.
    pub image_store: Arc<dyn ImageStore>,
    /// Session token validator.
    pub token_decoder: Arc<TokenDecoder>,
    /// Account service.
    pub auth_service: Arc<AuthService>,
    /// Listing service.
    pub listing_service: Arc<ListingService>,
}
