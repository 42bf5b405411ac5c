//! Estately server — real-estate classifieds platform.
//!
//! Entry point that wires all crates together and starts the HTTP server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use estately_core::config::AppConfig;
use estately_core::error::AppError;
use estately_core::result::AppResult;
use estately_core::traits::ImageStore;

#[tokio::main]
async fn main() {
    let env = std::env::var("ESTATELY_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging from configuration.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt().json().with_env_filter(filter).with_target(true).init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function.
async fn run(config: AppConfig) -> AppResult<()> {
    tracing::info!("Starting Estately v{}", env!("CARGO_PKG_VERSION"));

    // Database pool + migrations
    let db = estately_database::DatabasePool::connect(&config.database).await?;
    estately_database::run_migrations(db.pool()).await?;

    // Image store
    let image_store: Arc<dyn ImageStore> =
        Arc::new(estately_storage::LocalMediaStore::new(&config.media).await?);
    tracing::info!(provider = image_store.provider_type(), "Image store ready");

    // Repositories
    let user_repo: Arc<dyn estately_database::UserStore> =
        Arc::new(estately_database::UserRepository::new(db.pool().clone()));
    let listing_repo: Arc<dyn estately_database::ListingStore> =
        Arc::new(estately_database::ListingRepository::new(db.pool().clone()));

    // Auth primitives
    let hasher = Arc::new(estately_auth::password::PasswordHasher::new());
    let token_encoder = Arc::new(estately_auth::jwt::encoder::TokenEncoder::new(&config.auth));
    let token_decoder = Arc::new(estately_auth::jwt::decoder::TokenDecoder::new(&config.auth));

    // Services
    let auth_service = Arc::new(estately_service::AuthService::new(
        Arc::clone(&user_repo),
        Arc::clone(&listing_repo),
        Arc::clone(&image_store),
        Arc::clone(&hasher),
        Arc::clone(&token_encoder),
    ));
    let listing_service = Arc::new(estately_service::ListingService::new(
        Arc::clone(&listing_repo),
        Arc::clone(&user_repo),
        Arc::clone(&image_store),
        config.media.clone(),
    ));

    let addr = format!("{}:{}", config.server.host, config.server.port);

    let state = estately_api::AppState {
        config: Arc::new(config),
        db: db.clone(),
        image_store,
        token_decoder,
        auth_service,
        listing_service,
    };

    let app = estately_api::build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("Estately server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    db.close().await;
    tracing::info!("Estately server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
