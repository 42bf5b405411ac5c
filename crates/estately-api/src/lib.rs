//! # estately-api
//!
//! The HTTP surface of the classifieds platform. Handlers translate
//! requests into service calls and stay free of business logic; errors
//! bubble up as `AppError` and are rendered by its `IntoResponse` impl.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
