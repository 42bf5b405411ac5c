//! # estately-service
//!
//! Business logic for the classifieds platform. Services own the
//! ordering of repository and storage calls; handlers in the API crate
//! stay thin and only translate HTTP to service calls.

pub mod auth;
pub mod context;
pub mod listing;

pub use auth::AuthService;
pub use context::RequestContext;
pub use listing::ListingService;
