//! Custom Axum extractors.

pub mod auth;
pub mod listing_query;

pub use auth::AuthUser;
pub use listing_query::ListingQueryParams;
