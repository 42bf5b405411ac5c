//! Listing services: search, CRUD, and input validation.

pub mod service;
pub mod validate;

pub use service::{ImageUpload, ListingService};
pub use validate::ListingDraft;
