//! Repository implementations for database entities.
//!
//! Each repository implements a store trait, so the service layer can be
//! exercised against in-memory stand-ins.

pub mod listing;
pub mod user;

pub use listing::{ListingRepository, ListingStore};
pub use user::{UserRepository, UserStore};
