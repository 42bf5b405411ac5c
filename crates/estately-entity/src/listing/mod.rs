//! Listing domain entities.

pub mod category;
pub mod filter;
pub mod model;

pub use category::{ListingIntent, PriceUnit, PropertyType};
pub use filter::{ListingFilter, ListingSort, ListingSortField};
pub use model::{CreateListing, Listing, ListingWithSeller, UpdateListing};
