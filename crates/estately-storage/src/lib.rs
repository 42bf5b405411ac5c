//! # estately-storage
//!
//! Image store implementations for Estately. The [`ImageStore`] trait lives
//! in `estately-core`; this crate provides the local filesystem provider and
//! the pure URL-to-resource-id mapping used by delete paths.

pub mod providers;
pub mod resource;

pub use estately_core::traits::ImageStore;
pub use providers::local::LocalMediaStore;
pub use resource::resource_id_from_url;
