//! Image store providers.

pub mod local;

pub use local::LocalMediaStore;
