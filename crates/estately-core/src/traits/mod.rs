//! Trait definitions shared across crates.

pub mod storage;

pub use storage::ImageStore;
