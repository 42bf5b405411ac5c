//! # estately-core
//!
//! Core crate for Estately. Contains the unified error system, configuration
//! schemas, pagination/sorting types, and the image store trait.
//!
//! This crate has **no** internal dependencies on other Estately crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
