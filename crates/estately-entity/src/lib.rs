//! # estately-entity
//!
//! Domain entity models for Estately: users and property listings, together
//! with their enumerations and the typed listing filter.

pub mod listing;
pub mod user;
