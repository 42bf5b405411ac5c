//! Account services: registration, login, profile, and account deletion.

pub mod service;

pub use service::{AuthService, NewAccount};
