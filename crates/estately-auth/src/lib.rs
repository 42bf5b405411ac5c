//! # estately-auth
//!
//! Credential services for Estately: Argon2id password hashing and
//! JWT-based session tokens. Tokens are not persisted anywhere; each
//! request re-validates the signature and expiry.

pub mod jwt;
pub mod password;

pub use jwt::claims::Claims;
pub use jwt::decoder::TokenDecoder;
pub use jwt::encoder::{IssuedToken, TokenEncoder};
pub use password::PasswordHasher;
