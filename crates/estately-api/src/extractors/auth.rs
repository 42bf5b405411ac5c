//! `AuthUser` extractor — validates the session cookie and injects context.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;

use estately_core::error::AppError;
use estately_service::context::RequestContext;

use crate::state::AppState;

/// Extracted authenticated user context available in handlers.
///
/// An absent cookie and an invalid or expired token are indistinguishable
/// to the caller: both reject with the same unauthenticated error.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar
            .get(&state.config.auth.cookie_name)
            .map(|cookie| cookie.value().to_string())
            .ok_or_else(|| AppError::unauthenticated("Authentication required"))?;

        let claims = state.token_decoder.decode(&token)?;

        Ok(AuthUser(RequestContext::new(claims.sub, claims.role)))
    }
}
