//! Account handlers: register, login, logout, me, delete.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use validator::Validate;

use estately_auth::jwt::encoder::IssuedToken;
use estately_core::error::AppError;
use estately_entity::user::UserRole;
use estately_service::auth::NewAccount;

use crate::dto::request::{LoginRequest, RegisterRequest};
use crate::dto::response::{OkResponse, ProfileResponse, SessionResponse};
use crate::error::from_validation_errors;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// Build the session cookie the browser sends back on every request.
fn session_cookie(state: &AppState, issued: &IssuedToken) -> Cookie<'static> {
    Cookie::build((
        state.config.auth.cookie_name.clone(),
        issued.token.clone(),
    ))
    .path("/")
    .http_only(true)
    .same_site(SameSite::Strict)
    .secure(state.config.auth.cookie_secure)
    .max_age(time::Duration::days(state.config.auth.token_ttl_days))
    .build()
}

/// An expired clone of the session cookie, used to clear it.
fn cleared_cookie(state: &AppState) -> Cookie<'static> {
    Cookie::build((state.config.auth.cookie_name.clone(), ""))
        .path("/")
        .http_only(true)
        .build()
}

/// POST /auth/register
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, CookieJar, Json<SessionResponse>), AppError> {
    req.validate().map_err(|e| from_validation_errors(&e))?;
    let role: UserRole = req.role.parse()?;

    let (user, issued) = state
        .auth_service
        .register(NewAccount {
            name: req.name,
            email: req.email,
            password: req.password,
            role,
            phone_number: req.phone_number,
        })
        .await?;

    let jar = jar.add(session_cookie(&state, &issued));
    Ok((
        StatusCode::CREATED,
        jar,
        Json(SessionResponse {
            user: user.into(),
            expires_at: issued.expires_at,
        }),
    ))
}

/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<SessionResponse>), AppError> {
    let (user, issued) = state.auth_service.login(&req.email, &req.password).await?;

    let jar = jar.add(session_cookie(&state, &issued));
    Ok((
        jar,
        Json(SessionResponse {
            user: user.into(),
            expires_at: issued.expires_at,
        }),
    ))
}

/// POST /auth/logout
///
/// Clears the cookie unconditionally; an anonymous caller gets the same
/// success response as an authenticated one.
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<OkResponse>) {
    let jar = jar.remove(cleared_cookie(&state));
    (jar, Json(OkResponse::ok()))
}

/// GET /auth/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ProfileResponse>, AppError> {
    let user = state.auth_service.profile(&auth).await?;
    Ok(Json(ProfileResponse { user: user.into() }))
}

/// DELETE /auth/me
pub async fn delete_me(
    State(state): State<AppState>,
    auth: AuthUser,
    jar: CookieJar,
) -> Result<(CookieJar, Json<OkResponse>), AppError> {
    state.auth_service.delete_account(&auth).await?;
    let jar = jar.remove(cleared_cookie(&state));
    Ok((jar, Json(OkResponse::ok())))
}
