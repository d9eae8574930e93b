use crate::config::AppConfig;
use crate::error::ApiError;
use crate::models::{
    AuthResponse, CurrentUser, CurrentUserResponse, LoginRequest, ProfileUpdateRequest,
    RegisterRequest, SESSION_COOKIE, SessionToken, SuccessResponse, User,
};
use crate::services::AuthService;
use crate::services::policy::{self, Action};
use crate::state::AppState;
use rocket::http::{Cookie, CookieJar, SameSite};
use rocket::serde::json::Json;
use rocket::{State, get, patch, post};

/// Stores the session token in the private session cookie.
fn set_session_cookie(cookies: &CookieJar<'_>, config: &AppConfig, token: &str) {
    let cookie = Cookie::build((SESSION_COOKIE, token.to_string()))
        .http_only(true)
        .secure(config.secure_cookies())
        .same_site(SameSite::Lax)
        .max_age(rocket::time::Duration::days(config.session_ttl_days))
        .path("/");

    cookies.add_private(cookie);
}

fn auth_response(
    cookies: &CookieJar<'_>,
    config: &AppConfig,
    user: User,
    token: String,
) -> Json<AuthResponse> {
    set_session_cookie(cookies, config, &token);

    Json(AuthResponse {
        success: true,
        user,
        token,
    })
}

#[post("/api/v1/auth/register", data = "<request>")]
pub async fn register(
    request: Json<RegisterRequest>,
    cookies: &CookieJar<'_>,
    state: &State<AppState>,
) -> Result<Json<AuthResponse>, ApiError> {
    let (user, token) =
        AuthService::register(&state.database, &state.config, request.into_inner())?;

    Ok(auth_response(cookies, &state.config, user, token))
}

#[post("/api/v1/auth/login", data = "<request>")]
pub async fn login(
    request: Json<LoginRequest>,
    cookies: &CookieJar<'_>,
    state: &State<AppState>,
) -> Result<Json<AuthResponse>, ApiError> {
    let (user, token) = AuthService::login(&state.database, &state.config, request.into_inner())?;

    Ok(auth_response(cookies, &state.config, user, token))
}

#[post("/api/v1/auth/logout")]
pub async fn logout(
    token: SessionToken,
    cookies: &CookieJar<'_>,
    state: &State<AppState>,
) -> Result<Json<SuccessResponse>, ApiError> {
    AuthService::logout(&state.database, token.0.as_deref())?;
    cookies.remove_private(Cookie::build(SESSION_COOKIE).path("/"));

    Ok(Json(SuccessResponse::ok()))
}

#[get("/api/v1/auth/me")]
pub async fn me(user: CurrentUser) -> Json<CurrentUserResponse> {
    Json(CurrentUserResponse { user: user.0 })
}

#[patch("/api/v1/auth/profile", data = "<request>")]
pub async fn update_profile(
    request: Json<ProfileUpdateRequest>,
    user: CurrentUser,
    state: &State<AppState>,
) -> Result<Json<CurrentUserResponse>, ApiError> {
    let user = policy::authorize(user.user(), Action::UpdateProfile)?;
    let updated =
        AuthService::update_avatar(&state.database, user, request.into_inner().avatar_url)?;

    Ok(Json(CurrentUserResponse {
        user: Some(updated),
    }))
}
