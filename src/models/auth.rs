use crate::models::user::User;
use rocket::serde::{Deserialize, Serialize};
use rocket::{
    http::Status,
    request::{FromRequest, Outcome, Request},
};

/// Name of the private cookie carrying the session token.
pub const SESSION_COOKIE: &str = "auth-token";

// Authentication request/response models
#[derive(Deserialize, Debug, Default, Clone)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct AuthResponse {
    pub success: bool,
    pub user: User,
    pub token: String,
}

#[derive(Serialize, Debug)]
pub struct CurrentUserResponse {
    pub user: Option<User>,
}

#[derive(Deserialize, Debug)]
pub struct ProfileUpdateRequest {
    pub avatar_url: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// The session token presented with a request, if any.
///
/// Browsers send it in the private session cookie; API clients may use
/// `Authorization: Bearer <token>` instead.
#[derive(Debug, Clone)]
pub struct SessionToken(pub Option<String>);

#[rocket::async_trait]
impl<'r> FromRequest<'r> for SessionToken {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        if let Some(cookie) = request.cookies().get_private(SESSION_COOKIE) {
            return Outcome::Success(SessionToken(Some(cookie.value().to_string())));
        }

        let bearer = request
            .headers()
            .get_one("Authorization")
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(str::to_string);

        Outcome::Success(SessionToken(bearer))
    }
}

/// The user behind the current request, resolved once per request.
///
/// This guard never fails: missing, invalid or expired credentials all
/// resolve to `None`, and handlers decide through the policy whether
/// anonymous access is allowed.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Option<User>);

impl CurrentUser {
    pub fn user(&self) -> Option<&User> {
        self.0.as_ref()
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for CurrentUser {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        use crate::services::AuthService;
        use crate::state::AppState;

        let resolved = request
            .local_cache_async(async {
                let Some(state) = request.rocket().state::<AppState>() else {
                    return None;
                };
                let token = match request.guard::<SessionToken>().await {
                    Outcome::Success(SessionToken(Some(token))) => token,
                    _ => return None,
                };
                AuthService::current_user(&state.database, &token)
            })
            .await;

        Outcome::Success(CurrentUser(resolved.clone()))
    }
}

/// Best-effort client address for download logging.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientAddress(pub String);

pub const UNKNOWN_ADDRESS: &str = "unknown";

#[rocket::async_trait]
impl<'r> FromRequest<'r> for ClientAddress {
    type Error = Status;

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let forwarded = request
            .headers()
            .get_one("X-Forwarded-For")
            .and_then(|value| value.split(',').next())
            .map(str::trim)
            .filter(|ip| !ip.is_empty())
            .map(str::to_string);

        let address = forwarded
            .or_else(|| request.client_ip().map(|ip| ip.to_string()))
            .unwrap_or_else(|| UNKNOWN_ADDRESS.to_string());

        Outcome::Success(ClientAddress(address))
    }
}
