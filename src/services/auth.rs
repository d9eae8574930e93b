use crate::config::AppConfig;
use crate::database::DatabaseService;
use crate::error::ApiError;
use crate::models::{LoginRequest, NewUser, NewUserToken, RegisterRequest, User};
use log::{debug, warn};

pub const MIN_PASSWORD_LEN: usize = 6;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

pub struct AuthService;

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl AuthService {
    /// Creates an account with the `user` role and opens a session for it.
    pub fn register(
        db: &DatabaseService,
        config: &AppConfig,
        request: RegisterRequest,
    ) -> Result<(User, String), ApiError> {
        let (Some(username), Some(email), Some(password)) = (
            non_blank(request.username),
            non_blank(request.email),
            request.password.filter(|p| !p.trim().is_empty()),
        ) else {
            return Err(ApiError::Validation("All fields are required".to_string()));
        };

        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ApiError::Validation(format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }

        if !db.find_conflicting_users(&username, &email)?.is_empty() {
            return Err(ApiError::Conflict(
                "User with this email or username already exists".to_string(),
            ));
        }

        let new_user = NewUser::new(username, email, &password, config.bcrypt_cost)?;

        let user = db.create_user(&new_user).map_err(|e| match e {
            // Lost a race with a concurrent registration
            diesel::result::Error::DatabaseError(
                diesel::result::DatabaseErrorKind::UniqueViolation,
                _,
            ) => ApiError::Conflict("User with this email or username already exists".to_string()),
            other => other.into(),
        })?;

        let token = Self::issue_session(db, config, &user)?;

        debug!("User registered successfully: {}", user.username);
        Ok((user, token))
    }

    /// Verifies credentials and opens a new session.
    pub fn login(
        db: &DatabaseService,
        config: &AppConfig,
        request: LoginRequest,
    ) -> Result<(User, String), ApiError> {
        let (Some(email), Some(password)) = (non_blank(request.email), request.password) else {
            return Err(ApiError::Validation(
                "Email and password are required".to_string(),
            ));
        };

        let user = db
            .get_user_by_email(&email)?
            .ok_or_else(|| ApiError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

        if !user.verify_password(&password)? {
            return Err(ApiError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        let token = Self::issue_session(db, config, &user)?;

        debug!("User authenticated successfully: {}", user.username);
        Ok((user, token))
    }

    fn issue_session(
        db: &DatabaseService,
        config: &AppConfig,
        user: &User,
    ) -> Result<String, ApiError> {
        let new_token = NewUserToken::new_session_token(user.id, config.session_ttl_days);
        db.create_token(&new_token)?;
        Ok(new_token.token)
    }

    /// Resolves a session token to its user.
    ///
    /// Every failure, including database errors, resolves to `None`.
    pub fn current_user(db: &DatabaseService, token: &str) -> Option<User> {
        let user_token = match db.get_active_token(token) {
            Ok(Some(user_token)) => user_token,
            Ok(None) => {
                debug!("Unknown or revoked session token");
                return None;
            }
            Err(e) => {
                warn!("Failed to look up session token: {e}");
                return None;
            }
        };

        if user_token.is_expired(chrono::Utc::now().naive_utc()) {
            debug!("Session token for user {} has expired", user_token.user_id);
            return None;
        }

        match db.get_user_by_id(user_token.user_id) {
            Ok(user) => user,
            Err(e) => {
                warn!("Failed to load user {}: {e}", user_token.user_id);
                None
            }
        }
    }

    /// Deactivates the token. Unknown tokens are ignored.
    pub fn logout(db: &DatabaseService, token: Option<&str>) -> Result<(), ApiError> {
        if let Some(token) = token {
            let revoked = db.revoke_token(token)?;
            debug!("Revoked {revoked} session token(s)");
        }
        Ok(())
    }

    /// Sets the avatar URL; blank input clears it.
    pub fn update_avatar(
        db: &DatabaseService,
        user: &User,
        avatar_url: Option<String>,
    ) -> Result<User, ApiError> {
        Ok(db.update_avatar(user.id, non_blank(avatar_url))?)
    }
}
