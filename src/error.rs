use log::error;
use rocket::http::{ContentType, Status};
use rocket::response::{Responder, Response};
use rocket::serde::Serialize;
use rocket::Request;
use std::io::Cursor;

/// Body returned in place of the details of any unexpected failure.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Debug)]
pub enum ApiError {
    /// Malformed or missing input.
    Validation(String),
    /// Missing, invalid or expired credentials.
    Unauthorized(String),
    /// Authenticated, but the role does not allow the action.
    Forbidden(String),
    /// Missing, or intentionally hidden.
    NotFound(String),
    /// A unique field is already taken.
    Conflict(String),
    DatabaseError(String),
    InternalServerError(String),
}

#[derive(Serialize, Debug)]
pub struct ErrorBody {
    pub error: String,
}

impl ApiError {
    pub fn status(&self) -> Status {
        match self {
            ApiError::Validation(_) => Status::BadRequest,
            ApiError::Unauthorized(_) => Status::Unauthorized,
            ApiError::Forbidden(_) => Status::Forbidden,
            ApiError::NotFound(_) => Status::NotFound,
            ApiError::Conflict(_) => Status::Conflict,
            ApiError::DatabaseError(_) | ApiError::InternalServerError(_) => {
                Status::InternalServerError
            }
        }
    }

    /// Message safe to show to the caller.
    pub fn public_message(&self) -> &str {
        match self {
            ApiError::Validation(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::Forbidden(msg)
            | ApiError::NotFound(msg)
            | ApiError::Conflict(msg) => msg,
            ApiError::DatabaseError(_) | ApiError::InternalServerError(_) => {
                INTERNAL_ERROR_MESSAGE
            }
        }
    }

    pub fn resource_not_found() -> Self {
        ApiError::NotFound("Resource not found".to_string())
    }

    pub fn authentication_required() -> Self {
        ApiError::Unauthorized("Authentication required".to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::DatabaseError(msg) => write!(f, "database error: {msg}"),
            ApiError::InternalServerError(msg) => write!(f, "internal error: {msg}"),
            other => write!(f, "{}", other.public_message()),
        }
    }
}

impl std::error::Error for ApiError {}

/// Renders `{"error": message}` with the given status.
pub fn json_error(status: Status, message: &str) -> Response<'static> {
    let body = serde_json::to_string(&ErrorBody {
        error: message.to_string(),
    })
    .unwrap_or_else(|_| format!("{{\"error\":\"{INTERNAL_ERROR_MESSAGE}\"}}"));

    Response::build()
        .status(status)
        .header(ContentType::JSON)
        .sized_body(body.len(), Cursor::new(body))
        .finalize()
}

impl<'r> Responder<'r, 'static> for ApiError {
    fn respond_to(self, request: &'r Request<'_>) -> rocket::response::Result<'static> {
        let status = self.status();

        if status == Status::InternalServerError {
            error!("{} {} failed: {self}", request.method(), request.uri());
        }

        Ok(json_error(status, self.public_message()))
    }
}

impl From<diesel::result::Error> for ApiError {
    fn from(err: diesel::result::Error) -> Self {
        ApiError::DatabaseError(err.to_string())
    }
}

impl From<diesel::r2d2::Error> for ApiError {
    fn from(err: diesel::r2d2::Error) -> Self {
        ApiError::DatabaseError(format!("Database connection error: {err}"))
    }
}

impl From<bcrypt::BcryptError> for ApiError {
    fn from(err: bcrypt::BcryptError) -> Self {
        ApiError::InternalServerError(format!("Password hashing error: {err}"))
    }
}
