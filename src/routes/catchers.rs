use crate::error::{ErrorBody, INTERNAL_ERROR_MESSAGE};
use rocket::serde::json::Json;
use rocket::{Catcher, Request, catch, catchers};

fn body(message: &str) -> Json<ErrorBody> {
    Json(ErrorBody {
        error: message.to_string(),
    })
}

#[catch(400)]
pub fn bad_request(_req: &Request) -> Json<ErrorBody> {
    body("Bad request")
}

#[catch(401)]
pub fn unauthorized(_req: &Request) -> Json<ErrorBody> {
    body("Authentication required")
}

#[catch(403)]
pub fn forbidden(_req: &Request) -> Json<ErrorBody> {
    body("Insufficient permissions")
}

#[catch(404)]
pub fn not_found(_req: &Request) -> Json<ErrorBody> {
    body("Not found")
}

// Body failed to deserialize into the expected shape
#[catch(422)]
pub fn unprocessable(_req: &Request) -> Json<ErrorBody> {
    body("Invalid request body")
}

#[catch(500)]
pub fn internal_error(_req: &Request) -> Json<ErrorBody> {
    body(INTERNAL_ERROR_MESSAGE)
}

pub fn get_catchers() -> Vec<Catcher> {
    catchers![
        bad_request,
        unauthorized,
        forbidden,
        not_found,
        unprocessable,
        internal_error
    ]
}
