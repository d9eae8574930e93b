use crate::error::ApiError;
use crate::models::*;
use crate::services::ModerationService;
use crate::state::AppState;
use rocket::serde::json::Json;
use rocket::{State, delete, get, patch};

/// Site totals and the most recent submissions awaiting review
#[get("/api/v1/admin/stats")]
pub async fn stats(user: CurrentUser, state: &State<AppState>) -> Result<Json<AdminStats>, ApiError> {
    Ok(Json(ModerationService::stats(&state.database, user.user())?))
}

#[get("/api/v1/admin/users")]
pub async fn list_users(
    user: CurrentUser,
    state: &State<AppState>,
) -> Result<Json<Vec<UserWithResourceCount>>, ApiError> {
    Ok(Json(ModerationService::list_users(
        &state.database,
        user.user(),
    )?))
}

/// Moderation queue; every status unless `status` narrows it
#[get("/api/v1/admin/resources?<status>")]
pub async fn list_resources(
    status: Option<&str>,
    user: CurrentUser,
    state: &State<AppState>,
) -> Result<Json<Vec<ResourceWithAuthor>>, ApiError> {
    Ok(Json(ModerationService::queue(
        &state.database,
        user.user(),
        status,
    )?))
}

#[patch("/api/v1/admin/resources/<id>", data = "<request>")]
pub async fn update_status(
    id: i32,
    request: Json<StatusUpdateRequest>,
    user: CurrentUser,
    state: &State<AppState>,
) -> Result<Json<Resource>, ApiError> {
    let resource = ModerationService::set_status(
        &state.database,
        user.user(),
        id,
        request.status.as_deref(),
    )?;
    Ok(Json(resource))
}

#[delete("/api/v1/admin/resources/<id>")]
pub async fn delete_resource(
    id: i32,
    user: CurrentUser,
    state: &State<AppState>,
) -> Result<Json<SuccessResponse>, ApiError> {
    ModerationService::delete(&state.database, user.user(), id)?;
    Ok(Json(SuccessResponse::ok()))
}
