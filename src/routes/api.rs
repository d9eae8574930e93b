use crate::error::ApiError;
use crate::models::*;
use crate::services::{EngagementService, ResourceService};
use crate::state::AppState;
use rocket::serde::json::Json;
use rocket::{State, get, post};
use serde_json;

// Health check endpoint
#[get("/api/v1/health")]
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok"
    }))
}

#[get("/api/v1/categories")]
pub async fn list_categories(state: &State<AppState>) -> Result<Json<Vec<CategoryCount>>, ApiError> {
    Ok(Json(ResourceService::categories(&state.database)?))
}

// Resource endpoints
#[get("/api/v1/resources?<category>&<search>&<limit>&<offset>")]
pub async fn list_resources(
    category: Option<&str>,
    search: Option<&str>,
    limit: Option<i64>,
    offset: Option<i64>,
    state: &State<AppState>,
) -> Result<Json<ResourcePage>, ApiError> {
    let page = ResourceService::list_public(&state.database, category, search, limit, offset)?;
    Ok(Json(page))
}

#[post("/api/v1/resources", data = "<request>")]
pub async fn create_resource(
    request: Json<CreateResourceRequest>,
    user: CurrentUser,
    state: &State<AppState>,
) -> Result<Json<CreateResourceResponse>, ApiError> {
    let resource_id = ResourceService::create(&state.database, user.user(), request.into_inner())?;

    Ok(Json(CreateResourceResponse {
        success: true,
        resource_id,
    }))
}

#[get("/api/v1/resources/<id>")]
pub async fn get_resource(
    id: i32,
    user: CurrentUser,
    state: &State<AppState>,
) -> Result<Json<ResourceDetail>, ApiError> {
    Ok(Json(ResourceService::view(&state.database, id, user.user())?))
}

#[post("/api/v1/resources/<id>/download")]
pub async fn download_resource(
    id: i32,
    user: CurrentUser,
    address: ClientAddress,
    state: &State<AppState>,
) -> Result<Json<DownloadResponse>, ApiError> {
    let download_url =
        ResourceService::record_download(&state.database, id, user.user(), address.0)?;

    Ok(Json(DownloadResponse {
        success: true,
        download_url,
    }))
}

// Engagement endpoints
#[get("/api/v1/resources/<id>/comments")]
pub async fn list_comments(
    id: i32,
    user: CurrentUser,
    state: &State<AppState>,
) -> Result<Json<CommentListResponse>, ApiError> {
    let comments = EngagementService::list_comments(&state.database, user.user(), id)?;
    Ok(Json(CommentListResponse { comments }))
}

#[post("/api/v1/resources/<id>/comments", data = "<request>")]
pub async fn add_comment(
    id: i32,
    request: Json<CommentRequest>,
    user: CurrentUser,
    state: &State<AppState>,
) -> Result<Json<Comment>, ApiError> {
    let comment =
        EngagementService::add_comment(&state.database, user.user(), id, request.into_inner())?;
    Ok(Json(comment))
}

#[get("/api/v1/resources/<id>/reviews")]
pub async fn list_reviews(
    id: i32,
    user: CurrentUser,
    state: &State<AppState>,
) -> Result<Json<ReviewListResponse>, ApiError> {
    Ok(Json(EngagementService::list_reviews(
        &state.database,
        user.user(),
        id,
    )?))
}

#[post("/api/v1/resources/<id>/reviews", data = "<request>")]
pub async fn upsert_review(
    id: i32,
    request: Json<ReviewRequest>,
    user: CurrentUser,
    state: &State<AppState>,
) -> Result<Json<Review>, ApiError> {
    let review =
        EngagementService::upsert_review(&state.database, user.user(), id, request.into_inner())?;
    Ok(Json(review))
}

#[get("/api/v1/dashboard")]
pub async fn dashboard(
    user: CurrentUser,
    state: &State<AppState>,
) -> Result<Json<AuthorDashboard>, ApiError> {
    Ok(Json(ResourceService::dashboard(&state.database, user.user())?))
}
