pub mod admin;
pub mod api;
pub mod auth;
pub mod catchers;

use rocket::routes;

pub fn get_routes() -> Vec<rocket::Route> {
    routes![
        // Public API routes with /api/v1/ prefix
        api::health_check,
        api::list_categories,
        api::list_resources,
        api::create_resource,
        api::get_resource,
        api::download_resource,
        api::list_comments,
        api::add_comment,
        api::list_reviews,
        api::upsert_review,
        api::dashboard,
        // Session routes
        auth::register,
        auth::login,
        auth::logout,
        auth::me,
        auth::update_profile,
        // Staff routes
        admin::stats,
        admin::list_users,
        admin::list_resources,
        admin::update_status,
        admin::delete_resource,
    ]
}
