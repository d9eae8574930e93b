use crate::models::resource::Resource;
use crate::schema::download_logs;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use rocket::serde::{Deserialize, Serialize};

// Download log model - immutable record of a single download
#[derive(Queryable, Selectable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = download_logs)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct DownloadLog {
    pub id: i32,
    pub resource_id: i32,
    pub user_id: Option<i32>,
    pub ip_address: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = download_logs)]
pub struct NewDownloadLog {
    pub resource_id: i32,
    pub user_id: Option<i32>,
    pub ip_address: String,
    pub created_at: NaiveDateTime,
}

impl NewDownloadLog {
    pub fn new(resource_id: i32, user_id: Option<i32>, ip_address: String) -> Self {
        Self {
            resource_id,
            user_id,
            ip_address,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }
}

#[derive(Serialize, Debug, Clone)]
pub struct PendingResourceSummary {
    pub id: i32,
    pub title: String,
    pub category: String,
    pub created_at: NaiveDateTime,
    pub username: String,
}

#[derive(Serialize, Debug)]
pub struct AdminStats {
    pub total_users: i64,
    pub total_resources: i64,
    pub pending_resources: i64,
    pub approved_resources: i64,
    pub total_views: i64,
    pub total_downloads: i64,
    pub total_comments: i64,
    pub recent_pending: Vec<PendingResourceSummary>,
}

#[derive(Serialize, Debug, Default, PartialEq)]
pub struct AuthorStats {
    pub total_resources: i64,
    pub total_views: i64,
    pub total_downloads: i64,
    pub total_comments: i64,
    pub total_reviews: i64,
    pub avg_rating: f64,
}

#[derive(Serialize, Debug)]
pub struct AuthorDashboard {
    pub resources: Vec<Resource>,
    pub stats: AuthorStats,
}
