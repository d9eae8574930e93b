use crate::schema::{comments, reviews};
use chrono::NaiveDateTime;
use diesel::prelude::*;
use rocket::serde::{Deserialize, Serialize};

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

// Comment model - append-only, never edited
#[derive(Queryable, Selectable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = comments)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Comment {
    pub id: i32,
    pub resource_id: i32,
    pub user_id: i32,
    pub content: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = comments)]
pub struct NewComment {
    pub resource_id: i32,
    pub user_id: i32,
    pub content: String,
    pub created_at: NaiveDateTime,
}

// Review model - one per (resource, user)
#[derive(Queryable, Selectable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = reviews)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Review {
    pub id: i32,
    pub resource_id: i32,
    pub user_id: i32,
    pub rating: i32,
    pub content: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = reviews)]
pub struct NewReview {
    pub resource_id: i32,
    pub user_id: i32,
    pub rating: i32,
    pub content: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset, Debug)]
#[diesel(table_name = reviews)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateReview {
    pub rating: i32,
    pub content: Option<String>,
    pub updated_at: NaiveDateTime,
}

#[derive(Serialize, Debug)]
pub struct CommentWithAuthor {
    #[serde(flatten)]
    pub comment: Comment,
    pub username: String,
    pub avatar_url: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct ReviewWithAuthor {
    #[serde(flatten)]
    pub review: Review,
    pub username: String,
    pub avatar_url: Option<String>,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct RatingSummary {
    pub avg_rating: f64,
    pub total_reviews: i64,
}

impl RatingSummary {
    /// Mean of the given ratings; zero when there are none.
    pub fn from_ratings(ratings: &[i32]) -> Self {
        let total_reviews = ratings.len() as i64;
        let avg_rating = if ratings.is_empty() {
            0.0
        } else {
            ratings.iter().map(|r| f64::from(*r)).sum::<f64>() / ratings.len() as f64
        };

        Self {
            avg_rating,
            total_reviews,
        }
    }
}

// Request/Response models for API
#[derive(Deserialize, Debug)]
pub struct CommentRequest {
    pub content: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct ReviewRequest {
    pub rating: Option<i32>,
    pub content: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct CommentListResponse {
    pub comments: Vec<CommentWithAuthor>,
}

#[derive(Serialize, Debug)]
pub struct ReviewListResponse {
    pub reviews: Vec<ReviewWithAuthor>,
    #[serde(flatten)]
    pub summary: RatingSummary,
}

/// Trims comment text; blank comments are rejected.
pub fn validate_comment(content: Option<&str>) -> Result<String, String> {
    content
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .ok_or_else(|| "Comment content is required".to_string())
}

pub fn validate_rating(rating: Option<i32>) -> Result<i32, String> {
    match rating {
        Some(r) if (MIN_RATING..=MAX_RATING).contains(&r) => Ok(r),
        _ => Err(format!(
            "Rating must be between {MIN_RATING} and {MAX_RATING}"
        )),
    }
}

impl NewComment {
    pub fn new(resource_id: i32, user_id: i32, content: String) -> Self {
        Self {
            resource_id,
            user_id,
            content,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }
}

impl NewReview {
    pub fn new(resource_id: i32, user_id: i32, rating: i32, content: Option<String>) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            resource_id,
            user_id,
            rating,
            content,
            created_at: now,
            updated_at: now,
        }
    }
}
