use super::analytics::AnalyticsOperations;
use super::connection::{DbPool, create_pool};
use super::engagement::EngagementOperations;
use super::resources::ResourceOperations;
use super::users::UserOperations;
use crate::models::*;
use std::collections::HashMap;

/// Main database service that provides a unified interface to all database operations
#[derive(Debug)]
pub struct DatabaseService {
    pub pool: DbPool,
}

impl DatabaseService {
    /// Creates a new DatabaseService with an initialized connection pool
    pub fn new(database_url: &str, pool_size: u32) -> Result<Self, Box<dyn std::error::Error>> {
        let pool = create_pool(database_url, pool_size)?;
        Ok(Self { pool })
    }

    // User operations
    pub fn create_user(&self, new_user: &NewUser) -> Result<User, diesel::result::Error> {
        UserOperations::new(&self.pool).create_user(new_user)
    }

    pub fn get_user_by_id(&self, user_id: i32) -> Result<Option<User>, diesel::result::Error> {
        UserOperations::new(&self.pool).get_user_by_id(user_id)
    }

    pub fn get_user_by_email(&self, email: &str) -> Result<Option<User>, diesel::result::Error> {
        UserOperations::new(&self.pool).get_user_by_email(email)
    }

    pub fn find_conflicting_users(
        &self,
        username: &str,
        email: &str,
    ) -> Result<Vec<User>, diesel::result::Error> {
        UserOperations::new(&self.pool).find_conflicting_users(username, email)
    }

    pub fn update_avatar(
        &self,
        user_id: i32,
        avatar_url: Option<String>,
    ) -> Result<User, diesel::result::Error> {
        UserOperations::new(&self.pool).update_avatar(user_id, avatar_url)
    }

    pub fn set_user_role(&self, user_id: i32, role: Role) -> Result<User, diesel::result::Error> {
        UserOperations::new(&self.pool).set_user_role(user_id, role)
    }

    pub fn list_users_with_resource_counts(
        &self,
    ) -> Result<Vec<UserWithResourceCount>, diesel::result::Error> {
        UserOperations::new(&self.pool).list_users_with_resource_counts()
    }

    // Session token operations
    pub fn create_token(&self, new_token: &NewUserToken) -> Result<(), diesel::result::Error> {
        UserOperations::new(&self.pool).create_token(new_token)
    }

    pub fn get_active_token(&self, token: &str) -> Result<Option<UserToken>, diesel::result::Error> {
        UserOperations::new(&self.pool).get_active_token(token)
    }

    pub fn revoke_token(&self, token: &str) -> Result<usize, diesel::result::Error> {
        UserOperations::new(&self.pool).revoke_token(token)
    }

    // Resource operations
    pub fn create_resource(
        &self,
        new_resource: &NewResource,
    ) -> Result<Resource, diesel::result::Error> {
        ResourceOperations::new(&self.pool).create_resource(new_resource)
    }

    pub fn get_resource(&self, resource_id: i32) -> Result<Option<Resource>, diesel::result::Error> {
        ResourceOperations::new(&self.pool).get_resource(resource_id)
    }

    pub fn get_resource_with_author(
        &self,
        resource_id: i32,
    ) -> Result<Option<(Resource, String, Option<String>)>, diesel::result::Error> {
        ResourceOperations::new(&self.pool).get_resource_with_author(resource_id)
    }

    pub fn list_approved_resources(
        &self,
        query: &ResourceQuery,
    ) -> Result<(Vec<ResourceWithAuthor>, i64), diesel::result::Error> {
        ResourceOperations::new(&self.pool).list_approved(query)
    }

    pub fn list_all_resources(
        &self,
        status: Option<ResourceStatus>,
    ) -> Result<Vec<ResourceWithAuthor>, diesel::result::Error> {
        ResourceOperations::new(&self.pool).list_all(status)
    }

    pub fn list_resources_by_author(
        &self,
        author_id: i32,
    ) -> Result<Vec<Resource>, diesel::result::Error> {
        ResourceOperations::new(&self.pool).list_by_author(author_id)
    }

    pub fn apply_status_change(
        &self,
        resource_id: i32,
        change: StatusChange,
    ) -> Result<Option<Resource>, diesel::result::Error> {
        ResourceOperations::new(&self.pool).apply_status_change(resource_id, change)
    }

    pub fn delete_resource(&self, resource_id: i32) -> Result<usize, diesel::result::Error> {
        ResourceOperations::new(&self.pool).delete_resource(resource_id)
    }

    pub fn increment_views(&self, resource_id: i32) -> Result<usize, diesel::result::Error> {
        ResourceOperations::new(&self.pool).increment_views(resource_id)
    }

    pub fn approved_category_counts(&self) -> Result<HashMap<String, i64>, diesel::result::Error> {
        ResourceOperations::new(&self.pool).approved_category_counts()
    }

    // Engagement operations
    pub fn create_comment(&self, new_comment: &NewComment) -> Result<Comment, diesel::result::Error> {
        EngagementOperations::new(&self.pool).create_comment(new_comment)
    }

    pub fn list_comments(
        &self,
        resource_id: i32,
    ) -> Result<Vec<CommentWithAuthor>, diesel::result::Error> {
        EngagementOperations::new(&self.pool).list_comments(resource_id)
    }

    pub fn find_review(
        &self,
        resource_id: i32,
        user_id: i32,
    ) -> Result<Option<Review>, diesel::result::Error> {
        EngagementOperations::new(&self.pool).find_review(resource_id, user_id)
    }

    pub fn create_review(&self, new_review: &NewReview) -> Result<Review, diesel::result::Error> {
        EngagementOperations::new(&self.pool).create_review(new_review)
    }

    pub fn update_review(
        &self,
        review_id: i32,
        changes: &UpdateReview,
    ) -> Result<Review, diesel::result::Error> {
        EngagementOperations::new(&self.pool).update_review(review_id, changes)
    }

    pub fn list_reviews(
        &self,
        resource_id: i32,
    ) -> Result<Vec<ReviewWithAuthor>, diesel::result::Error> {
        EngagementOperations::new(&self.pool).list_reviews(resource_id)
    }

    pub fn count_reviews(&self, resource_id: i32) -> Result<i64, diesel::result::Error> {
        EngagementOperations::new(&self.pool).count_reviews(resource_id)
    }

    pub fn rating_summary(&self, resource_id: i32) -> Result<RatingSummary, diesel::result::Error> {
        EngagementOperations::new(&self.pool).rating_summary(resource_id)
    }

    // Download and statistics operations
    pub fn record_download(&self, log: &NewDownloadLog) -> Result<(), diesel::result::Error> {
        AnalyticsOperations::new(&self.pool).record_download(log)
    }

    pub fn list_download_logs(
        &self,
        resource_id: i32,
    ) -> Result<Vec<DownloadLog>, diesel::result::Error> {
        AnalyticsOperations::new(&self.pool).list_download_logs(resource_id)
    }

    pub fn admin_stats(&self, recent_pending_limit: i64) -> Result<AdminStats, diesel::result::Error> {
        AnalyticsOperations::new(&self.pool).admin_stats(recent_pending_limit)
    }

    pub fn author_stats(&self, author_id: i32) -> Result<AuthorStats, diesel::result::Error> {
        AnalyticsOperations::new(&self.pool).author_stats(author_id)
    }
}
