use super::connection::{DbPool, checkout};
use crate::models::engagement::*;
use crate::schema::{comments, reviews, users};
use diesel::prelude::*;

/// Comment and review database operations
pub struct EngagementOperations<'a> {
    pool: &'a DbPool,
}

impl<'a> EngagementOperations<'a> {
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    pub fn create_comment(&self, new_comment: &NewComment) -> Result<Comment, diesel::result::Error> {
        let mut conn = checkout(self.pool)?;

        diesel::insert_into(comments::table)
            .values(new_comment)
            .returning(Comment::as_returning())
            .get_result(&mut conn)
    }

    /// Comments on a resource, newest first, with the author's identity
    pub fn list_comments(
        &self,
        resource_id: i32,
    ) -> Result<Vec<CommentWithAuthor>, diesel::result::Error> {
        let mut conn = checkout(self.pool)?;

        Ok(comments::table
            .inner_join(users::table)
            .filter(comments::resource_id.eq(resource_id))
            .order((comments::created_at.desc(), comments::id.desc()))
            .select((Comment::as_select(), users::username, users::avatar_url))
            .load::<(Comment, String, Option<String>)>(&mut conn)?
            .into_iter()
            .map(|(comment, username, avatar_url)| CommentWithAuthor {
                comment,
                username,
                avatar_url,
            })
            .collect())
    }

    pub fn find_review(
        &self,
        resource_id: i32,
        user_id: i32,
    ) -> Result<Option<Review>, diesel::result::Error> {
        let mut conn = checkout(self.pool)?;

        reviews::table
            .filter(reviews::resource_id.eq(resource_id))
            .filter(reviews::user_id.eq(user_id))
            .select(Review::as_select())
            .first(&mut conn)
            .optional()
    }

    pub fn create_review(&self, new_review: &NewReview) -> Result<Review, diesel::result::Error> {
        let mut conn = checkout(self.pool)?;

        diesel::insert_into(reviews::table)
            .values(new_review)
            .returning(Review::as_returning())
            .get_result(&mut conn)
    }

    /// Overwrites rating and content; created_at is left untouched
    pub fn update_review(
        &self,
        review_id: i32,
        changes: &UpdateReview,
    ) -> Result<Review, diesel::result::Error> {
        let mut conn = checkout(self.pool)?;

        diesel::update(reviews::table.find(review_id))
            .set(changes)
            .returning(Review::as_returning())
            .get_result(&mut conn)
    }

    /// Reviews of a resource, newest first, with the reviewer's identity
    pub fn list_reviews(
        &self,
        resource_id: i32,
    ) -> Result<Vec<ReviewWithAuthor>, diesel::result::Error> {
        let mut conn = checkout(self.pool)?;

        Ok(reviews::table
            .inner_join(users::table)
            .filter(reviews::resource_id.eq(resource_id))
            .order((reviews::created_at.desc(), reviews::id.desc()))
            .select((Review::as_select(), users::username, users::avatar_url))
            .load::<(Review, String, Option<String>)>(&mut conn)?
            .into_iter()
            .map(|(review, username, avatar_url)| ReviewWithAuthor {
                review,
                username,
                avatar_url,
            })
            .collect())
    }

    pub fn count_reviews(&self, resource_id: i32) -> Result<i64, diesel::result::Error> {
        let mut conn = checkout(self.pool)?;

        reviews::table
            .filter(reviews::resource_id.eq(resource_id))
            .count()
            .get_result(&mut conn)
    }

    /// Average and count of the ratings currently stored for a resource
    pub fn rating_summary(&self, resource_id: i32) -> Result<RatingSummary, diesel::result::Error> {
        let mut conn = checkout(self.pool)?;

        // Averaged in Rust to avoid SQL numeric type issues
        let ratings: Vec<i32> = reviews::table
            .filter(reviews::resource_id.eq(resource_id))
            .select(reviews::rating)
            .load(&mut conn)?;

        Ok(RatingSummary::from_ratings(&ratings))
    }
}
