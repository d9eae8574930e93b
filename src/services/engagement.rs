use crate::database::DatabaseService;
use crate::error::ApiError;
use crate::models::*;
use crate::services::ResourceService;
use crate::services::policy::{self, Action};
use log::debug;

pub struct EngagementService;

impl EngagementService {
    pub fn add_comment(
        db: &DatabaseService,
        user: Option<&User>,
        resource_id: i32,
        request: CommentRequest,
    ) -> Result<Comment, ApiError> {
        let author = policy::authorize(user, Action::Comment)?;
        let content = validate_comment(request.content.as_deref()).map_err(ApiError::Validation)?;
        ResourceService::visible_resource(db, resource_id, Some(author))?;

        Ok(db.create_comment(&NewComment::new(resource_id, author.id, content))?)
    }

    pub fn list_comments(
        db: &DatabaseService,
        viewer: Option<&User>,
        resource_id: i32,
    ) -> Result<Vec<CommentWithAuthor>, ApiError> {
        ResourceService::visible_resource(db, resource_id, viewer)?;
        Ok(db.list_comments(resource_id)?)
    }

    /// Creates the caller's review of a resource, or overwrites the one
    /// they already left.
    pub fn upsert_review(
        db: &DatabaseService,
        user: Option<&User>,
        resource_id: i32,
        request: ReviewRequest,
    ) -> Result<Review, ApiError> {
        let reviewer = policy::authorize(user, Action::Review)?;
        let rating = validate_rating(request.rating).map_err(ApiError::Validation)?;
        ResourceService::visible_resource(db, resource_id, Some(reviewer))?;

        let content = request
            .content
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());

        let new_review = NewReview::new(resource_id, reviewer.id, rating, content);
        match db.create_review(&new_review) {
            Ok(review) => Ok(review),
            // The (resource, user) index already holds a review: overwrite it
            Err(diesel::result::Error::DatabaseError(
                diesel::result::DatabaseErrorKind::UniqueViolation,
                _,
            )) => {
                let existing = db.find_review(resource_id, reviewer.id)?.ok_or_else(|| {
                    ApiError::InternalServerError("Review vanished during update".to_string())
                })?;
                debug!(
                    "Updating review {} by {} on resource {resource_id}",
                    existing.id, reviewer.username
                );
                let changes = UpdateReview {
                    rating: new_review.rating,
                    content: new_review.content,
                    updated_at: chrono::Utc::now().naive_utc(),
                };
                Ok(db.update_review(existing.id, &changes)?)
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn list_reviews(
        db: &DatabaseService,
        viewer: Option<&User>,
        resource_id: i32,
    ) -> Result<ReviewListResponse, ApiError> {
        ResourceService::visible_resource(db, resource_id, viewer)?;

        Ok(ReviewListResponse {
            reviews: db.list_reviews(resource_id)?,
            summary: db.rating_summary(resource_id)?,
        })
    }
}
