use crate::database::DatabaseService;
use crate::error::ApiError;
use crate::models::*;
use crate::services::policy::{self, Action};
use log::info;

/// How many pending submissions the staff overview lists.
pub const RECENT_PENDING_LIMIT: i64 = 5;

pub struct ModerationService;

impl ModerationService {
    /// Moves a resource to `status`.
    ///
    /// The role check comes before any look at the requested status, so an
    /// unprivileged caller is refused the same way for every target.
    pub fn set_status(
        db: &DatabaseService,
        user: Option<&User>,
        resource_id: i32,
        status: Option<&str>,
    ) -> Result<Resource, ApiError> {
        let moderator = policy::authorize(user, Action::ModerateResource)?;

        let status = status
            .and_then(ResourceStatus::from_status_str)
            .ok_or_else(|| ApiError::Validation("Invalid status".to_string()))?;

        let resource = db
            .apply_status_change(resource_id, StatusChange::for_target(status))?
            .ok_or_else(ApiError::resource_not_found)?;

        info!(
            "Resource {} set to {} by {}",
            resource.id, status, moderator.username
        );
        Ok(resource)
    }

    /// Removes a resource together with its comments, reviews and download logs.
    pub fn delete(
        db: &DatabaseService,
        user: Option<&User>,
        resource_id: i32,
    ) -> Result<(), ApiError> {
        let admin = policy::authorize(user, Action::DeleteResource)?;

        if db.delete_resource(resource_id)? == 0 {
            return Err(ApiError::resource_not_found());
        }

        info!("Resource {resource_id} deleted by {}", admin.username);
        Ok(())
    }

    pub fn queue(
        db: &DatabaseService,
        user: Option<&User>,
        status: Option<&str>,
    ) -> Result<Vec<ResourceWithAuthor>, ApiError> {
        policy::authorize(user, Action::ListAllResources)?;

        let status = match status.map(str::trim).filter(|s| !s.is_empty()) {
            None | Some("all") => None,
            Some(s) => Some(
                ResourceStatus::from_status_str(s)
                    .ok_or_else(|| ApiError::Validation("Invalid status".to_string()))?,
            ),
        };

        Ok(db.list_all_resources(status)?)
    }

    pub fn stats(db: &DatabaseService, user: Option<&User>) -> Result<AdminStats, ApiError> {
        policy::authorize(user, Action::ViewAdminStats)?;
        Ok(db.admin_stats(RECENT_PENDING_LIMIT)?)
    }

    pub fn list_users(
        db: &DatabaseService,
        user: Option<&User>,
    ) -> Result<Vec<UserWithResourceCount>, ApiError> {
        policy::authorize(user, Action::ListUsers)?;
        Ok(db.list_users_with_resource_counts()?)
    }
}
