use crate::database::DatabaseService;
use crate::error::ApiError;
use crate::models::*;
use crate::services::policy::{self, Action};
use log::{info, warn};

pub struct ResourceService;

impl ResourceService {
    /// Loads a resource the viewer is allowed to see.
    ///
    /// Approved resources are public. Anything else is visible to its author
    /// and to staff; everyone else gets the same not-found error as for a
    /// missing id.
    pub fn visible_resource(
        db: &DatabaseService,
        resource_id: i32,
        viewer: Option<&User>,
    ) -> Result<Resource, ApiError> {
        let resource = db
            .get_resource(resource_id)?
            .ok_or_else(ApiError::resource_not_found)?;

        if Self::can_view(&resource, viewer) {
            Ok(resource)
        } else {
            Err(ApiError::resource_not_found())
        }
    }

    fn can_view(resource: &Resource, viewer: Option<&User>) -> bool {
        if resource.status().is_public() {
            return true;
        }

        viewer.is_some_and(|user| {
            user.id == resource.author_id || policy::permits(user.role(), Action::ViewUnpublished)
        })
    }

    /// Stores a new pending resource and returns its id.
    pub fn create(
        db: &DatabaseService,
        user: Option<&User>,
        request: CreateResourceRequest,
    ) -> Result<i32, ApiError> {
        let author = policy::authorize(user, Action::CreateResource)?;

        let new_resource =
            NewResource::from_request(author.id, request).map_err(ApiError::Validation)?;
        let resource = db.create_resource(&new_resource)?;

        info!(
            "Resource {} '{}' submitted by {} for review",
            resource.id, resource.title, author.username
        );
        Ok(resource.id)
    }

    /// Approved resources only.
    pub fn list_public(
        db: &DatabaseService,
        category: Option<&str>,
        search: Option<&str>,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<ResourcePage, ApiError> {
        let query =
            ResourceQuery::new(category, search, limit, offset).map_err(ApiError::Validation)?;
        let (resources, total) = db.list_approved_resources(&query)?;
        Ok(ResourcePage { resources, total })
    }

    /// Detail view. Counts as one view on every successful fetch.
    pub fn view(
        db: &DatabaseService,
        resource_id: i32,
        viewer: Option<&User>,
    ) -> Result<ResourceDetail, ApiError> {
        let (mut resource, author_username, author_avatar) = db
            .get_resource_with_author(resource_id)?
            .ok_or_else(ApiError::resource_not_found)?;

        if !Self::can_view(&resource, viewer) {
            return Err(ApiError::resource_not_found());
        }

        match db.increment_views(resource_id) {
            Ok(_) => resource.views += 1,
            Err(e) => warn!("Failed to record view for resource {resource_id}: {e}"),
        }

        let rating = db.rating_summary(resource_id)?;

        Ok(ResourceDetail {
            resource,
            author_username,
            author_avatar,
            avg_rating: rating.avg_rating,
            total_reviews: rating.total_reviews,
        })
    }

    /// Logs a download of an approved resource and returns its file URL.
    pub fn record_download(
        db: &DatabaseService,
        resource_id: i32,
        user: Option<&User>,
        ip_address: String,
    ) -> Result<String, ApiError> {
        let resource = db
            .get_resource(resource_id)?
            .filter(|r| r.status() == ResourceStatus::Approved)
            .ok_or_else(ApiError::resource_not_found)?;

        let log = NewDownloadLog::new(resource.id, user.map(|u| u.id), ip_address);
        db.record_download(&log)?;

        Ok(resource.download_url)
    }

    pub fn dashboard(db: &DatabaseService, user: Option<&User>) -> Result<AuthorDashboard, ApiError> {
        let author = policy::authorize(user, Action::ViewDashboard)?;

        Ok(AuthorDashboard {
            resources: db.list_resources_by_author(author.id)?,
            stats: db.author_stats(author.id)?,
        })
    }

    /// Every category with its number of approved resources.
    pub fn categories(db: &DatabaseService) -> Result<Vec<CategoryCount>, ApiError> {
        let counts = db.approved_category_counts()?;

        Ok(Category::ALL
            .into_iter()
            .map(|category| CategoryCount {
                id: category,
                name: category.display_name(),
                count: counts.get(category.as_str()).copied().unwrap_or(0),
            })
            .collect())
    }
}
