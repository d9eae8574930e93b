use crate::schema::resources;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use rocket::serde::{Deserialize, Serialize};

// Resource model - a single shareable listing pointing at an externally hosted file
#[derive(Queryable, Selectable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = resources)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Resource {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub category: String,
    pub thumbnail_url: Option<String>,
    pub download_url: String,
    pub file_size: Option<String>,
    pub version: Option<String>,
    pub author_id: i32,
    pub views: i64,
    pub downloads: i64,
    pub is_new: bool,
    pub is_featured: bool,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = resources)]
pub struct NewResource {
    pub title: String,
    pub description: String,
    pub category: String,
    pub thumbnail_url: Option<String>,
    pub download_url: String,
    pub file_size: Option<String>,
    pub version: Option<String>,
    pub author_id: i32,
    pub views: i64,
    pub downloads: i64,
    pub is_new: bool,
    pub is_featured: bool,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Moderation state of a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceStatus {
    Pending,
    Approved,
    Rejected,
}

impl ResourceStatus {
    pub fn from_status_str(status: &str) -> Option<Self> {
        match status {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    pub fn is_public(&self) -> bool {
        matches!(self, Self::Approved)
    }
}

impl std::fmt::Display for ResourceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Column values written by a moderation decision.
///
/// Approval marks the listing as new; every other outcome clears the
/// marker. All status writes go through [`StatusChange::for_target`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusChange {
    pub status: ResourceStatus,
    pub is_new: bool,
}

impl StatusChange {
    pub fn for_target(status: ResourceStatus) -> Self {
        Self {
            status,
            is_new: status == ResourceStatus::Approved,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Scripts,
    Mlo,
    Vehicles,
    Clothes,
    Weapons,
    Maps,
    Tools,
    Eup,
    Hud,
    Sounds,
    Dumps,
}

/// Listing filter value meaning "every category".
pub const ALL_CATEGORIES: &str = "all";

impl Category {
    pub const ALL: [Category; 11] = [
        Category::Scripts,
        Category::Mlo,
        Category::Vehicles,
        Category::Clothes,
        Category::Weapons,
        Category::Maps,
        Category::Tools,
        Category::Eup,
        Category::Hud,
        Category::Sounds,
        Category::Dumps,
    ];

    pub fn from_category_str(category: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == category.trim().to_lowercase())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scripts => "scripts",
            Self::Mlo => "mlo",
            Self::Vehicles => "vehicles",
            Self::Clothes => "clothes",
            Self::Weapons => "weapons",
            Self::Maps => "maps",
            Self::Tools => "tools",
            Self::Eup => "eup",
            Self::Hud => "hud",
            Self::Sounds => "sounds",
            Self::Dumps => "dumps",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Scripts => "Scripts",
            Self::Mlo => "MLO",
            Self::Vehicles => "Vehicles",
            Self::Clothes => "Clothes",
            Self::Weapons => "Weapons",
            Self::Maps => "Maps",
            Self::Tools => "Tools",
            Self::Eup => "EUP",
            Self::Hud => "HUD",
            Self::Sounds => "Sounds",
            Self::Dumps => "Dumps",
        }
    }
}

#[derive(Serialize, Debug)]
pub struct CategoryCount {
    pub id: Category,
    pub name: &'static str,
    pub count: i64,
}

// Request/Response models for API
#[derive(Deserialize, Debug, Default, Clone)]
pub struct CreateResourceRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub thumbnail_url: Option<String>,
    pub download_url: Option<String>,
    pub file_size: Option<String>,
    pub version: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct CreateResourceResponse {
    pub success: bool,
    pub resource_id: i32,
}

#[derive(Deserialize, Debug)]
pub struct StatusUpdateRequest {
    pub status: Option<String>,
}

#[derive(Serialize, Debug, Clone)]
pub struct ResourceWithAuthor {
    #[serde(flatten)]
    pub resource: Resource,
    pub author_username: String,
}

#[derive(Serialize, Debug)]
pub struct ResourceDetail {
    #[serde(flatten)]
    pub resource: Resource,
    pub author_username: String,
    pub author_avatar: Option<String>,
    pub avg_rating: f64,
    pub total_reviews: i64,
}

#[derive(Serialize, Debug)]
pub struct ResourcePage {
    pub resources: Vec<ResourceWithAuthor>,
    pub total: i64,
}

#[derive(Serialize, Debug)]
pub struct DownloadResponse {
    pub success: bool,
    pub download_url: String,
}

/// Filters for the public catalogue.
#[derive(Debug, Clone, Default)]
pub struct ResourceQuery {
    pub category: Option<Category>,
    pub search: Option<String>,
    pub limit: i64,
    pub offset: i64,
}

pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const MAX_PAGE_SIZE: i64 = 100;

impl ResourceQuery {
    pub fn new(
        category: Option<&str>,
        search: Option<&str>,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Self, String> {
        let category = match category.map(str::trim) {
            None | Some("") => None,
            Some(c) if c.eq_ignore_ascii_case(ALL_CATEGORIES) => None,
            Some(c) => Some(
                Category::from_category_str(c).ok_or_else(|| format!("Unknown category '{c}'"))?,
            ),
        };

        let search = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        Ok(Self {
            category,
            search,
            limit: limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE),
            offset: offset.unwrap_or(0).max(0),
        })
    }
}

fn required(value: Option<String>, field: &str) -> Result<String, String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| format!("Field '{field}' is required"))
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl NewResource {
    /// Validates an upload and builds a pending listing owned by `author_id`.
    pub fn from_request(author_id: i32, request: CreateResourceRequest) -> Result<Self, String> {
        let title = required(request.title, "title")?;
        let description = required(request.description, "description")?;
        let category = required(request.category, "category")?;
        let download_url = required(request.download_url, "download_url")?;

        let category = Category::from_category_str(&category)
            .ok_or_else(|| format!("Unknown category '{category}'"))?;

        let now = chrono::Utc::now().naive_utc();

        Ok(Self {
            title,
            description,
            category: category.as_str().to_string(),
            thumbnail_url: optional(request.thumbnail_url),
            download_url,
            file_size: optional(request.file_size),
            version: optional(request.version),
            author_id,
            views: 0,
            downloads: 0,
            is_new: false,
            is_featured: false,
            status: ResourceStatus::Pending.to_string(),
            created_at: now,
            updated_at: now,
        })
    }
}

impl Resource {
    /// Stored statuses outside the known set are treated as not yet reviewed.
    pub fn status(&self) -> ResourceStatus {
        ResourceStatus::from_status_str(&self.status).unwrap_or(ResourceStatus::Pending)
    }
}
