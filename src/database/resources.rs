use super::connection::{DbPool, checkout};
use crate::models::resource::*;
use crate::schema::{comments, download_logs, resources, reviews, users};
use diesel::prelude::*;

/// Escapes LIKE wildcards in user input and wraps it for a substring match
fn like_pattern(search: &str) -> String {
    let escaped = search
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

/// Resource-related database operations
pub struct ResourceOperations<'a> {
    pool: &'a DbPool,
}

impl<'a> ResourceOperations<'a> {
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Inserts a new resource and returns the stored row
    pub fn create_resource(
        &self,
        new_resource: &NewResource,
    ) -> Result<Resource, diesel::result::Error> {
        let mut conn = checkout(self.pool)?;

        diesel::insert_into(resources::table)
            .values(new_resource)
            .returning(Resource::as_returning())
            .get_result(&mut conn)
    }

    pub fn get_resource(&self, resource_id: i32) -> Result<Option<Resource>, diesel::result::Error> {
        let mut conn = checkout(self.pool)?;

        resources::table
            .find(resource_id)
            .select(Resource::as_select())
            .first(&mut conn)
            .optional()
    }

    /// Gets a resource together with its author's username and avatar
    pub fn get_resource_with_author(
        &self,
        resource_id: i32,
    ) -> Result<Option<(Resource, String, Option<String>)>, diesel::result::Error> {
        let mut conn = checkout(self.pool)?;

        resources::table
            .inner_join(users::table)
            .filter(resources::id.eq(resource_id))
            .select((Resource::as_select(), users::username, users::avatar_url))
            .first(&mut conn)
            .optional()
    }

    /// Approved resources matching the query, newest first, plus the unpaged total
    pub fn list_approved(
        &self,
        query: &ResourceQuery,
    ) -> Result<(Vec<ResourceWithAuthor>, i64), diesel::result::Error> {
        let mut conn = checkout(self.pool)?;
        let approved = ResourceStatus::Approved.as_str();

        let mut rows = resources::table
            .inner_join(users::table)
            .filter(resources::status.eq(approved))
            .select((Resource::as_select(), users::username))
            .into_boxed();

        let mut count = resources::table
            .filter(resources::status.eq(approved))
            .select(diesel::dsl::count_star())
            .into_boxed();

        if let Some(category) = query.category {
            rows = rows.filter(resources::category.eq(category.as_str()));
            count = count.filter(resources::category.eq(category.as_str()));
        }

        if let Some(search) = &query.search {
            let pattern = like_pattern(search);
            rows = rows.filter(
                resources::title
                    .like(pattern.clone())
                    .escape('\\')
                    .or(resources::description.like(pattern.clone()).escape('\\')),
            );
            count = count.filter(
                resources::title
                    .like(pattern.clone())
                    .escape('\\')
                    .or(resources::description.like(pattern).escape('\\')),
            );
        }

        let total: i64 = count.get_result(&mut conn)?;

        let resources = rows
            .order((resources::created_at.desc(), resources::id.desc()))
            .limit(query.limit)
            .offset(query.offset)
            .load::<(Resource, String)>(&mut conn)?
            .into_iter()
            .map(|(resource, author_username)| ResourceWithAuthor {
                resource,
                author_username,
            })
            .collect();

        Ok((resources, total))
    }

    /// Every resource regardless of status, optionally filtered, newest first
    pub fn list_all(
        &self,
        status: Option<ResourceStatus>,
    ) -> Result<Vec<ResourceWithAuthor>, diesel::result::Error> {
        let mut conn = checkout(self.pool)?;

        let mut rows = resources::table
            .inner_join(users::table)
            .select((Resource::as_select(), users::username))
            .into_boxed();

        if let Some(status) = status {
            rows = rows.filter(resources::status.eq(status.as_str()));
        }

        Ok(rows
            .order((resources::created_at.desc(), resources::id.desc()))
            .load::<(Resource, String)>(&mut conn)?
            .into_iter()
            .map(|(resource, author_username)| ResourceWithAuthor {
                resource,
                author_username,
            })
            .collect())
    }

    pub fn list_by_author(&self, author_id: i32) -> Result<Vec<Resource>, diesel::result::Error> {
        let mut conn = checkout(self.pool)?;

        resources::table
            .filter(resources::author_id.eq(author_id))
            .order((resources::created_at.desc(), resources::id.desc()))
            .select(Resource::as_select())
            .load(&mut conn)
    }

    /// Writes a moderation decision; `None` when the resource does not exist
    pub fn apply_status_change(
        &self,
        resource_id: i32,
        change: StatusChange,
    ) -> Result<Option<Resource>, diesel::result::Error> {
        let mut conn = checkout(self.pool)?;

        diesel::update(resources::table.find(resource_id))
            .set((
                resources::status.eq(change.status.as_str()),
                resources::is_new.eq(change.is_new),
                resources::updated_at.eq(chrono::Utc::now().naive_utc()),
            ))
            .returning(Resource::as_returning())
            .get_result(&mut conn)
            .optional()
    }

    /// Deletes a resource with its comments, reviews and download logs.
    /// Returns the number of resource rows removed.
    pub fn delete_resource(&self, resource_id: i32) -> Result<usize, diesel::result::Error> {
        let mut conn = checkout(self.pool)?;

        conn.transaction(|conn| {
            diesel::delete(comments::table.filter(comments::resource_id.eq(resource_id)))
                .execute(conn)?;
            diesel::delete(reviews::table.filter(reviews::resource_id.eq(resource_id)))
                .execute(conn)?;
            diesel::delete(download_logs::table.filter(download_logs::resource_id.eq(resource_id)))
                .execute(conn)?;
            diesel::delete(resources::table.find(resource_id)).execute(conn)
        })
    }

    pub fn increment_views(&self, resource_id: i32) -> Result<usize, diesel::result::Error> {
        let mut conn = checkout(self.pool)?;

        diesel::update(resources::table.find(resource_id))
            .set(resources::views.eq(resources::views + 1))
            .execute(&mut conn)
    }

    /// Number of approved resources in each category
    pub fn approved_category_counts(
        &self,
    ) -> Result<std::collections::HashMap<String, i64>, diesel::result::Error> {
        let mut conn = checkout(self.pool)?;

        let categories: Vec<String> = resources::table
            .filter(resources::status.eq(ResourceStatus::Approved.as_str()))
            .select(resources::category)
            .load(&mut conn)?;

        let mut counts = std::collections::HashMap::new();
        for category in categories {
            *counts.entry(category).or_insert(0) += 1;
        }

        Ok(counts)
    }
}
