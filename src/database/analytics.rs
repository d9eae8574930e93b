use super::connection::{DbPool, checkout};
use crate::models::analytics::*;
use crate::models::engagement::RatingSummary;
use crate::models::resource::ResourceStatus;
use crate::schema::{comments, download_logs, resources, reviews, users};
use diesel::prelude::*;

/// Download logging and statistics-related database operations
pub struct AnalyticsOperations<'a> {
    pool: &'a DbPool,
}

impl<'a> AnalyticsOperations<'a> {
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Appends a download log entry and bumps the resource's download counter
    pub fn record_download(&self, log: &NewDownloadLog) -> Result<(), diesel::result::Error> {
        let mut conn = checkout(self.pool)?;

        conn.transaction(|conn| {
            diesel::insert_into(download_logs::table)
                .values(log)
                .execute(conn)?;

            diesel::update(resources::table.find(log.resource_id))
                .set(resources::downloads.eq(resources::downloads + 1))
                .execute(conn)?;

            Ok(())
        })
    }

    pub fn list_download_logs(
        &self,
        resource_id: i32,
    ) -> Result<Vec<DownloadLog>, diesel::result::Error> {
        let mut conn = checkout(self.pool)?;

        download_logs::table
            .filter(download_logs::resource_id.eq(resource_id))
            .order((download_logs::created_at.desc(), download_logs::id.desc()))
            .select(DownloadLog::as_select())
            .load(&mut conn)
    }

    /// Site-wide totals for the staff overview
    pub fn admin_stats(&self, recent_pending_limit: i64) -> Result<AdminStats, diesel::result::Error> {
        let mut conn = checkout(self.pool)?;

        let total_users: i64 = users::table.count().get_result(&mut conn)?;
        let total_comments: i64 = comments::table.count().get_result(&mut conn)?;

        // Summed in Rust to avoid SQL numeric type issues
        let rows: Vec<(String, i64, i64)> = resources::table
            .select((resources::status, resources::views, resources::downloads))
            .load(&mut conn)?;

        let total_resources = rows.len() as i64;
        let pending_resources = rows
            .iter()
            .filter(|(status, _, _)| status == ResourceStatus::Pending.as_str())
            .count() as i64;
        let approved_resources = rows
            .iter()
            .filter(|(status, _, _)| status == ResourceStatus::Approved.as_str())
            .count() as i64;
        let total_views = rows.iter().map(|(_, views, _)| views).sum();
        let total_downloads = rows.iter().map(|(_, _, downloads)| downloads).sum();

        let recent_pending = resources::table
            .inner_join(users::table)
            .filter(resources::status.eq(ResourceStatus::Pending.as_str()))
            .order((resources::created_at.desc(), resources::id.desc()))
            .limit(recent_pending_limit)
            .select((
                resources::id,
                resources::title,
                resources::category,
                resources::created_at,
                users::username,
            ))
            .load::<(i32, String, String, chrono::NaiveDateTime, String)>(&mut conn)?
            .into_iter()
            .map(
                |(id, title, category, created_at, username)| PendingResourceSummary {
                    id,
                    title,
                    category,
                    created_at,
                    username,
                },
            )
            .collect();

        Ok(AdminStats {
            total_users,
            total_resources,
            pending_resources,
            approved_resources,
            total_views,
            total_downloads,
            total_comments,
            recent_pending,
        })
    }

    /// Totals over every resource the author owns
    pub fn author_stats(&self, author_id: i32) -> Result<AuthorStats, diesel::result::Error> {
        let mut conn = checkout(self.pool)?;

        let counters: Vec<(i64, i64)> = resources::table
            .filter(resources::author_id.eq(author_id))
            .select((resources::views, resources::downloads))
            .load(&mut conn)?;

        let total_comments: i64 = comments::table
            .inner_join(resources::table)
            .filter(resources::author_id.eq(author_id))
            .count()
            .get_result(&mut conn)?;

        let ratings: Vec<i32> = reviews::table
            .inner_join(resources::table)
            .filter(resources::author_id.eq(author_id))
            .select(reviews::rating)
            .load(&mut conn)?;

        let rating = RatingSummary::from_ratings(&ratings);

        Ok(AuthorStats {
            total_resources: counters.len() as i64,
            total_views: counters.iter().map(|(views, _)| views).sum(),
            total_downloads: counters.iter().map(|(_, downloads)| downloads).sum(),
            total_comments,
            total_reviews: rating.total_reviews,
            avg_rating: rating.avg_rating,
        })
    }
}
