use super::connection::{DbPool, checkout};
use crate::models::user::*;
use crate::schema::{resources, user_tokens, users};
use diesel::prelude::*;

/// User and session-token database operations
pub struct UserOperations<'a> {
    pool: &'a DbPool,
}

impl<'a> UserOperations<'a> {
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Inserts a new user and returns the stored row
    pub fn create_user(&self, new_user: &NewUser) -> Result<User, diesel::result::Error> {
        let mut conn = checkout(self.pool)?;

        diesel::insert_into(users::table)
            .values(new_user)
            .returning(User::as_returning())
            .get_result(&mut conn)
    }

    pub fn get_user_by_id(&self, user_id: i32) -> Result<Option<User>, diesel::result::Error> {
        let mut conn = checkout(self.pool)?;

        users::table
            .find(user_id)
            .select(User::as_select())
            .first(&mut conn)
            .optional()
    }

    pub fn get_user_by_email(&self, email: &str) -> Result<Option<User>, diesel::result::Error> {
        let mut conn = checkout(self.pool)?;

        users::table
            .filter(users::email.eq(email))
            .select(User::as_select())
            .first(&mut conn)
            .optional()
    }

    /// Finds users holding either the username or the email
    pub fn find_conflicting_users(
        &self,
        username: &str,
        email: &str,
    ) -> Result<Vec<User>, diesel::result::Error> {
        let mut conn = checkout(self.pool)?;

        users::table
            .filter(users::username.eq(username).or(users::email.eq(email)))
            .select(User::as_select())
            .load(&mut conn)
    }

    pub fn update_avatar(
        &self,
        user_id: i32,
        avatar_url: Option<String>,
    ) -> Result<User, diesel::result::Error> {
        let mut conn = checkout(self.pool)?;

        diesel::update(users::table.find(user_id))
            .set((
                users::avatar_url.eq(avatar_url),
                users::updated_at.eq(chrono::Utc::now().naive_utc()),
            ))
            .returning(User::as_returning())
            .get_result(&mut conn)
    }

    /// Changes a user's role. Administrative only, never routed over HTTP.
    pub fn set_user_role(&self, user_id: i32, role: Role) -> Result<User, diesel::result::Error> {
        let mut conn = checkout(self.pool)?;

        diesel::update(users::table.find(user_id))
            .set((
                users::role.eq(role.to_string()),
                users::updated_at.eq(chrono::Utc::now().naive_utc()),
            ))
            .returning(User::as_returning())
            .get_result(&mut conn)
    }

    /// All users, newest first, with the number of resources each authored
    pub fn list_users_with_resource_counts(
        &self,
    ) -> Result<Vec<UserWithResourceCount>, diesel::result::Error> {
        let mut conn = checkout(self.pool)?;

        let all_users: Vec<User> = users::table
            .order((users::created_at.desc(), users::id.desc()))
            .select(User::as_select())
            .load(&mut conn)?;

        let author_ids: Vec<i32> = resources::table
            .select(resources::author_id)
            .load(&mut conn)?;

        let mut counts: std::collections::HashMap<i32, i64> = std::collections::HashMap::new();
        for author_id in author_ids {
            *counts.entry(author_id).or_insert(0) += 1;
        }

        Ok(all_users
            .into_iter()
            .map(|user| {
                let resource_count = counts.get(&user.id).copied().unwrap_or(0);
                UserWithResourceCount {
                    user,
                    resource_count,
                }
            })
            .collect())
    }

    pub fn create_token(&self, new_token: &NewUserToken) -> Result<(), diesel::result::Error> {
        let mut conn = checkout(self.pool)?;

        diesel::insert_into(user_tokens::table)
            .values(new_token)
            .execute(&mut conn)?;

        Ok(())
    }

    /// Active token row for the given value, expired or not
    pub fn get_active_token(
        &self,
        token: &str,
    ) -> Result<Option<UserToken>, diesel::result::Error> {
        let mut conn = checkout(self.pool)?;

        user_tokens::table
            .filter(user_tokens::token.eq(token))
            .filter(user_tokens::token_type.eq(SESSION_TOKEN_TYPE))
            .filter(user_tokens::is_active.eq(true))
            .select(UserToken::as_select())
            .first(&mut conn)
            .optional()
    }

    pub fn revoke_token(&self, token: &str) -> Result<usize, diesel::result::Error> {
        let mut conn = checkout(self.pool)?;

        diesel::update(user_tokens::table.filter(user_tokens::token.eq(token)))
            .set(user_tokens::is_active.eq(false))
            .execute(&mut conn)
    }
}
