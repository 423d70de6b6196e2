//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::User;
use crate::domain::ports::{PersistenceError, UserRepository};

use super::diesel_basic_error_mapping::{map_diesel_error, map_pool_error, map_query_error};
use super::models::{NewUserRow, UserRow};
use super::pool::DbPool;
use super::row_mapper::fetch_all;
use super::schema::users;

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Build an `ILIKE` pattern matching `fragment` anywhere in a name.
///
/// Wildcards in the fragment itself are escaped so they match literally.
fn contains_pattern(fragment: &str) -> String {
    let mut pattern = String::with_capacity(fragment.len() + 2);
    pattern.push('%');
    for ch in fragment.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn list_all(&self) -> Result<Vec<User>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<UserRow> = fetch_all(&mut conn, users::table.select(UserRow::as_select()))
            .await
            .map_err(map_query_error)?;
        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn find_by_name(&self, fragment: &str) -> Result<Option<User>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let query = users::table
            .filter(users::name.ilike(contains_pattern(fragment)))
            .select(UserRow::as_select())
            .limit(1);
        let rows: Vec<UserRow> = fetch_all(&mut conn, query)
            .await
            .map_err(map_query_error)?;
        Ok(rows.into_iter().next().map(User::from))
    }

    async fn insert(&self, user: &User) -> Result<(), PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(users::table)
            .values(NewUserRow::from(user))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }
}
