//! Database reachability probe backing the `/health` endpoint.

use async_trait::async_trait;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{HealthProbe, PersistenceError};

use super::diesel_basic_error_mapping::{map_diesel_error, map_pool_error};
use super::pool::DbPool;

/// Runs `SELECT 1` on a pooled connection.
#[derive(Clone)]
pub struct DieselHealthProbe {
    pool: DbPool,
}

impl DieselHealthProbe {
    /// Create a probe over the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HealthProbe for DieselHealthProbe {
    async fn check(&self) -> Result<(), PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::sql_query("SELECT 1")
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }
}
