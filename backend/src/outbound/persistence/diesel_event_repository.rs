//! PostgreSQL-backed `EventRepository` implementation using Diesel ORM.
//!
//! Listings are ordered by feeding time ascending; `latest` reads the single
//! newest row. Day windows are applied in SQL as `time >= start AND
//! time < end`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{EventRepository, PersistenceError};
use crate::domain::{Event, EventWindow};

use super::diesel_basic_error_mapping::{map_diesel_error, map_pool_error, map_query_error};
use super::models::{EventRow, NewEventRow};
use super::pool::DbPool;
use super::row_mapper::fetch_all;
use super::schema::events;

/// Diesel-backed implementation of the `EventRepository` port.
#[derive(Clone)]
pub struct DieselEventRepository {
    pool: DbPool,
}

impl DieselEventRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn into_events(rows: Vec<EventRow>) -> Vec<Event> {
    rows.into_iter().map(Event::from).collect()
}

#[async_trait]
impl EventRepository for DieselEventRepository {
    async fn list(&self, window: EventWindow) -> Result<Vec<Event>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let ordered = events::table
            .select(EventRow::as_select())
            .order_by(events::time.asc());
        let rows: Vec<EventRow> = match window {
            EventWindow::All => fetch_all(&mut conn, ordered).await,
            EventWindow::Between { start, end } => {
                let windowed = ordered
                    .filter(events::time.ge(start))
                    .filter(events::time.lt(end));
                fetch_all(&mut conn, windowed).await
            }
        }
        .map_err(map_query_error)?;
        debug!(count = rows.len(), ?window, "events listed");
        Ok(into_events(rows))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Event>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let query = events::table
            .filter(events::id.eq(id))
            .select(EventRow::as_select())
            .limit(1);
        let rows: Vec<EventRow> = fetch_all(&mut conn, query)
            .await
            .map_err(map_query_error)?;
        Ok(into_events(rows).into_iter().next())
    }

    async fn latest(&self) -> Result<Option<Event>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let query = events::table
            .select(EventRow::as_select())
            .order_by(events::time.desc())
            .limit(1);
        let rows: Vec<EventRow> = fetch_all(&mut conn, query)
            .await
            .map_err(map_query_error)?;
        Ok(into_events(rows).into_iter().next())
    }

    async fn insert(&self, event: &Event) -> Result<(), PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(events::table)
            .values(NewEventRow::from(event))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<usize, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::delete(events::table.filter(events::id.eq(id)))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)
    }
}
