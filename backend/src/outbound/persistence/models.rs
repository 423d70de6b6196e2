//! Internal Diesel row structs.
//!
//! Each read struct declares its fields in table column order. `Selectable`
//! derives the column list from that declaration and `Queryable` decodes
//! the Nth column into the Nth field, so the positional mapping is stated
//! once per entity and checked against `schema.rs` at compile time.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{Event, User};

use super::schema::{events, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub name: String,
}

/// Insertable struct for creating user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
}

/// Row struct for reading from the events table.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable)]
#[diesel(table_name = events)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct EventRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub message: String,
    pub time: DateTime<Utc>,
}

/// Insertable struct for creating event records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = events)]
pub(crate) struct NewEventRow<'a> {
    pub id: Uuid,
    pub user_id: Uuid,
    pub message: &'a str,
    pub time: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
        }
    }
}

impl<'a> From<&'a User> for NewUserRow<'a> {
    fn from(user: &'a User) -> Self {
        Self {
            id: user.id,
            name: user.name.as_str(),
        }
    }
}

impl From<EventRow> for Event {
    fn from(row: EventRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            message: row.message,
            time: row.time,
        }
    }
}

impl<'a> From<&'a Event> for NewEventRow<'a> {
    fn from(event: &'a Event) -> Self {
        Self {
            id: event.id,
            user_id: event.user_id,
            message: event.message.as_str(),
            time: event.time,
        }
    }
}
