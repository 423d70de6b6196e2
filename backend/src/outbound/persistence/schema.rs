//! Diesel table definitions for the PostgreSQL schema.
//!
//! The service consumes these tables but does not own their lifecycle; they
//! must exist with the column order below, which is also the field order of
//! the row structs in `models.rs`.

diesel::table! {
    /// People who feed the cat.
    users (id) {
        id -> Uuid,
        name -> Varchar,
    }
}

diesel::table! {
    /// One row per feeding.
    events (id) {
        id -> Uuid,
        /// References `users.id`; not enforced beyond the lookup at creation.
        user_id -> Uuid,
        message -> Varchar,
        time -> Timestamptz,
    }
}
