//! Domain ports defining the edges of the hexagon.
//!
//! Driven ports (`*Repository`, [`HealthProbe`]) describe what the domain
//! needs from storage. Driving ports (`*Query`, `*Command`) are what inbound
//! adapters call. Driven ports return [`PersistenceError`]; driving ports
//! return the transport-agnostic [`Error`].

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use super::{Error, Event, EventWindow, HungerReport, User};

/// Errors surfaced by persistence adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistenceError {
    /// The store could not be reached or a connection was lost.
    #[error("persistence connection failed: {message}")]
    Connection { message: String },
    /// A statement failed to execute.
    #[error("persistence query failed: {message}")]
    Query { message: String },
}

impl PersistenceError {
    /// Helper for connectivity failures.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for statement failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Map a persistence failure onto the domain error taxonomy.
pub(crate) fn map_persistence_error(error: PersistenceError) -> Error {
    match error {
        PersistenceError::Connection { message } => Error::service_unavailable(message),
        PersistenceError::Query { message } => Error::internal(message),
    }
}

/// Storage for feeders.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Every stored user, in store order.
    async fn list_all(&self) -> Result<Vec<User>, PersistenceError>;

    /// First user whose name contains `fragment`, ignoring case.
    async fn find_by_name(&self, fragment: &str) -> Result<Option<User>, PersistenceError>;

    /// Store a new user.
    async fn insert(&self, user: &User) -> Result<(), PersistenceError>;
}

/// Storage for feeding events.
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Events inside `window`, oldest first.
    async fn list(&self, window: EventWindow) -> Result<Vec<Event>, PersistenceError>;

    /// The event with the given id, if stored.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Event>, PersistenceError>;

    /// The most recent event by time.
    async fn latest(&self) -> Result<Option<Event>, PersistenceError>;

    /// Store a new event.
    async fn insert(&self, event: &Event) -> Result<(), PersistenceError>;

    /// Delete by id, returning the number of rows removed.
    async fn delete(&self, id: Uuid) -> Result<usize, PersistenceError>;
}

/// Liveness check against the backing store.
#[async_trait]
pub trait HealthProbe: Send + Sync {
    /// Succeeds when a trivial statement round-trips.
    async fn check(&self) -> Result<(), PersistenceError>;
}

/// Read side of the user directory.
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// All users, or at most one whose name contains `name` when given.
    async fn list_users(&self, name: Option<&str>) -> Result<Vec<User>, Error>;
}

/// Write side of the user directory.
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Register a new feeder unless a matching name already exists.
    async fn create_user(&self, name: &str) -> Result<User, Error>;
}

/// Read side of the feeding log.
#[async_trait]
pub trait FeedingQuery: Send + Sync {
    /// Recorded events, oldest first; restricted to the current UTC day when
    /// `today_only` is set.
    async fn list_events(&self, today_only: bool) -> Result<Vec<Event>, Error>;

    /// How hungry the cat is right now.
    async fn hunger_status(&self) -> Result<HungerReport, Error>;
}

/// Write side of the feeding log.
#[async_trait]
pub trait FeedingCommand: Send + Sync {
    /// Record a feeding by the user whose name matches `feeder_name`.
    async fn record_feeding(&self, feeder_name: &str) -> Result<Event, Error>;

    /// Remove a previously recorded event.
    async fn delete_event(&self, id: Uuid) -> Result<(), Error>;
}
