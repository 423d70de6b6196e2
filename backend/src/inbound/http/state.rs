//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    FeedingCommand, FeedingQuery, HealthProbe, UsersCommand, UsersQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users: Arc<dyn UsersQuery>,
    pub users_command: Arc<dyn UsersCommand>,
    pub feeding: Arc<dyn FeedingQuery>,
    pub feeding_command: Arc<dyn FeedingCommand>,
    pub database: Arc<dyn HealthProbe>,
}

impl HttpState {
    /// Build state from services implementing both sides of each port pair.
    ///
    /// # Examples
    /// ```ignore
    /// let state = HttpState::new(
    ///     Arc::new(UsersService::new(users.clone())),
    ///     Arc::new(FeedingService::new(events, users, Arc::new(DefaultClock))),
    ///     Arc::new(DieselHealthProbe::new(pool)),
    /// );
    /// ```
    pub fn new<U, F>(users: Arc<U>, feeding: Arc<F>, database: Arc<dyn HealthProbe>) -> Self
    where
        U: UsersQuery + UsersCommand + 'static,
        F: FeedingQuery + FeedingCommand + 'static,
    {
        Self {
            users: users.clone(),
            users_command: users,
            feeding: feeding.clone(),
            feeding_command: feeding,
            database,
        }
    }
}
