//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::web;

use crate::domain::ports::HealthProbe;
use crate::domain::{FeedingService, UsersService};
use crate::test_support::{
    FixtureClock, InMemoryEventRepository, InMemoryUserRepository, StubHealthProbe, fixture_now,
};

use super::state::HttpState;

/// Real domain services wired over in-memory repositories.
///
/// The repositories stay reachable so tests can seed data and inspect what
/// handlers stored. The clock is frozen at [`fixture_now`].
pub struct TestWorld {
    pub users: Arc<InMemoryUserRepository>,
    pub events: Arc<InMemoryEventRepository>,
    pub state: web::Data<HttpState>,
}

impl TestWorld {
    /// World with empty repositories and a healthy database probe.
    pub fn new() -> Self {
        Self::with_probe(Arc::new(StubHealthProbe::healthy()))
    }

    /// World with empty repositories and the given database probe.
    pub fn with_probe(probe: Arc<dyn HealthProbe>) -> Self {
        let users = Arc::new(InMemoryUserRepository::default());
        let events = Arc::new(InMemoryEventRepository::default());
        let state = HttpState::new(
            Arc::new(UsersService::new(users.clone())),
            Arc::new(FeedingService::new(
                events.clone(),
                users.clone(),
                Arc::new(FixtureClock::at(fixture_now())),
            )),
            probe,
        );
        Self {
            users,
            events,
            state: web::Data::new(state),
        }
    }
}
