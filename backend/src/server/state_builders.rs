//! Builds the HTTP state from the shared connection pool.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;

use chatte_backend::domain::{FeedingService, UsersService};
use chatte_backend::inbound::http::state::HttpState;
use chatte_backend::outbound::persistence::{
    DbPool, DieselEventRepository, DieselHealthProbe, DieselUserRepository,
};

/// Wire the Diesel repositories into the domain services.
///
/// Every adapter shares the same pool; nothing else opens connections.
pub(super) fn build_http_state(pool: &DbPool) -> web::Data<HttpState> {
    let users = Arc::new(DieselUserRepository::new(pool.clone()));
    let events = Arc::new(DieselEventRepository::new(pool.clone()));

    web::Data::new(HttpState::new(
        Arc::new(UsersService::new(users.clone())),
        Arc::new(FeedingService::new(events, users, Arc::new(DefaultClock))),
        Arc::new(DieselHealthProbe::new(pool.clone())),
    ))
}
