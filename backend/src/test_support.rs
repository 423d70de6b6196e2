//! Test utilities for the backend crate.
//!
//! In-memory implementations of the driven ports plus a fixed clock, shared
//! by unit tests (in `src/`) and integration tests (in `tests/`). Compiled
//! for tests or with the `test-support` feature.

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use uuid::Uuid;

use crate::domain::ports::{EventRepository, HealthProbe, PersistenceError, UserRepository};
use crate::domain::{Event, EventWindow, User};

/// Instant used by [`FixtureClock`] in most tests: 2026-03-01 12:00:00 UTC.
pub fn fixture_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

/// Clock frozen at a given instant.
#[derive(Debug, Clone, Copy)]
pub struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl FixtureClock {
    /// Freeze the clock at `utc_now`.
    pub fn at(utc_now: DateTime<Utc>) -> Self {
        Self { utc_now }
    }
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Default)]
struct UserState {
    users: Vec<User>,
    failure: Option<PersistenceError>,
}

/// [`UserRepository`] over a vector, matching names like `ILIKE '%x%'`.
#[derive(Default)]
pub struct InMemoryUserRepository {
    state: Mutex<UserState>,
}

impl InMemoryUserRepository {
    /// Repository pre-populated with `users`.
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        Self {
            state: Mutex::new(UserState {
                users: users.into_iter().collect(),
                failure: None,
            }),
        }
    }

    /// Make every subsequent call fail with `error`.
    pub fn fail_with(&self, error: PersistenceError) {
        lock(&self.state).failure = Some(error);
    }

    /// Copy of the stored users in insertion order.
    pub fn snapshot(&self) -> Vec<User> {
        lock(&self.state).users.clone()
    }

    fn check(&self) -> Result<MutexGuard<'_, UserState>, PersistenceError> {
        let state = lock(&self.state);
        if let Some(error) = state.failure.clone() {
            return Err(error);
        }
        Ok(state)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn list_all(&self) -> Result<Vec<User>, PersistenceError> {
        Ok(self.check()?.users.clone())
    }

    async fn find_by_name(&self, fragment: &str) -> Result<Option<User>, PersistenceError> {
        let needle = fragment.to_lowercase();
        Ok(self
            .check()?
            .users
            .iter()
            .find(|user| user.name.to_lowercase().contains(&needle))
            .cloned())
    }

    async fn insert(&self, user: &User) -> Result<(), PersistenceError> {
        self.check()?.users.push(user.clone());
        Ok(())
    }
}

#[derive(Default)]
struct EventState {
    events: Vec<Event>,
    failure: Option<PersistenceError>,
}

/// [`EventRepository`] over a vector.
#[derive(Default)]
pub struct InMemoryEventRepository {
    state: Mutex<EventState>,
}

impl InMemoryEventRepository {
    /// Append `events` without going through the port.
    pub fn seed(&self, events: impl IntoIterator<Item = Event>) {
        lock(&self.state).events.extend(events);
    }

    /// Make every subsequent call fail with `error`.
    pub fn fail_with(&self, error: PersistenceError) {
        lock(&self.state).failure = Some(error);
    }

    /// Copy of the stored events in insertion order.
    pub fn snapshot(&self) -> Vec<Event> {
        lock(&self.state).events.clone()
    }

    fn check(&self) -> Result<MutexGuard<'_, EventState>, PersistenceError> {
        let state = lock(&self.state);
        if let Some(error) = state.failure.clone() {
            return Err(error);
        }
        Ok(state)
    }
}

#[async_trait]
impl EventRepository for InMemoryEventRepository {
    async fn list(&self, window: EventWindow) -> Result<Vec<Event>, PersistenceError> {
        let mut events: Vec<Event> = self
            .check()?
            .events
            .iter()
            .filter(|event| window.contains(event.time))
            .cloned()
            .collect();
        events.sort_by_key(|event| event.time);
        Ok(events)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Event>, PersistenceError> {
        Ok(self
            .check()?
            .events
            .iter()
            .find(|event| event.id == id)
            .cloned())
    }

    async fn latest(&self) -> Result<Option<Event>, PersistenceError> {
        Ok(self
            .check()?
            .events
            .iter()
            .max_by_key(|event| event.time)
            .cloned())
    }

    async fn insert(&self, event: &Event) -> Result<(), PersistenceError> {
        self.check()?.events.push(event.clone());
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<usize, PersistenceError> {
        let mut state = self.check()?;
        let before = state.events.len();
        state.events.retain(|event| event.id != id);
        Ok(before - state.events.len())
    }
}

/// [`HealthProbe`] returning a canned outcome.
pub struct StubHealthProbe {
    outcome: Result<(), PersistenceError>,
}

impl StubHealthProbe {
    /// Probe that always succeeds.
    pub fn healthy() -> Self {
        Self { outcome: Ok(()) }
    }

    /// Probe that always fails with `error`.
    pub fn failing(error: PersistenceError) -> Self {
        Self {
            outcome: Err(error),
        }
    }
}

#[async_trait]
impl HealthProbe for StubHealthProbe {
    async fn check(&self) -> Result<(), PersistenceError> {
        self.outcome.clone()
    }
}
