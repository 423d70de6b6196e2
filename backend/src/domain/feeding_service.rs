//! Feeding log service implementing the feeding driving ports.
//!
//! Recording a feeding looks the feeder up by name, generates the stored
//! message and inserts the event with a service-assigned id and time. As with
//! user creation, the lookup and insert are not coordinated.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::feeding_message;
use crate::domain::ports::{
    EventRepository, FeedingCommand, FeedingQuery, UserRepository, map_persistence_error,
};
use crate::domain::{Error, Event, EventWindow, HungerReport, HungerStatus, classify};

/// Feeding service backed by event and user repositories.
#[derive(Clone)]
pub struct FeedingService<E, U> {
    events: Arc<E>,
    users: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<E, U> FeedingService<E, U> {
    /// Create a service over the given repositories and clock.
    ///
    /// # Examples
    /// ```ignore
    /// use std::sync::Arc;
    /// use mockable::DefaultClock;
    ///
    /// let service = FeedingService::new(
    ///     Arc::new(DieselEventRepository::new(pool.clone())),
    ///     Arc::new(DieselUserRepository::new(pool)),
    ///     Arc::new(DefaultClock),
    /// );
    /// ```
    pub fn new(events: Arc<E>, users: Arc<U>, clock: Arc<dyn Clock>) -> Self {
        Self {
            events,
            users,
            clock,
        }
    }
}

#[async_trait]
impl<E, U> FeedingQuery for FeedingService<E, U>
where
    E: EventRepository,
    U: UserRepository,
{
    async fn list_events(&self, today_only: bool) -> Result<Vec<Event>, Error> {
        let window = if today_only {
            EventWindow::day_of(self.clock.utc())
        } else {
            EventWindow::All
        };
        self.events
            .list(window)
            .await
            .map_err(map_persistence_error)
    }

    async fn hunger_status(&self) -> Result<HungerReport, Error> {
        let latest = self.events.latest().await.map_err(map_persistence_error)?;
        Ok(match latest {
            Some(event) => classify(event.time, self.clock.utc()),
            None => {
                debug!("no feeding recorded yet");
                HungerStatus::Starving.into()
            }
        })
    }
}

#[async_trait]
impl<E, U> FeedingCommand for FeedingService<E, U>
where
    E: EventRepository,
    U: UserRepository,
{
    async fn record_feeding(&self, feeder_name: &str) -> Result<Event, Error> {
        let feeder = self
            .users
            .find_by_name(feeder_name)
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| {
                warn!(feeder = feeder_name, "feeding rejected for unknown user");
                Error::not_found("User does not exist").with_details(json!({
                    "field": "name",
                    "value": feeder_name,
                    "code": "user_not_found",
                }))
            })?;

        let event = Event {
            id: Uuid::new_v4(),
            user_id: feeder.id,
            message: feeding_message::generate(&feeder.name),
            time: self.clock.utc(),
        };
        self.events
            .insert(&event)
            .await
            .map_err(map_persistence_error)?;
        info!(event_id = %event.id, user_id = %feeder.id, "feeding recorded");
        Ok(event)
    }

    async fn delete_event(&self, id: Uuid) -> Result<(), Error> {
        let found = self
            .events
            .find_by_id(id)
            .await
            .map_err(map_persistence_error)?;
        if found.is_none() {
            return Err(Error::not_found("Event does not exist"));
        }

        let removed = self
            .events
            .delete(id)
            .await
            .map_err(map_persistence_error)?;
        if removed == 0 {
            // Deleted concurrently between the lookup and the delete.
            return Err(Error::not_found("Event does not exist"));
        }
        info!(event_id = %id, "feeding deleted");
        Ok(())
    }
}
