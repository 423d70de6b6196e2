//! Feeding event handlers.
//!
//! ```text
//! GET /events?today=true
//! POST /events {"name":"Ada"}
//! DELETE /events/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, web};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::{Error, Event};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Query string for `GET /events`.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct EventsFilter {
    /// Only the literal `true` restricts the listing to the current UTC day.
    pub today: Option<String>,
}

impl EventsFilter {
    fn today_only(&self) -> bool {
        self.today.as_deref() == Some("true")
    }
}

/// Request body for `POST /events`: who did the feeding.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct RecordFeedingRequest {
    #[serde(alias = "Name")]
    #[schema(example = "Ada")]
    pub name: String,
}

/// Identifier of a newly recorded event.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct RecordFeedingResponse {
    pub id: Uuid,
}

/// List feedings, oldest first.
#[utoipa::path(
    get,
    path = "/events",
    params(EventsFilter),
    responses(
        (status = 200, description = "Events", body = [Event]),
        (status = 500, description = "Internal server error", body = Error),
        (status = 503, description = "Database unavailable", body = Error)
    ),
    tags = ["events"],
    operation_id = "listEvents"
)]
#[get("/events")]
pub async fn list_events(
    state: web::Data<HttpState>,
    filter: web::Query<EventsFilter>,
) -> ApiResult<web::Json<Vec<Event>>> {
    let events = state.feeding.list_events(filter.today_only()).await?;
    Ok(web::Json(events))
}

/// Record that a known user fed the cat.
#[utoipa::path(
    post,
    path = "/events",
    request_body = RecordFeedingRequest,
    responses(
        (status = 201, description = "Feeding recorded", body = RecordFeedingResponse),
        (status = 400, description = "Invalid body", body = Error),
        (status = 404, description = "No user matches the name", body = Error),
        (status = 500, description = "Internal server error", body = Error),
        (status = 503, description = "Database unavailable", body = Error)
    ),
    tags = ["events"],
    operation_id = "recordFeeding"
)]
#[post("/events")]
pub async fn record_feeding(
    state: web::Data<HttpState>,
    payload: web::Json<RecordFeedingRequest>,
) -> ApiResult<HttpResponse> {
    let event = state.feeding_command.record_feeding(&payload.name).await?;
    Ok(HttpResponse::Created().json(RecordFeedingResponse { id: event.id }))
}

/// Delete a recorded feeding.
#[utoipa::path(
    delete,
    path = "/events/{id}",
    params(("id" = String, Path, description = "Event identifier")),
    responses(
        (status = 204, description = "Event deleted"),
        (status = 404, description = "Event does not exist", body = Error),
        (status = 500, description = "Internal server error", body = Error),
        (status = 503, description = "Database unavailable", body = Error)
    ),
    tags = ["events"],
    operation_id = "deleteEvent"
)]
#[delete("/events/{id}")]
pub async fn delete_event(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    // A malformed id cannot name a stored event.
    let id = Uuid::parse_str(&path).map_err(|err| {
        debug!(id = %path, error = %err, "event id is not a UUID");
        Error::not_found("Event does not exist")
    })?;
    state.feeding_command.delete_event(id).await?;
    Ok(HttpResponse::NoContent().finish())
}
