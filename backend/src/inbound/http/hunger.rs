//! `GET /chatte-message`: the cat's current mood.

use actix_web::{get, web};

use crate::domain::{Error, HungerReport};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Classify how long ago the latest feeding happened.
///
/// Reports `starving` when nothing has been recorded yet.
#[utoipa::path(
    get,
    path = "/chatte-message",
    responses(
        (status = 200, description = "Current hunger status", body = HungerReport),
        (status = 500, description = "Internal server error", body = Error),
        (status = 503, description = "Database unavailable", body = Error)
    ),
    tags = ["events"],
    operation_id = "chatteMessage"
)]
#[get("/chatte-message")]
pub async fn chatte_message(state: web::Data<HttpState>) -> ApiResult<web::Json<HungerReport>> {
    Ok(web::Json(state.feeding.hunger_status().await?))
}
