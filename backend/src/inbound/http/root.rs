//! Landing route.

use actix_web::{HttpResponse, get};

/// Greeting returned by `GET /`.
pub const WELCOME: &str = "Welcome to Feed Chatte Backend";

/// Plain-text greeting, handy as a smoke check.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Greeting", body = String, content_type = "text/plain")),
    tags = ["health"],
    operation_id = "welcome"
)]
#[get("/")]
pub async fn welcome() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(WELCOME)
}
