//! Users API handlers.
//!
//! ```text
//! GET /users?name=ad
//! POST /users {"name":"Ada"}
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Error, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Query string for `GET /users`.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct UsersFilter {
    /// Case-insensitive substring of the name; returns at most one user.
    pub name: Option<String>,
}

/// Request body for `POST /users`.
///
/// Example JSON: `{"name":"Ada"}`. The capitalised key `Name` is also
/// accepted for older clients.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateUserRequest {
    #[serde(alias = "Name")]
    #[schema(example = "Ada")]
    pub name: String,
}

/// List feeders, optionally narrowed to one matching name.
#[utoipa::path(
    get,
    path = "/users",
    params(UsersFilter),
    responses(
        (status = 200, description = "Users", body = [User]),
        (status = 500, description = "Internal server error", body = Error),
        (status = 503, description = "Database unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(
    state: web::Data<HttpState>,
    filter: web::Query<UsersFilter>,
) -> ApiResult<web::Json<Vec<User>>> {
    let users = state.users.list_users(filter.name.as_deref()).await?;
    Ok(web::Json(users))
}

/// Register a feeder.
///
/// Rejected when an existing name already contains the requested one.
#[utoipa::path(
    post,
    path = "/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Invalid body or user already exists", body = Error),
        (status = 500, description = "Internal server error", body = Error),
        (status = 503, description = "Database unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<CreateUserRequest>,
) -> ApiResult<HttpResponse> {
    let user = state.users_command.create_user(&payload.name).await?;
    Ok(HttpResponse::Created().json(user))
}
