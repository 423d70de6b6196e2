//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint of the inbound layer together
//! with the request, response and error schemas they reference. Swagger UI
//! serves the document at `/docs` in debug builds.

use utoipa::OpenApi;

use crate::domain::{Error, ErrorCode, Event, HungerReport, HungerStatus, User};
use crate::inbound::http::events::{RecordFeedingRequest, RecordFeedingResponse};
use crate::inbound::http::health::{DatabaseHealth, DatabaseStatus};
use crate::inbound::http::users::CreateUserRequest;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Feed Chatte backend API",
        description = "Feeders, feeding events and the cat's hunger status."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::root::welcome,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::create_user,
        crate::inbound::http::events::list_events,
        crate::inbound::http::events::record_feeding,
        crate::inbound::http::events::delete_event,
        crate::inbound::http::hunger::chatte_message,
        crate::inbound::http::health::database_health,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        User,
        Event,
        HungerReport,
        HungerStatus,
        Error,
        ErrorCode,
        CreateUserRequest,
        RecordFeedingRequest,
        RecordFeedingResponse,
        DatabaseHealth,
        DatabaseStatus,
    )),
    tags(
        (name = "users", description = "People who feed the cat"),
        (name = "events", description = "Feeding log and hunger status"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("/")]
    #[case("/users")]
    #[case("/events")]
    #[case("/events/{id}")]
    #[case("/chatte-message")]
    #[case("/health")]
    #[case("/health/ready")]
    #[case("/health/live")]
    fn document_lists_path(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }

    #[rstest]
    fn users_path_documents_both_methods() {
        let doc = ApiDoc::openapi();
        let item = doc.paths.paths.get("/users").expect("users path");
        assert!(item.get.is_some());
        assert!(item.post.is_some());
    }

    #[rstest]
    #[case("User")]
    #[case("Event")]
    #[case("HungerReport")]
    #[case("Error")]
    fn document_registers_schema(#[case] name: &str) {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.schemas.contains_key(name), "missing {name}");
    }
}
