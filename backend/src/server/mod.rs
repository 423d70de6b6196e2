//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::{AppSettings, ServerConfig};

use state_builders::build_http_state;

use actix_cors::Cors;
use actix_web::body::MessageBody;
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::header;
use actix_web::{App, HttpServer, web};

use chatte_backend::Trace;
#[cfg(debug_assertions)]
use chatte_backend::doc::ApiDoc;
use chatte_backend::inbound::http::events::{delete_event, list_events, record_feeding};
use chatte_backend::inbound::http::health::{HealthState, database_health, live, ready};
use chatte_backend::inbound::http::hunger::chatte_message;
use chatte_backend::inbound::http::json_config;
use chatte_backend::inbound::http::root::welcome;
use chatte_backend::inbound::http::state::HttpState;
use chatte_backend::inbound::http::users::{create_user, list_users};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Preflight results may be cached by browsers for this many seconds.
const CORS_MAX_AGE_SECS: usize = 300;

/// Any `http` or `https` origin may call the API with credentials.
fn cors() -> Cors {
    Cors::default()
        .allowed_origin_fn(|origin, _head| {
            let origin = origin.as_bytes();
            origin.starts_with(b"https://") || origin.starts_with(b"http://")
        })
        .allowed_methods(["GET", "POST", "PUT", "DELETE", "OPTIONS", "PATCH"])
        .allowed_headers([header::ACCEPT, header::AUTHORIZATION, header::CONTENT_TYPE])
        .supports_credentials()
        .max_age(CORS_MAX_AGE_SECS)
}

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(json_config())
        .wrap(Trace)
        .wrap(cors())
        .service(welcome)
        .service(list_users)
        .service(create_user)
        .service(list_events)
        .service(record_feeding)
        .service(delete_event)
        .service(chatte_message)
        .service(database_health)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Parameters
/// - `health_state`: shared readiness state, marked ready once the listener is bound.
/// - `config`: validated [`ServerConfig`] carrying the bind address and pool.
///
/// # Returns
/// A [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let ServerConfig { bind_addr, db_pool } = config;
    let http_state = build_http_state(&db_pool);

    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), http_state.clone())
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use chatte_backend::test_support::StubHealthProbe;
    use rstest::rstest;
    use std::sync::Arc;

    fn stub_state() -> web::Data<HttpState> {
        use chatte_backend::domain::{FeedingService, UsersService};
        use chatte_backend::test_support::{
            FixtureClock, InMemoryEventRepository, InMemoryUserRepository, fixture_now,
        };

        let users = Arc::new(InMemoryUserRepository::default());
        web::Data::new(HttpState::new(
            Arc::new(UsersService::new(users.clone())),
            Arc::new(FeedingService::new(
                Arc::new(InMemoryEventRepository::default()),
                users,
                Arc::new(FixtureClock::at(fixture_now())),
            )),
            Arc::new(StubHealthProbe::healthy()),
        ))
    }

    #[rstest]
    #[case("/", StatusCode::OK)]
    #[case("/users", StatusCode::OK)]
    #[case("/events?today=true", StatusCode::OK)]
    #[case("/chatte-message", StatusCode::OK)]
    #[case("/health", StatusCode::OK)]
    #[case("/health/live", StatusCode::OK)]
    #[case("/health/ready", StatusCode::SERVICE_UNAVAILABLE)]
    #[actix_web::test]
    async fn routes_are_mounted(#[case] uri: &str, #[case] expected: StatusCode) {
        let app = actix_test::init_service(build_app(
            web::Data::new(HealthState::new()),
            stub_state(),
        ))
        .await;

        let response = actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request()).await;

        assert_eq!(response.status(), expected);
        assert!(response.headers().contains_key("trace-id"));
    }

    const BROWSER_ORIGIN: &str = "https://feed-chatte.example";

    fn allowed_origin<B>(response: &ServiceResponse<B>) -> Option<&str> {
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|value| value.to_str().ok())
    }

    #[rstest]
    #[actix_web::test]
    async fn preflight_is_answered_for_web_origins() {
        let app = actix_test::init_service(build_app(
            web::Data::new(HealthState::new()),
            stub_state(),
        ))
        .await;
        let request = actix_test::TestRequest::default()
            .method(actix_web::http::Method::OPTIONS)
            .uri("/events")
            .insert_header((header::ORIGIN, BROWSER_ORIGIN))
            .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "POST"))
            .insert_header((header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type"))
            .to_request();

        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(allowed_origin(&response), Some(BROWSER_ORIGIN));
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS)
                .and_then(|value| value.to_str().ok()),
            Some("true")
        );
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_MAX_AGE)
                .and_then(|value| value.to_str().ok()),
            Some("300")
        );
    }

    #[rstest]
    #[actix_web::test]
    async fn simple_requests_echo_the_origin() {
        let app = actix_test::init_service(build_app(
            web::Data::new(HealthState::new()),
            stub_state(),
        ))
        .await;
        let request = actix_test::TestRequest::get()
            .uri("/users")
            .insert_header((header::ORIGIN, BROWSER_ORIGIN))
            .to_request();

        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(allowed_origin(&response), Some(BROWSER_ORIGIN));
    }

    #[rstest]
    #[actix_web::test]
    async fn non_web_origins_are_not_allowed() {
        let app = actix_test::init_service(build_app(
            web::Data::new(HealthState::new()),
            stub_state(),
        ))
        .await;
        let request = actix_test::TestRequest::default()
            .method(actix_web::http::Method::OPTIONS)
            .uri("/events")
            .insert_header((header::ORIGIN, "file://local"))
            .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "GET"))
            .to_request();

        let response = actix_test::call_service(&app, request).await;

        assert_eq!(allowed_origin(&response), None);
    }
}
