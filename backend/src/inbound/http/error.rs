//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while allowing Actix
//! handlers to turn domain failures into consistent JSON responses and status
//! codes.

use actix_web::error::JsonPayloadError;
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode, web};
use tracing::{debug, error};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn redact_if_internal(error: &Error) -> Error {
    if matches!(error.code(), ErrorCode::InternalError) {
        let mut redacted = Error::internal("Internal server error");
        if let Some(id) = error.trace_id() {
            redacted = redacted.with_trace_id(id.to_owned());
        }
        redacted
    } else {
        error.clone()
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        if matches!(self.code(), ErrorCode::InternalError) {
            error!(message = self.message(), trace_id = ?self.trace_id(), "request failed");
        }

        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }

        builder.json(redact_if_internal(self))
    }
}

/// JSON extractor configuration answering malformed bodies with the shared
/// error payload instead of Actix's plain-text default.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
        debug!(error = %err, "rejected request body");
        Error::invalid_request(format!("Invalid request body: {err}")).into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use actix_web::http::header::HeaderMap;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::{Value, json};

    const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

    #[rstest]
    #[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
    #[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
    #[case(Error::service_unavailable("down"), StatusCode::SERVICE_UNAVAILABLE)]
    #[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
    fn status_code_matches_error_code(#[case] error: Error, #[case] expected: StatusCode) {
        assert_eq!(ResponseError::status_code(&error), expected);
    }

    async fn body_of(error: &Error) -> (HeaderMap, Value) {
        let response = ResponseError::error_response(error);
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body())
            .await
            .expect("reading response body succeeds");
        let value = serde_json::from_slice(&bytes).expect("error JSON");
        (headers, value)
    }

    #[rstest]
    #[actix_web::test]
    async fn internal_errors_are_redacted_but_keep_trace_id() {
        let error = Error::internal("relation \"events\" does not exist")
            .with_trace_id(TRACE_ID)
            .with_details(json!({"sql": "SELECT"}));

        let (headers, body) = body_of(&error).await;

        assert_eq!(
            headers
                .get(TRACE_ID_HEADER)
                .and_then(|value| value.to_str().ok()),
            Some(TRACE_ID)
        );
        assert_eq!(body["message"], "Internal server error");
        assert_eq!(body["traceId"], TRACE_ID);
        assert!(body.get("details").is_none());
    }

    #[rstest]
    #[actix_web::test]
    async fn client_errors_keep_message_and_details() {
        let error = Error::invalid_request("User already exists")
            .with_details(json!({"code": "user_exists"}));

        let (headers, body) = body_of(&error).await;

        assert!(headers.get(TRACE_ID_HEADER).is_none());
        assert_eq!(body["code"], "invalid_request");
        assert_eq!(body["message"], "User already exists");
        assert_eq!(body["details"]["code"], "user_exists");
    }

    #[rstest]
    #[actix_web::test]
    async fn malformed_json_body_is_invalid_request() {
        use actix_web::{App, HttpResponse as Response, post};

        #[post("/echo")]
        async fn echo(payload: web::Json<Value>) -> Response {
            Response::Ok().json(payload.into_inner())
        }

        let app =
            actix_test::init_service(App::new().app_data(json_config()).service(echo)).await;
        let request = actix_test::TestRequest::post()
            .uri("/echo")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request();

        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["code"], "invalid_request");
    }
}
