/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

//! HTTP routes for the HL7 codec.
//!
//! | Path         | Method | Reply                                   |
//! |--------------|--------|-----------------------------------------|
//! | `/parse`     | POST   | envelope with the parsed message        |
//! | `/generate`  | GET    | envelope with the sample message        |
//! | `/serialize` | POST   | wire text for a JSON message            |
//! | `/health`    | any    | envelope                                |
//! | `/version`   | any    | [`BuildInfo`] as JSON                   |
//!
//! A wrong method on the first three answers 405 with an envelope; an
//! unknown path answers 404 in plain text.

use crate::api::ApiResponse;
use crate::config::{BuildInfo, ServerConfig};
use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{any, get, post};
use axum::{Json, Router};
use ironhl7_core::message::Message;
use ironhl7_pipe::{parse_bytes, sample_message, serialize};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{debug, warn};

/// Body of the plain-text 404 reply.
pub const NOT_FOUND_BODY: &str = "404 page not found\n";

/// Shared state handed to the handlers.
#[derive(Debug, Clone)]
struct AppState {
    build_info: Arc<BuildInfo>,
}

/// Builds the router for all HL7 endpoints.
///
/// Request bodies larger than `config.max_request_size` are refused with 413.
pub fn router(config: &ServerConfig) -> Router {
    let state = AppState {
        build_info: Arc::new(config.build_info.clone()),
    };

    Router::new()
        .route("/parse", post(parse_message).fallback(method_not_allowed))
        .route("/generate", get(generate_message).fallback(method_not_allowed))
        .route("/serialize", post(serialize_message).fallback(method_not_allowed))
        .route("/health", any(health))
        .route("/version", any(version))
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(config.max_request_size))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Refuses a body that could not be read, with the status axum assigned.
fn body_rejected(rejection: &BytesRejection) -> Response {
    warn!(error = %rejection, "request body rejected");
    ApiResponse::error(format!("Error reading request body: {rejection}"))
        .respond(rejection.status())
}

async fn parse_message(body: Result<Bytes, BytesRejection>) -> Response {
    let body = match body {
        Ok(body) => body,
        Err(rejection) => return body_rejected(&rejection),
    };

    match parse_bytes(&body) {
        Ok(message) => {
            debug!(segments = message.len(), "parsed message");
            ApiResponse::ok("HL7 message parsed successfully", Some(message)).respond(StatusCode::OK)
        }
        Err(err) => {
            debug!(error = %err, "parse failed");
            ApiResponse::error(format!("Error parsing HL7 message: {err}"))
                .respond(StatusCode::BAD_REQUEST)
        }
    }
}

async fn generate_message() -> Response {
    ApiResponse::ok("HL7 message generated successfully", Some(sample_message()))
        .respond(StatusCode::OK)
}

async fn serialize_message(body: Result<Bytes, BytesRejection>) -> Response {
    let body = match body {
        Ok(body) => body,
        Err(rejection) => return body_rejected(&rejection),
    };

    match serde_json::from_slice::<Message>(&body) {
        Ok(message) => (StatusCode::OK, serialize(&message)).into_response(),
        Err(err) => {
            debug!(error = %err, "serialize request is not a message");
            ApiResponse::error(format!("Error decoding message: {err}"))
                .respond(StatusCode::BAD_REQUEST)
        }
    }
}

async fn health() -> Response {
    ApiResponse::ok("Service is healthy", None).respond(StatusCode::OK)
}

async fn version(State(state): State<AppState>) -> Json<BuildInfo> {
    Json(BuildInfo::clone(&state.build_info))
}

async fn method_not_allowed() -> Response {
    ApiResponse::error("Method not allowed").respond(StatusCode::METHOD_NOT_ALLOWED)
}

async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, NOT_FOUND_BODY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Method, Request, header};
    use tower::ServiceExt;

    struct Reply {
        status: StatusCode,
        content_type: Option<String>,
        body: Bytes,
    }

    impl Reply {
        fn envelope(&self) -> ApiResponse {
            serde_json::from_slice(&self.body).unwrap()
        }
    }

    async fn call(router: Router, method: Method, path: &str, body: impl Into<Body>) -> Reply {
        let request = Request::builder()
            .method(method)
            .uri(path)
            .body(body.into())
            .unwrap();
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .map(|v| v.to_str().unwrap().to_string());
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        Reply {
            status,
            content_type,
            body,
        }
    }

    fn standard() -> Router {
        router(&ServerConfig::default().with_build_info(BuildInfo::new("1.0.0", "2026-10-18")))
    }

    #[tokio::test]
    async fn test_parse_returns_message() {
        let reply = call(standard(), Method::POST, "/parse", "MSH|^~\\&|APP\rPID||123\r").await;
        assert_eq!(reply.status, StatusCode::OK);
        assert_eq!(reply.content_type.as_deref(), Some("application/json"));

        let envelope = reply.envelope();
        assert!(envelope.success);
        assert_eq!(envelope.message, "HL7 message parsed successfully");
        let msg = envelope.data.unwrap();
        assert_eq!(msg.len(), 2);
        assert_eq!(msg.segments()[1].fields()[1], "123");
    }

    #[tokio::test]
    async fn test_parse_rejects_invalid_utf8() {
        let reply = call(standard(), Method::POST, "/parse", vec![b'M', 0xff, b'|']).await;
        assert_eq!(reply.status, StatusCode::BAD_REQUEST);

        let envelope = reply.envelope();
        assert!(!envelope.success);
        assert!(envelope.message.starts_with("Error parsing HL7 message: "));
        assert_eq!(envelope.data, None);
    }

    #[tokio::test]
    async fn test_oversized_body_gets_413_envelope() {
        let router = router(&ServerConfig::default().with_max_request_size(16));
        let reply = call(router, Method::POST, "/parse", vec![b'a'; 64]).await;
        assert_eq!(reply.status, StatusCode::PAYLOAD_TOO_LARGE);
        assert!(reply.envelope().message.starts_with("Error reading request body: "));
    }

    #[tokio::test]
    async fn test_generate_returns_sample() {
        let reply = call(standard(), Method::GET, "/generate", Body::empty()).await;
        assert_eq!(reply.status, StatusCode::OK);

        let envelope = reply.envelope();
        assert_eq!(envelope.message, "HL7 message generated successfully");
        let msg = envelope.data.unwrap();
        assert_eq!(msg.segments()[0].segment_type(), "MSH");
        assert_eq!(msg.segments()[1].segment_type(), "PID");
    }

    #[tokio::test]
    async fn test_serialize_returns_wire_text() {
        let json = r#"{"Segments":[{"Type":"MSH","Fields":["^~\\&","APP"]},{"Type":"PID","Fields":["","1"]}]}"#;
        let reply = call(standard(), Method::POST, "/serialize", json).await;
        assert_eq!(reply.status, StatusCode::OK);
        assert_eq!(reply.content_type.as_deref(), Some("text/plain; charset=utf-8"));
        assert_eq!(&reply.body[..], b"MSH|^~\\&|APP\rPID||1\r");
    }

    #[tokio::test]
    async fn test_serialize_rejects_bad_json() {
        let reply = call(standard(), Method::POST, "/serialize", "{not json").await;
        assert_eq!(reply.status, StatusCode::BAD_REQUEST);
        assert!(reply.envelope().message.starts_with("Error decoding message: "));
    }

    #[tokio::test]
    async fn test_wrong_method_gets_405_envelope() {
        for (method, path) in [
            (Method::GET, "/parse"),
            (Method::POST, "/generate"),
            (Method::PUT, "/serialize"),
        ] {
            let reply = call(standard(), method, path, Body::empty()).await;
            assert_eq!(reply.status, StatusCode::METHOD_NOT_ALLOWED, "{path}");
            assert_eq!(
                &reply.body[..],
                br#"{"success":false,"message":"Method not allowed"}"#
            );
        }
    }

    #[tokio::test]
    async fn test_health_accepts_any_method() {
        for method in [Method::GET, Method::POST, Method::DELETE] {
            let reply = call(standard(), method, "/health", Body::empty()).await;
            assert_eq!(reply.status, StatusCode::OK);
            assert_eq!(
                &reply.body[..],
                br#"{"success":true,"message":"Service is healthy"}"#
            );
        }
    }

    #[tokio::test]
    async fn test_version_reports_build_info() {
        let reply = call(standard(), Method::GET, "/version", Body::empty()).await;
        assert_eq!(reply.status, StatusCode::OK);
        assert_eq!(
            &reply.body[..],
            br#"{"version":"1.0.0","buildDate":"2026-10-18"}"#
        );
    }

    #[tokio::test]
    async fn test_unknown_path_gets_plain_404() {
        let reply = call(standard(), Method::GET, "/missing", Body::empty()).await;
        assert_eq!(reply.status, StatusCode::NOT_FOUND);
        assert_eq!(reply.content_type.as_deref(), Some("text/plain; charset=utf-8"));
        assert_eq!(&reply.body[..], NOT_FOUND_BODY.as_bytes());
    }
}
