//! Liveness endpoints.

use actix_web::{get, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::respond::{self, Envelope};

/// Payload reported by the health endpoint.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthInfo {
    /// Fixed `"ok"` marker.
    pub status: String,
    /// Server time at the moment of the probe.
    pub time: DateTime<Utc>,
}

/// Process liveness probe.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses((status = 200, description = "Service is up", body = Envelope<HealthInfo>))
)]
#[get("/health")]
pub async fn health() -> HttpResponse {
    respond::success_with_data(HealthInfo {
        status: "ok".to_owned(),
        time: Utc::now(),
    })
}

/// Minimal round-trip probe.
#[utoipa::path(
    get,
    path = "/ping",
    tag = "health",
    responses((status = 200, description = "Service answers", body = Envelope<String>))
)]
#[get("/ping")]
pub async fn ping() -> HttpResponse {
    respond::success_with_data("pong")
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use rstest::rstest;
    use serde_json::Value;

    use super::*;

    #[rstest]
    #[actix_web::test]
    async fn health_reports_ok_inside_an_envelope() {
        let app = test::init_service(App::new().service(health)).await;
        let response = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["code"], 0);
        assert_eq!(body["data"]["status"], "ok");
        assert!(body["data"]["time"].is_string());
    }

    #[rstest]
    #[actix_web::test]
    async fn ping_answers_pong() {
        let app = test::init_service(App::new().service(ping)).await;
        let response = test::call_service(&app, test::TestRequest::get().uri("/ping").to_request()).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["code"], 0);
        assert_eq!(body["data"], "pong");
    }
}
