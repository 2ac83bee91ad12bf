use actix_web::body::to_bytes;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use rstest::rstest;
use serde_json::{json, Value};

use super::*;
use crate::domain::{AppError, ErrorCode};

async fn body_json(response: HttpResponse) -> Value {
    let bytes = to_bytes(response.into_body()).await.expect("readable body");
    serde_json::from_slice(&bytes).expect("valid json body")
}

#[rstest]
#[actix_web::test]
async fn success_without_payload_omits_data() {
    let response = success();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body, json!({"code": 0, "message": "success"}));
}

#[rstest]
#[actix_web::test]
async fn success_with_data_wraps_the_payload() {
    let response = success_with_data(json!({"id": 7}));
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(
        body,
        json!({"code": 0, "message": "success", "data": {"id": 7}})
    );
}

#[rstest]
#[actix_web::test]
async fn page_helper_derives_total_pages() {
    let response = success_with_page(vec![1, 2, 3], 25, 2, 10);
    let body = body_json(response).await;
    assert_eq!(body["data"]["total"], 25);
    assert_eq!(body["data"]["page"], 2);
    assert_eq!(body["data"]["page_size"], 10);
    assert_eq!(body["data"]["total_pages"], 3);
    assert_eq!(body["data"]["list"], json!([1, 2, 3]));
}

#[rstest]
#[actix_web::test]
async fn fail_keeps_http_200_and_verbatim_message() {
    let response = fail(ErrorCode::USER_NOT_FOUND, "");
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body, json!({"code": 20_001, "message": ""}));
}

#[rstest]
#[actix_web::test]
async fn fail_with_data_carries_the_payload() {
    let response = fail_with_data(ErrorCode::VALIDATION_ERROR, "bad field", json!(["email"]));
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["code"], 10_008);
    assert_eq!(body["data"], json!(["email"]));
}

#[rstest]
#[case(not_found("user not found"), StatusCode::NOT_FOUND, 404, "user not found")]
#[case(bad_request("bad input"), StatusCode::BAD_REQUEST, 400, "bad input")]
#[case(unauthorized("who goes there"), StatusCode::UNAUTHORIZED, 401, "who goes there")]
#[case(forbidden("no entry"), StatusCode::FORBIDDEN, 403, "no entry")]
#[case(internal_server_error("boom"), StatusCode::INTERNAL_SERVER_ERROR, 500, "boom")]
#[actix_web::test]
async fn status_helpers_mirror_the_transport_status(
    #[case] response: HttpResponse,
    #[case] status: StatusCode,
    #[case] code: i32,
    #[case] message: &str,
) {
    assert_eq!(response.status(), status);
    let body = body_json(response).await;
    assert_eq!(body, json!({"code": code, "message": message}));
}

#[rstest]
#[actix_web::test]
async fn app_errors_render_as_soft_failures() {
    let err = AppError::from_code(ErrorCode::USER_NOT_FOUND);
    assert_eq!(err.status_code(), StatusCode::OK);
    let body = body_json(err.error_response()).await;
    assert_eq!(body, json!({"code": 20_001, "message": "user not found"}));
}

#[rstest]
#[actix_web::test]
async fn wrapped_causes_never_reach_the_body() {
    let err = AppError::database(std::io::Error::other("connection reset by peer"));
    let body = body_json(err.error_response()).await;
    assert_eq!(body, json!({"code": 10_007, "message": "database error"}));
}

#[rstest]
#[actix_web::test]
async fn unmatched_routes_get_an_envelope() {
    let response = fallback_not_found().await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body, json!({"code": 404, "message": "resource not found"}));
}

#[rstest]
fn envelope_round_trips_through_serde() {
    let envelope = Envelope::of(ErrorCode::SUCCESS, "success", Some(vec![1, 2]));
    let text = serde_json::to_string(&envelope).expect("serialises");
    let back: Envelope<Vec<i32>> = serde_json::from_str(&text).expect("deserialises");
    assert_eq!(back, envelope);
}
