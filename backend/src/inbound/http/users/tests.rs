use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{test, web, App, Error};
use rstest::rstest;
use serde_json::{json, Value};

use super::*;
use crate::inbound::http::respond;

async fn spawn_app() -> impl Service<actix_http::Request, Response = ServiceResponse, Error = Error> {
    test::init_service(
        App::new()
            .app_data(web::Data::new(AppState::in_memory()))
            .app_data(web::JsonConfig::default().error_handler(respond::json_error_handler))
            .app_data(web::PathConfig::default().error_handler(respond::path_error_handler))
            .app_data(web::QueryConfig::default().error_handler(respond::query_error_handler))
            .configure(configure),
    )
    .await
}

fn registration(name: &str) -> Value {
    json!({
        "username": name,
        "email": format!("{name}@example.com"),
        "password": "hunter2",
    })
}

async fn create(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = Error>,
    name: &str,
) -> Value {
    let response = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/users")
            .set_json(registration(name))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    test::read_body_json(response).await
}

#[rstest]
#[actix_web::test]
async fn create_then_get_round_trips() {
    let app = spawn_app().await;
    let created = create(&app, "ada").await;
    assert_eq!(created["code"], 0);
    assert_eq!(created["data"]["username"], "ada");
    // Blank nickname falls back to the login name.
    assert_eq!(created["data"]["nickname"], "ada");
    assert_eq!(created["data"]["status"], 1);
    assert!(created["data"].get("password").is_none());

    let id = created["data"]["id"].as_str().expect("id present");
    let response = test::call_service(
        &app,
        test::TestRequest::get().uri(&format!("/users/{id}")).to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["data"]["id"], id);
}

#[rstest]
#[actix_web::test]
async fn duplicate_registration_is_a_soft_failure() {
    let app = spawn_app().await;
    create(&app, "ada").await;

    let response = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/users")
            .set_json(registration("ada"))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["code"], 20_002);
    assert_eq!(body["message"], "user already exists");
}

#[rstest]
#[actix_web::test]
async fn malformed_json_gets_a_bad_request_envelope() {
    let app = spawn_app().await;
    let response = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/users")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["code"], 400);
}

#[rstest]
#[actix_web::test]
async fn malformed_id_gets_a_bad_request_envelope() {
    let app = spawn_app().await;
    let response = test::call_service(
        &app,
        test::TestRequest::get().uri("/users/not-a-uuid").to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["code"], 400);
}

#[rstest]
#[actix_web::test]
async fn unknown_user_is_a_soft_failure() {
    let app = spawn_app().await;
    let response = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/users/{}", Uuid::new_v4()))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["code"], 20_001);
    assert_eq!(body["message"], "user not found");
}

#[rstest]
#[actix_web::test]
async fn listing_pages_with_derived_totals() {
    let app = spawn_app().await;
    for index in 0..5 {
        create(&app, &format!("user{index}")).await;
    }

    let response = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/users?page=2&page_size=2")
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["code"], 0);
    assert_eq!(body["data"]["total"], 5);
    assert_eq!(body["data"]["page"], 2);
    assert_eq!(body["data"]["page_size"], 2);
    assert_eq!(body["data"]["total_pages"], 3);
    assert_eq!(body["data"]["list"].as_array().map(Vec::len), Some(2));
}

#[rstest]
#[actix_web::test]
async fn update_applies_partial_changes() {
    let app = spawn_app().await;
    let created = create(&app, "ada").await;
    let id = created["data"]["id"].as_str().expect("id present");

    let response = test::call_service(
        &app,
        test::TestRequest::put()
            .uri(&format!("/users/{id}"))
            .set_json(json!({"nickname": "Countess", "status": 0}))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["code"], 0);
    assert_eq!(body["data"]["nickname"], "Countess");
    assert_eq!(body["data"]["status"], 0);
    assert_eq!(body["data"]["email"], "ada@example.com");
}

#[rstest]
#[actix_web::test]
async fn update_rejects_an_unknown_status_value() {
    let app = spawn_app().await;
    let created = create(&app, "ada").await;
    let id = created["data"]["id"].as_str().expect("id present");

    let response = test::call_service(
        &app,
        test::TestRequest::put()
            .uri(&format!("/users/{id}"))
            .set_json(json!({"status": 7}))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["code"], 10_001);
    assert_eq!(body["message"], "status must be 0 or 1");
}

#[rstest]
#[actix_web::test]
async fn delete_then_get_reports_missing() {
    let app = spawn_app().await;
    let created = create(&app, "ada").await;
    let id = created["data"]["id"].as_str().expect("id present");

    let response = test::call_service(
        &app,
        test::TestRequest::delete().uri(&format!("/users/{id}")).to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body, json!({"code": 0, "message": "success"}));

    let response = test::call_service(
        &app,
        test::TestRequest::get().uri(&format!("/users/{id}")).to_request(),
    )
    .await;
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["code"], 20_001);
}
