//! Server construction and middleware wiring.

pub mod doc;

use actix_web::body::MessageBody;
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App, HttpServer};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use self::doc::ApiDoc;
use crate::config::ServerSettings;
use crate::inbound::http::{health, respond, users, AppState};
use crate::middleware::{AccessLog, Cors, Recovery, RequestIdTagger};

/// Assemble the application: state, extractor error handlers, the middleware
/// chain, and the route table.
///
/// Middleware runs access log → recovery → CORS → request-ID tagging from the
/// outside in, so the log line covers recovered panics and preflight
/// short-circuits, and a generated request identifier is visible to handlers.
pub fn build_app(
    state: web::Data<AppState>,
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
        .app_data(state)
        .app_data(web::JsonConfig::default().error_handler(respond::json_error_handler))
        .app_data(web::PathConfig::default().error_handler(respond::path_error_handler))
        .app_data(web::QueryConfig::default().error_handler(respond::query_error_handler))
        // Registration order is inside-out: the last wrap is outermost.
        .wrap(RequestIdTagger)
        .wrap(Cors)
        .wrap(Recovery)
        .wrap(AccessLog)
        .service(health::health)
        .service(health::ping)
        .service(web::scope("/api/v1").configure(users::configure))
        .default_service(web::route().to(respond::fallback_not_found));

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Bind and spawn the HTTP server.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(settings: &ServerSettings, state: AppState) -> std::io::Result<Server> {
    let state = web::Data::new(state);
    let server = HttpServer::new(move || build_app(state.clone()))
        .bind((settings.host(), settings.port()))?
        .run();
    Ok(server)
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::test;
    use rstest::rstest;
    use serde_json::{json, Value};

    use super::*;

    #[rstest]
    #[actix_web::test]
    async fn unmatched_routes_answer_with_an_envelope() {
        let app = test::init_service(build_app(web::Data::new(AppState::in_memory()))).await;
        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/no/such/route").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body, json!({"code": 404, "message": "resource not found"}));
    }

    #[rstest]
    #[actix_web::test]
    async fn the_assembled_app_serves_health_and_users() {
        let app = test::init_service(build_app(web::Data::new(AppState::in_memory()))).await;

        let res =
            test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert!(res.headers().contains_key("x-request-id"));
        assert_eq!(
            res.headers()
                .get("access-control-allow-origin")
                .and_then(|v| v.to_str().ok()),
            Some("*")
        );

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/users")
                .set_json(json!({
                    "username": "ada",
                    "email": "ada@example.com",
                    "password": "hunter2",
                }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["code"], 0);
        assert_eq!(body["data"]["username"], "ada");
    }
}
