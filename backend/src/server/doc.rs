//! OpenAPI document served by Swagger UI in debug builds.

use utoipa::OpenApi;

use crate::inbound::http::health::{self, HealthInfo};
use crate::inbound::http::users::{self, CreateUserRequest, UpdateUserRequest, UserResponse};

/// Public OpenAPI surface.
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        health::ping,
        users::create_user,
        users::list_users,
        users::get_user,
        users::update_user,
        users::delete_user,
    ),
    components(schemas(HealthInfo, CreateUserRequest, UpdateUserRequest, UserResponse)),
    tags(
        (name = "health", description = "Liveness probes"),
        (name = "users", description = "User management"),
    )
)]
pub struct ApiDoc;
