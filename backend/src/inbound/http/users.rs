//! User management endpoints.
//!
//! Handlers stay thin: decode the request, call the service, wrap the
//! outcome in the response envelope. Domain failures propagate as
//! [`AppError`] and are rendered by its `ResponseError` impl.

use actix_web::{delete, get, post, put, web, HttpResponse};
use chrono::{DateTime, Utc};
use pagination::PageQuery;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::respond::{self, Envelope};
use super::state::AppState;
use crate::domain::{ApiResult, AppError, NewUser, User, UserChanges, UserStatus};

/// Registration payload.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    /// Unique login name.
    pub username: String,
    /// Unique contact address.
    pub email: String,
    /// Display name; defaults to the login name when blank.
    #[serde(default)]
    pub nickname: String,
    /// Plaintext credential as supplied by the client.
    pub password: String,
}

impl From<CreateUserRequest> for NewUser {
    fn from(request: CreateUserRequest) -> Self {
        Self {
            username: request.username,
            email: request.email,
            nickname: request.nickname,
            password: request.password,
        }
    }
}

/// Partial update payload; absent fields are left untouched.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateUserRequest {
    /// New display name.
    pub nickname: Option<String>,
    /// New contact address.
    pub email: Option<String>,
    /// New account status: `0` disabled, `1` active.
    pub status: Option<i32>,
}

impl TryFrom<UpdateUserRequest> for UserChanges {
    type Error = AppError;

    fn try_from(request: UpdateUserRequest) -> Result<Self, Self::Error> {
        let status = request
            .status
            .map(|raw| {
                UserStatus::from_i32(raw)
                    .ok_or_else(|| AppError::invalid_params("status must be 0 or 1"))
            })
            .transpose()?;
        Ok(Self {
            nickname: request.nickname,
            email: request.email,
            status,
        })
    }
}

/// Client-facing account representation. The credential never leaves the
/// server.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    /// Account identifier.
    pub id: Uuid,
    /// Login name.
    pub username: String,
    /// Contact address.
    pub email: String,
    /// Display name.
    pub nickname: String,
    /// Account status: `0` disabled, `1` active.
    pub status: i32,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
    /// Last modification instant.
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            nickname: user.nickname,
            status: user.status.as_i32(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Register a new account.
#[utoipa::path(
    post,
    path = "/users",
    context_path = "/api/v1",
    tag = "users",
    request_body = CreateUserRequest,
    responses((status = 200, description = "Created account in an envelope", body = Envelope<UserResponse>))
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<AppState>,
    payload: web::Json<CreateUserRequest>,
) -> ApiResult<HttpResponse> {
    let user = state.users().create(payload.into_inner().into()).await?;
    Ok(respond::success_with_data(UserResponse::from(user)))
}

/// Fetch one account by identifier.
#[utoipa::path(
    get,
    path = "/users/{id}",
    context_path = "/api/v1",
    tag = "users",
    params(("id" = Uuid, Path, description = "Account identifier")),
    responses((status = 200, description = "Account in an envelope", body = Envelope<UserResponse>))
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let user = state.users().get(path.into_inner()).await?;
    Ok(respond::success_with_data(UserResponse::from(user)))
}

/// List accounts one page at a time.
#[utoipa::path(
    get,
    path = "/users",
    context_path = "/api/v1",
    tag = "users",
    responses((status = 200, description = "Page of accounts in an envelope"))
)]
#[get("/users")]
pub async fn list_users(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> ApiResult<HttpResponse> {
    let request = query.into_inner().normalize();
    let (users, total) = state.users().list(request).await?;
    let list: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();
    Ok(respond::success_with_page(
        list,
        total,
        request.page,
        request.page_size,
    ))
}

/// Apply a partial update to an account.
#[utoipa::path(
    put,
    path = "/users/{id}",
    context_path = "/api/v1",
    tag = "users",
    params(("id" = Uuid, Path, description = "Account identifier")),
    request_body = UpdateUserRequest,
    responses((status = 200, description = "Updated account in an envelope", body = Envelope<UserResponse>))
)]
#[put("/users/{id}")]
pub async fn update_user(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    payload: web::Json<UpdateUserRequest>,
) -> ApiResult<HttpResponse> {
    let changes = UserChanges::try_from(payload.into_inner())?;
    let user = state.users().update(path.into_inner(), changes).await?;
    Ok(respond::success_with_data(UserResponse::from(user)))
}

/// Remove an account.
#[utoipa::path(
    delete,
    path = "/users/{id}",
    context_path = "/api/v1",
    tag = "users",
    params(("id" = Uuid, Path, description = "Account identifier")),
    responses((status = 200, description = "Empty success envelope"))
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    state.users().delete(path.into_inner()).await?;
    Ok(respond::success())
}

/// Mount the user routes on a scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(create_user)
        .service(list_users)
        .service(get_user)
        .service(update_user)
        .service(delete_user);
}

#[cfg(test)]
mod tests;
