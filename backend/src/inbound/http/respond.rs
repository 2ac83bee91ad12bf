//! The uniform response envelope.
//!
//! Every endpoint, success or failure, writes exactly one
//! `{code, message, data}` envelope as its body. `code = 0` signals success;
//! a non-zero code with HTTP 200 is a soft failure the caller detects from
//! the envelope alone. Only the named helpers (`bad_request`, `unauthorized`,
//! `forbidden`, `not_found`, `internal_server_error`) communicate failure
//! through the transport status, using the matching HTTP status number as
//! the envelope code.
//!
//! [`AppError`] implements [`ResponseError`], so handlers `?`-propagate
//! domain failures and the boundary renders them as soft failures, logging
//! the wrapped cause server-side without ever serialising it outward.

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError};
use pagination::Page;
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::domain::{AppError, ErrorCode};

/// The `{code, message, data}` wire shape.
///
/// `data` is omitted from the body entirely when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Envelope<T> {
    /// Application status code; `0` is success.
    pub code: ErrorCode,
    /// Human-readable outcome.
    pub message: String,
    /// Optional payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> Envelope<T> {
    /// Assemble an envelope.
    pub fn of(code: ErrorCode, message: impl Into<String>, data: Option<T>) -> Self {
        Self {
            code,
            message: message.into(),
            data,
        }
    }
}

fn json(status: StatusCode, envelope: &Envelope<impl Serialize>) -> HttpResponse {
    HttpResponse::build(status).json(envelope)
}

/// `code = 0`, default success message, no payload; HTTP 200.
pub fn success() -> HttpResponse {
    success_with_message(ErrorCode::SUCCESS.default_message())
}

/// `code = 0` with a payload; HTTP 200.
pub fn success_with_data(data: impl Serialize) -> HttpResponse {
    success_with_data_and_message(data, ErrorCode::SUCCESS.default_message())
}

/// `code = 0` with a custom message and no payload; HTTP 200.
pub fn success_with_message(message: impl Into<String>) -> HttpResponse {
    json(
        StatusCode::OK,
        &Envelope::<()>::of(ErrorCode::SUCCESS, message, None),
    )
}

/// `code = 0` with both a payload and a custom message; HTTP 200.
pub fn success_with_data_and_message(data: impl Serialize, message: impl Into<String>) -> HttpResponse {
    json(
        StatusCode::OK,
        &Envelope::of(ErrorCode::SUCCESS, message, Some(data)),
    )
}

/// `code = 0` with a page envelope as the payload; HTTP 200.
///
/// `total_pages` is derived by the page envelope's integer-division rule.
pub fn success_with_page(
    list: Vec<impl Serialize>,
    total: i64,
    page: u32,
    page_size: u32,
) -> HttpResponse {
    success_with_data(Page::new(list, total, page, page_size))
}

/// Soft failure: arbitrary code and message, HTTP 200.
///
/// The message is used verbatim, even when empty; callers wanting the
/// registered default go through [`ErrorCode::default_message`].
pub fn fail(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    json(StatusCode::OK, &Envelope::<()>::of(code, message, None))
}

/// Soft failure carrying a payload, HTTP 200.
pub fn fail_with_data(
    code: ErrorCode,
    message: impl Into<String>,
    data: impl Serialize,
) -> HttpResponse {
    json(StatusCode::OK, &Envelope::of(code, message, Some(data)))
}

fn status_failure(status: StatusCode, message: impl Into<String>) -> HttpResponse {
    let code = ErrorCode::new(i32::from(status.as_u16()));
    json(status, &Envelope::<()>::of(code, message, None))
}

/// Envelope code 400, HTTP 400.
pub fn bad_request(message: impl Into<String>) -> HttpResponse {
    status_failure(StatusCode::BAD_REQUEST, message)
}

/// Envelope code 401, HTTP 401.
pub fn unauthorized(message: impl Into<String>) -> HttpResponse {
    status_failure(StatusCode::UNAUTHORIZED, message)
}

/// Envelope code 403, HTTP 403.
pub fn forbidden(message: impl Into<String>) -> HttpResponse {
    status_failure(StatusCode::FORBIDDEN, message)
}

/// Envelope code 404, HTTP 404.
pub fn not_found(message: impl Into<String>) -> HttpResponse {
    status_failure(StatusCode::NOT_FOUND, message)
}

/// Envelope code 500, HTTP 500.
pub fn internal_server_error(message: impl Into<String>) -> HttpResponse {
    status_failure(StatusCode::INTERNAL_SERVER_ERROR, message)
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        StatusCode::OK
    }

    fn error_response(&self) -> HttpResponse {
        // Full detail, wrapped cause included, stays in the server log; the
        // client sees only the code and message.
        error!(code = self.code().value(), error = %self, "request failed");
        fail(self.code(), self.message())
    }
}

/// Render JSON body rejections as bad-request envelopes.
pub fn json_error_handler(
    err: actix_web::error::JsonPayloadError,
    _req: &HttpRequest,
) -> actix_web::Error {
    let response = bad_request(err.to_string());
    actix_web::error::InternalError::from_response(err, response).into()
}

/// Render path parameter rejections as bad-request envelopes.
pub fn path_error_handler(err: actix_web::error::PathError, _req: &HttpRequest) -> actix_web::Error {
    let response = bad_request(err.to_string());
    actix_web::error::InternalError::from_response(err, response).into()
}

/// Render query string rejections as bad-request envelopes.
pub fn query_error_handler(
    err: actix_web::error::QueryPayloadError,
    _req: &HttpRequest,
) -> actix_web::Error {
    let response = bad_request(err.to_string());
    actix_web::error::InternalError::from_response(err, response).into()
}

/// Default service for unmatched routes.
pub async fn fallback_not_found() -> HttpResponse {
    not_found("resource not found")
}

#[cfg(test)]
mod tests;
