//! Domain primitives and aggregates.
//!
//! Purpose: Define strongly typed domain entities and use cases shared by
//! the API and persistence layers. Keep types immutable and document
//! invariants and serialisation contracts (serde) in each type's Rustdoc.
//!
//! Public surface:
//! - AppError / ErrorCode (aliases into `error`) — coded application errors.
//! - User, NewUser, UserChanges, UserStatus (aliases into `user`).
//! - UserRepository (alias into `ports`) — persistence port.
//! - UserService (alias into `user_service`) — user management use cases.

pub mod error;
pub mod ports;
pub mod user;
pub mod user_service;

pub use self::error::{classify, code_of, AppError, ErrorCode, UNKNOWN_ERROR_MESSAGE};
pub use self::ports::{UserPersistenceError, UserRepository};
pub use self::user::{NewUser, User, UserChanges, UserStatus};
pub use self::user_service::UserService;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use backend::domain::{ApiResult, AppError, ErrorCode};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(AppError::from_code(ErrorCode::USER_NOT_FOUND))
/// }
/// ```
pub type ApiResult<T> = Result<T, AppError>;
