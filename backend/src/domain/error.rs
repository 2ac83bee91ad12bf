//! Application error taxonomy.
//!
//! Every failure surfaced to a client carries a stable numeric [`ErrorCode`]
//! and a human-readable message. Codes are namespaced by range: `0` is
//! success, `10000..=10999` are generic failures, and `20000..=20999` belong
//! to the user module. Each registered code has exactly one canonical default
//! message; unregistered codes fall back to [`UNKNOWN_ERROR_MESSAGE`].
//!
//! [`AppError`] is the tagged error type crossing layer boundaries: a code, a
//! message, and an optional wrapped cause kept for server-side logs only.
//! Classification is a discriminant check on the code, never runtime type
//! inspection of the cause.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Fallback message returned for codes without a registered default.
pub const UNKNOWN_ERROR_MESSAGE: &str = "unknown error";

/// Stable numeric error code, namespaced by range.
///
/// Serialises as the bare integer.
///
/// # Examples
/// ```
/// use backend::domain::ErrorCode;
///
/// assert_eq!(ErrorCode::USER_NOT_FOUND.value(), 20_001);
/// assert_eq!(ErrorCode::USER_NOT_FOUND.default_message(), "user not found");
/// assert_eq!(ErrorCode::new(99_999).default_message(), "unknown error");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct ErrorCode(i32);

impl ErrorCode {
    /// Operation completed.
    pub const SUCCESS: Self = Self(0);
    /// Unclassified failure.
    pub const UNKNOWN: Self = Self(10_000);
    /// Request parameters are malformed.
    pub const INVALID_PARAMS: Self = Self(10_001);
    /// Caller is not authenticated.
    pub const UNAUTHORIZED: Self = Self(10_002);
    /// Caller lacks permission for the operation.
    pub const FORBIDDEN: Self = Self(10_003);
    /// Requested resource does not exist.
    pub const NOT_FOUND: Self = Self(10_004);
    /// Operation conflicts with existing state.
    pub const CONFLICT: Self = Self(10_005);
    /// Unexpected internal failure.
    pub const INTERNAL_ERROR: Self = Self(10_006);
    /// Database operation failed.
    pub const DATABASE_ERROR: Self = Self(10_007);
    /// Input failed semantic validation.
    pub const VALIDATION_ERROR: Self = Self(10_008);
    /// Caller exceeded the request rate.
    pub const RATE_LIMITED: Self = Self(10_009);
    /// Request exceeded its time budget.
    pub const TIMEOUT: Self = Self(10_010);

    /// No user matches the given identity.
    pub const USER_NOT_FOUND: Self = Self(20_001);
    /// A user with the given identity already exists.
    pub const USER_EXISTS: Self = Self(20_002);
    /// The user account is disabled.
    pub const USER_DISABLED: Self = Self(20_003);
    /// Supplied password does not match.
    pub const PASSWORD_INCORRECT: Self = Self(20_004);
    /// Credential token has expired.
    pub const TOKEN_EXPIRED: Self = Self(20_005);
    /// Credential token failed verification.
    pub const TOKEN_INVALID: Self = Self(20_006);

    /// Build a code from its raw integer value.
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Raw integer value of this code.
    pub const fn value(self) -> i32 {
        self.0
    }

    /// Whether this code signals success.
    pub const fn is_success(self) -> bool {
        self.0 == 0
    }

    /// Canonical message registered for this code.
    ///
    /// Total: unregistered codes resolve to [`UNKNOWN_ERROR_MESSAGE`].
    pub const fn default_message(self) -> &'static str {
        match self {
            Self::SUCCESS => "success",
            Self::UNKNOWN => UNKNOWN_ERROR_MESSAGE,
            Self::INVALID_PARAMS => "invalid parameters",
            Self::UNAUTHORIZED => "unauthenticated",
            Self::FORBIDDEN => "permission denied",
            Self::NOT_FOUND => "resource not found",
            Self::CONFLICT => "resource conflict",
            Self::INTERNAL_ERROR => "internal error",
            Self::DATABASE_ERROR => "database error",
            Self::VALIDATION_ERROR => "validation failed",
            Self::RATE_LIMITED => "too many requests",
            Self::TIMEOUT => "request timed out",
            Self::USER_NOT_FOUND => "user not found",
            Self::USER_EXISTS => "user already exists",
            Self::USER_DISABLED => "user disabled",
            Self::PASSWORD_INCORRECT => "incorrect password",
            Self::TOKEN_EXPIRED => "token expired",
            Self::TOKEN_INVALID => "invalid token",
            _ => UNKNOWN_ERROR_MESSAGE,
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Structured application error.
///
/// Carries a stable [`ErrorCode`], a message shown to clients, and an
/// optional wrapped cause. The cause feeds server-side logs and the standard
/// `source` chain; it is never serialised outward.
///
/// # Examples
/// ```
/// use backend::domain::{AppError, ErrorCode};
///
/// let err = AppError::from_code(ErrorCode::USER_NOT_FOUND);
/// assert_eq!(err.code(), ErrorCode::USER_NOT_FOUND);
/// assert_eq!(err.to_string(), "[20001] user not found");
/// ```
#[derive(Debug)]
pub struct AppError {
    code: ErrorCode,
    message: String,
    cause: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Build an error with an explicit message, ignoring the registry.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            cause: None,
        }
    }

    /// Build an error whose message is the code's registered default.
    pub fn from_code(code: ErrorCode) -> Self {
        Self::new(code, code.default_message())
    }

    /// Build an error with an explicit message and an attached cause.
    pub fn wrap(
        code: ErrorCode,
        message: impl Into<String>,
        cause: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            cause: Some(cause.into()),
        }
    }

    /// Build an error with the registered default message and an attached cause.
    pub fn wrap_from_code(
        code: ErrorCode,
        cause: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::wrap(code, code.default_message(), cause)
    }

    /// Convenience constructor for [`ErrorCode::INVALID_PARAMS`].
    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::INVALID_PARAMS, message)
    }

    /// Convenience constructor for [`ErrorCode::VALIDATION_ERROR`].
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::VALIDATION_ERROR, message)
    }

    /// Convenience constructor for [`ErrorCode::INTERNAL_ERROR`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::INTERNAL_ERROR, message)
    }

    /// Wrap an infrastructure failure as [`ErrorCode::DATABASE_ERROR`].
    pub fn database(cause: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::wrap_from_code(ErrorCode::DATABASE_ERROR, cause)
    }

    /// Stable error code.
    pub const fn code(&self) -> ErrorCode {
        self.code
    }

    /// Client-visible message.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.cause {
            Some(cause) => write!(f, "[{}] {}: {}", self.code, self.message, cause),
            None => write!(f, "[{}] {}", self.code, self.message),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause
            .as_deref()
            .map(|cause| cause as &(dyn std::error::Error + 'static))
    }
}

/// Find the [`AppError`] an arbitrary error is, or wraps.
///
/// Walks the `source` chain and returns the first `AppError` found, so a
/// failure stays classifiable through any number of wrapping layers.
///
/// # Examples
/// ```
/// use backend::domain::{classify, AppError, ErrorCode};
///
/// let err = AppError::from_code(ErrorCode::CONFLICT);
/// assert_eq!(classify(&err).map(AppError::code), Some(ErrorCode::CONFLICT));
///
/// let plain = std::io::Error::other("disk on fire");
/// assert!(classify(&plain).is_none());
/// ```
pub fn classify<'a>(err: &'a (dyn std::error::Error + 'static)) -> Option<&'a AppError> {
    let mut current = Some(err);
    while let Some(candidate) = current {
        if let Some(app) = candidate.downcast_ref::<AppError>() {
            return Some(app);
        }
        current = candidate.source();
    }
    None
}

/// Code of an arbitrary error.
///
/// Total: anything not classifiable as an [`AppError`] resolves to
/// [`ErrorCode::INTERNAL_ERROR`].
pub fn code_of(err: &(dyn std::error::Error + 'static)) -> ErrorCode {
    classify(err).map_or(ErrorCode::INTERNAL_ERROR, AppError::code)
}
