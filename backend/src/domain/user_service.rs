//! User management use cases.
//!
//! The service validates input, enforces uniqueness of login names and
//! contact addresses, and translates adapter failures into the application
//! error taxonomy. Persistence failures become [`ErrorCode::DATABASE_ERROR`]
//! with the adapter error kept as the wrapped cause; domain outcomes such as
//! a missing or duplicate account map to their dedicated user-range codes.

use std::sync::Arc;

use chrono::Utc;
use pagination::PageRequest;
use uuid::Uuid;

use super::{
    AppError, ErrorCode, NewUser, User, UserChanges, UserPersistenceError, UserRepository,
    UserStatus,
};

/// Application service exposing the user management operations.
pub struct UserService {
    repository: Arc<dyn UserRepository>,
}

impl UserService {
    /// Build a service over the given repository adapter.
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    /// Register a new account.
    ///
    /// Fails with [`ErrorCode::VALIDATION_ERROR`] for malformed input and
    /// [`ErrorCode::USER_EXISTS`] when the login name or contact address is
    /// already taken.
    pub async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        validate_new_user(&new_user)?;

        if self
            .repository
            .find_by_username(&new_user.username)
            .await
            .map_err(map_persistence_error)?
            .is_some()
        {
            return Err(AppError::from_code(ErrorCode::USER_EXISTS));
        }
        if self
            .repository
            .find_by_email(&new_user.email)
            .await
            .map_err(map_persistence_error)?
            .is_some()
        {
            return Err(AppError::from_code(ErrorCode::USER_EXISTS));
        }

        let now = Utc::now();
        let nickname = if new_user.nickname.trim().is_empty() {
            new_user.username.clone()
        } else {
            new_user.nickname
        };
        let user = User {
            id: Uuid::new_v4(),
            username: new_user.username,
            email: new_user.email,
            nickname,
            password: new_user.password,
            status: UserStatus::Active,
            created_at: now,
            updated_at: now,
        };

        self.repository
            .insert(&user)
            .await
            .map_err(map_persistence_error)?;
        Ok(user)
    }

    /// Fetch a single account.
    ///
    /// Fails with [`ErrorCode::USER_NOT_FOUND`] when the identifier is
    /// unknown.
    pub async fn get(&self, id: Uuid) -> Result<User, AppError> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| AppError::from_code(ErrorCode::USER_NOT_FOUND))
    }

    /// Fetch one page of accounts plus the total record count.
    pub async fn list(&self, request: PageRequest) -> Result<(Vec<User>, i64), AppError> {
        self.repository
            .list(request.offset(), request.limit())
            .await
            .map_err(map_persistence_error)
    }

    /// Apply a partial update to an account.
    ///
    /// An empty change set is rejected with
    /// [`ErrorCode::INVALID_PARAMS`]; an unknown identifier fails with
    /// [`ErrorCode::USER_NOT_FOUND`].
    pub async fn update(&self, id: Uuid, changes: UserChanges) -> Result<User, AppError> {
        if changes.is_empty() {
            return Err(AppError::invalid_params("no fields to update"));
        }
        if let Some(email) = changes.email.as_deref() {
            validate_email(email)?;
        }
        if let Some(nickname) = changes.nickname.as_deref() {
            if nickname.trim().is_empty() {
                return Err(AppError::validation("nickname must not be empty"));
            }
        }

        self.repository
            .update(id, &changes)
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| AppError::from_code(ErrorCode::USER_NOT_FOUND))
    }

    /// Remove an account.
    ///
    /// Fails with [`ErrorCode::USER_NOT_FOUND`] when the identifier is
    /// unknown.
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let deleted = self
            .repository
            .delete(id)
            .await
            .map_err(map_persistence_error)?;
        if deleted {
            Ok(())
        } else {
            Err(AppError::from_code(ErrorCode::USER_NOT_FOUND))
        }
    }
}

fn validate_new_user(new_user: &NewUser) -> Result<(), AppError> {
    if new_user.username.trim().is_empty() {
        return Err(AppError::validation("username must not be empty"));
    }
    validate_email(&new_user.email)?;
    if new_user.password.is_empty() {
        return Err(AppError::validation("password must not be empty"));
    }
    Ok(())
}

fn validate_email(email: &str) -> Result<(), AppError> {
    if email.trim().is_empty() {
        return Err(AppError::validation("email must not be empty"));
    }
    if !email.contains('@') {
        return Err(AppError::validation("email must be a valid address"));
    }
    Ok(())
}

fn map_persistence_error(err: UserPersistenceError) -> AppError {
    match err {
        UserPersistenceError::Duplicate { .. } => AppError::from_code(ErrorCode::USER_EXISTS),
        other => AppError::database(other),
    }
}
