//! Domain ports defining the edges of the hexagon.
//!
//! Ports describe how the domain expects to interact with driven adapters.
//! Each trait exposes strongly typed errors so adapters map their failures
//! into predictable variants instead of returning `anyhow::Result`.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use super::{User, UserChanges};

/// Persistence errors raised by [`UserRepository`] adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserPersistenceError {
    /// Repository connection could not be established.
    #[error("user repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("user repository query failed: {message}")]
    Query { message: String },
    /// A uniqueness constraint rejected the write.
    #[error("duplicate user record: {message}")]
    Duplicate { message: String },
}

impl UserPersistenceError {
    /// Helper for connection oriented failures.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Helper for uniqueness violations.
    pub fn duplicate(message: impl Into<String>) -> Self {
        Self::Duplicate {
            message: message.into(),
        }
    }
}

/// Persistence port for user aggregates.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user record.
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch a user by login name.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch a user by contact address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch one page of users ordered by creation time, oldest first, with
    /// the identifier as a tie-break, together with the total record count.
    async fn list(&self, offset: i64, limit: i64)
        -> Result<(Vec<User>, i64), UserPersistenceError>;

    /// Apply a partial update, returning the stored record or `None` when the
    /// identifier is unknown.
    async fn update(
        &self,
        id: Uuid,
        changes: &UserChanges,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Remove a user, reporting whether a record was deleted.
    async fn delete(&self, id: Uuid) -> Result<bool, UserPersistenceError>;
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::UserPersistenceError;

    #[rstest]
    fn helpers_build_the_matching_variants() {
        assert_eq!(
            UserPersistenceError::connection("refused"),
            UserPersistenceError::Connection {
                message: "refused".to_owned()
            }
        );
        assert_eq!(
            UserPersistenceError::query("syntax"),
            UserPersistenceError::Query {
                message: "syntax".to_owned()
            }
        );
        assert_eq!(
            UserPersistenceError::duplicate("username taken"),
            UserPersistenceError::Duplicate {
                message: "username taken".to_owned()
            }
        );
    }

    #[rstest]
    fn messages_render_for_logs() {
        let err = UserPersistenceError::duplicate("email taken");
        assert_eq!(err.to_string(), "duplicate user record: email taken");
    }
}
