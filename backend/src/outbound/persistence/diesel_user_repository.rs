//! Diesel-backed `UserRepository` adapter over either supported dialect.
//!
//! The adapter only translates between Diesel rows and domain types; every
//! operation runs the same query on both backends, dispatched per pool
//! variant by `with_conn!`. Updates re-select the row instead of using
//! `RETURNING`, which MySQL does not support.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;
use uuid::Uuid;

use super::models::{NewUserRow, UserChangeset, UserRow};
use super::pool::DbPool;
use super::schema::users::dsl;
use crate::domain::{User, UserChanges, UserPersistenceError, UserRepository};

/// Run `$body` against a connection checked out from whichever pool variant
/// is configured. Both arms monomorphise the same query code per backend.
macro_rules! with_conn {
    ($pool:expr, |$conn:ident| $body:block) => {
        match $pool {
            DbPool::Postgres(pool) => {
                let mut $conn = pool
                    .get()
                    .await
                    .map_err(|err| UserPersistenceError::connection(err.to_string()))?;
                $body
            }
            DbPool::MySql(pool) => {
                let mut $conn = pool
                    .get()
                    .await
                    .map_err(|err| UserPersistenceError::connection(err.to_string()))?;
                $body
            }
        }
    };
}

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map Diesel errors to the repository's error variants.
fn map_diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            UserPersistenceError::duplicate(info.message().to_owned())
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            UserPersistenceError::connection("database connection error")
        }
        _ => UserPersistenceError::query("database error"),
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let row = NewUserRow::from(user);
        with_conn!(&self.pool, |conn| {
            diesel::insert_into(dsl::users)
                .values(&row)
                .execute(&mut conn)
                .await
                .map_err(map_diesel_error)?;
        });
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, UserPersistenceError> {
        let key = id.to_string();
        let row = with_conn!(&self.pool, |conn| {
            dsl::users
                .find(key)
                .first::<UserRow>(&mut conn)
                .await
                .optional()
                .map_err(map_diesel_error)?
        });
        row.map(User::try_from).transpose()
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserPersistenceError> {
        let row = with_conn!(&self.pool, |conn| {
            dsl::users
                .filter(dsl::username.eq(username))
                .first::<UserRow>(&mut conn)
                .await
                .optional()
                .map_err(map_diesel_error)?
        });
        row.map(User::try_from).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserPersistenceError> {
        let row = with_conn!(&self.pool, |conn| {
            dsl::users
                .filter(dsl::email.eq(email))
                .first::<UserRow>(&mut conn)
                .await
                .optional()
                .map_err(map_diesel_error)?
        });
        row.map(User::try_from).transpose()
    }

    async fn list(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<User>, i64), UserPersistenceError> {
        let (rows, total) = with_conn!(&self.pool, |conn| {
            let total: i64 = dsl::users
                .count()
                .get_result(&mut conn)
                .await
                .map_err(map_diesel_error)?;
            let rows = dsl::users
                .order((dsl::created_at.asc(), dsl::id.asc()))
                .offset(offset)
                .limit(limit)
                .load::<UserRow>(&mut conn)
                .await
                .map_err(map_diesel_error)?;
            (rows, total)
        });
        let users = rows
            .into_iter()
            .map(User::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((users, total))
    }

    async fn update(
        &self,
        id: Uuid,
        changes: &UserChanges,
    ) -> Result<Option<User>, UserPersistenceError> {
        let key = id.to_string();
        let changeset = UserChangeset::new(changes, Utc::now().naive_utc());
        let row = with_conn!(&self.pool, |conn| {
            let affected = diesel::update(dsl::users.find(key.clone()))
                .set(&changeset)
                .execute(&mut conn)
                .await
                .map_err(map_diesel_error)?;
            if affected == 0 {
                None
            } else {
                dsl::users
                    .find(key.clone())
                    .first::<UserRow>(&mut conn)
                    .await
                    .optional()
                    .map_err(map_diesel_error)?
            }
        });
        row.map(User::try_from).transpose()
    }

    async fn delete(&self, id: Uuid) -> Result<bool, UserPersistenceError> {
        let key = id.to_string();
        let affected = with_conn!(&self.pool, |conn| {
            diesel::delete(dsl::users.find(key))
                .execute(&mut conn)
                .await
                .map_err(map_diesel_error)?
        });
        Ok(affected > 0)
    }
}
