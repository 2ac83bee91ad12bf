//! Diesel row structs and their domain conversions.
//!
//! Rows are internal to the persistence layer; the repository translates
//! between them and domain types at its boundary. Timestamps are stored as
//! naive UTC and re-tagged on the way out.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::users;
use crate::domain::{User, UserChanges, UserPersistenceError, UserStatus};

/// A `users` row as read from either backend.
#[derive(Debug, Queryable)]
pub(super) struct UserRow {
    pub id: String,
    pub username: String,
    pub email: String,
    pub nickname: String,
    pub password: String,
    pub status: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<UserRow> for User {
    type Error = UserPersistenceError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&row.id)
            .map_err(|err| UserPersistenceError::query(format!("malformed user id: {err}")))?;
        let status = UserStatus::from_i32(row.status).ok_or_else(|| {
            UserPersistenceError::query(format!("unknown user status {}", row.status))
        })?;
        Ok(Self {
            id,
            username: row.username,
            email: row.email,
            nickname: row.nickname,
            password: row.password,
            status,
            created_at: row.created_at.and_utc(),
            updated_at: row.updated_at.and_utc(),
        })
    }
}

/// Insert payload for a new `users` row.
#[derive(Debug, Insertable)]
#[diesel(table_name = users)]
pub(super) struct NewUserRow {
    pub id: String,
    pub username: String,
    pub email: String,
    pub nickname: String,
    pub password: String,
    pub status: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<&User> for NewUserRow {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
            email: user.email.clone(),
            nickname: user.nickname.clone(),
            password: user.password.clone(),
            status: user.status.as_i32(),
            created_at: user.created_at.naive_utc(),
            updated_at: user.updated_at.naive_utc(),
        }
    }
}

/// Partial update for a `users` row.
///
/// `None` fields are skipped by Diesel; `updated_at` is always written.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = users)]
pub(super) struct UserChangeset {
    pub nickname: Option<String>,
    pub email: Option<String>,
    pub status: Option<i32>,
    pub updated_at: NaiveDateTime,
}

impl UserChangeset {
    /// Build a changeset from domain changes, stamping the update instant.
    pub(super) fn new(changes: &UserChanges, updated_at: NaiveDateTime) -> Self {
        Self {
            nickname: changes.nickname.clone(),
            email: changes.email.clone(),
            status: changes.status.map(UserStatus::as_i32),
            updated_at,
        }
    }
}
