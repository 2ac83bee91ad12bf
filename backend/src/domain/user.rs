//! User aggregate and the value types flowing through its use cases.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Account activation state, stored as an integer column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserStatus {
    /// The account is blocked from signing in.
    Disabled,
    /// The account is live.
    Active,
}

impl UserStatus {
    /// Integer representation used on the wire and in storage.
    pub const fn as_i32(self) -> i32 {
        match self {
            Self::Disabled => 0,
            Self::Active => 1,
        }
    }

    /// Map a stored integer back to a status, if it is a known value.
    pub const fn from_i32(value: i32) -> Option<Self> {
        match value {
            0 => Some(Self::Disabled),
            1 => Some(Self::Active),
            _ => None,
        }
    }
}

/// A registered account.
///
/// The password field holds whatever secret material the inbound layer
/// supplied; it never appears in serialised views, which are built from
/// dedicated response types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Stable identifier, generated by the application at creation time.
    pub id: Uuid,
    /// Unique login name.
    pub username: String,
    /// Unique contact address.
    pub email: String,
    /// Display name shown to other users.
    pub nickname: String,
    /// Stored secret material.
    pub password: String,
    /// Activation state.
    pub status: UserStatus,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
    /// Last modification instant.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Whether the account may sign in.
    pub const fn is_active(&self) -> bool {
        matches!(self.status, UserStatus::Active)
    }
}

/// Data required to register an account.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Requested login name.
    pub username: String,
    /// Contact address.
    pub email: String,
    /// Display name; falls back to the username when empty.
    pub nickname: String,
    /// Secret material to store.
    pub password: String,
}

/// Partial update applied to an existing account.
///
/// Absent fields keep their current value.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    /// Replacement display name.
    pub nickname: Option<String>,
    /// Replacement contact address.
    pub email: Option<String>,
    /// Replacement activation state.
    pub status: Option<UserStatus>,
}

impl UserChanges {
    /// Whether the update carries no field at all.
    pub const fn is_empty(&self) -> bool {
        self.nickname.is_none() && self.email.is_none() && self.status.is_none()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{UserChanges, UserStatus};

    #[rstest]
    #[case(0, Some(UserStatus::Disabled))]
    #[case(1, Some(UserStatus::Active))]
    #[case(2, None)]
    #[case(-1, None)]
    fn status_round_trips_known_integers(#[case] raw: i32, #[case] expected: Option<UserStatus>) {
        assert_eq!(UserStatus::from_i32(raw), expected);
        if let Some(status) = expected {
            assert_eq!(status.as_i32(), raw);
        }
    }

    #[rstest]
    fn empty_changes_are_detected() {
        assert!(UserChanges::default().is_empty());
        let changes = UserChanges {
            nickname: Some("Ada".to_owned()),
            ..UserChanges::default()
        };
        assert!(!changes.is_empty());
    }
}
