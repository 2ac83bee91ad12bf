//! Diesel schema definitions.
//!
//! Column types are chosen to be valid on both supported backends: the
//! identifier is stored as text (UUID string) and timestamps are naive UTC,
//! since MySQL has no timezone-aware timestamp type.

diesel::table! {
    /// Registered accounts.
    users (id) {
        /// UUID, generated by the application, stored as text.
        id -> Text,
        /// Unique login name.
        username -> Text,
        /// Unique contact address.
        email -> Text,
        /// Display name.
        nickname -> Text,
        /// Stored secret material.
        password -> Text,
        /// Activation state: 1 active, 0 disabled.
        status -> Integer,
        /// Creation instant, UTC.
        created_at -> Timestamp,
        /// Last modification instant, UTC.
        updated_at -> Timestamp,
    }
}
