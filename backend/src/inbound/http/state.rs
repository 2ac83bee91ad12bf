//! Shared application state handed to every handler.

use std::sync::Arc;

use crate::domain::{UserRepository, UserService};
use crate::outbound::persistence::{DbPool, DieselUserRepository, InMemoryUserRepository};

/// Handler-visible state; cheap to clone per worker.
#[derive(Clone)]
pub struct AppState {
    users: Arc<UserService>,
}

impl AppState {
    /// Build state over an arbitrary repository adapter.
    pub fn with_repository(repository: Arc<dyn UserRepository>) -> Self {
        Self {
            users: Arc::new(UserService::new(repository)),
        }
    }

    /// Build state over the Diesel adapter for a connected pool.
    pub fn with_pool(pool: DbPool) -> Self {
        Self::with_repository(Arc::new(DieselUserRepository::new(pool)))
    }

    /// Build state over the in-memory fixture repository.
    ///
    /// Used when no database driver is configured, and by handler tests.
    pub fn in_memory() -> Self {
        Self::with_repository(Arc::new(InMemoryUserRepository::new()))
    }

    /// The user management service.
    pub fn users(&self) -> &UserService {
        &self.users
    }
}
