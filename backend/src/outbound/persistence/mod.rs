//! Persistence adapters using the Diesel ORM.
//!
//! This module provides the concrete implementation of the domain's
//! `UserRepository` port, backed by PostgreSQL or MySQL via `diesel-async`
//! with `bb8` connection pooling, plus the in-memory fixture used when no
//! database is configured.
//!
//! # Architecture
//!
//! - **Thin adapters**: repository implementations only translate between
//!   Diesel rows and domain types. No business logic resides here.
//! - **Internal models**: row structs (`models.rs`) and schema definitions
//!   (`schema.rs`) are implementation details, never exposed to the domain.
//! - **Strongly typed errors**: database failures map to the port's
//!   persistence error variants; the service layer owns the translation into
//!   application error codes.

mod diesel_user_repository;
mod memory;
mod models;
mod pool;
mod schema;

pub use diesel_user_repository::DieselUserRepository;
pub use memory::InMemoryUserRepository;
pub use pool::{Database, DbPool, Dialect, PoolConfig, PoolError};
