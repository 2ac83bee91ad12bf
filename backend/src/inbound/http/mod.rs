//! HTTP handlers, request/response shapes, and the response envelope.

pub mod health;
pub mod respond;
pub mod state;
pub mod users;

pub use respond::Envelope;
pub use state::AppState;
