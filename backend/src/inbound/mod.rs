//! Inbound adapters: the HTTP surface of the application.

pub mod http;
