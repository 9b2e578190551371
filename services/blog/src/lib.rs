//! Blog post CRUD service with a stub login endpoint
//!
//! The binary in `main.rs` wires configuration, the record store and the
//! router together. Everything else lives here so the HTTP surface can be
//! exercised in tests against an in-memory store.

pub mod config;
pub mod error;
pub mod extract;
pub mod jwt;
pub mod models;
pub mod openapi;
pub mod repositories;
pub mod routes;
pub mod state;
pub mod uploads;

pub use routes::create_router;
pub use state::AppState;
