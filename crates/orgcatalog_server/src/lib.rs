//! HTTP surface for the organization catalog.
//!
//! # Responsibility
//! - Translate query/path input into catalog service calls.
//! - Map catalog errors to status codes with `{"detail": ...}` bodies.
//! - Guard every route with the configured API key.

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

pub use config::ServerConfig;
pub use error::ApiError;
pub use routes::build_router;
pub use state::AppState;
