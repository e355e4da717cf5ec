//! # chirpy HTTP Server Module
//!
//! Thin request handlers in front of the record store. Handlers validate
//! and filter input, call the store, and shape its results as JSON.
//!
//! # Endpoints
//!
//! - `/api/healthz` - Health check
//! - `/api/chirps`, `/api/chirps/:id` - Chirps
//! - `/api/users`, `/api/users/:id` - Users
//! - `/api/reset` - Reset the hit counter
//! - `/admin/metrics` - Admin HTML page
//! - `/admin/stats` - Service counters as JSON
//! - `/app/*` - Static files (counted)

pub mod admin_routes;
pub mod chirp_routes;
pub mod config;
pub mod errors;
pub mod server;
pub mod user_routes;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ErrorResponse};
pub use server::HttpServer;
