//! # HTTP Server Module
//!
//! REST/JSON adapter over the directory engine, built on Axum.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/api/v1/users` - Create and list/search users
//! - `/api/v1/users/:id` - Get, update email, delete
//! - `/api/v1/users/reset` - Restore fixture data

pub mod config;
pub mod health_routes;
pub mod response;
pub mod server;
pub mod user_routes;

pub use config::HttpServerConfig;
pub use response::{ApiError, ApiResponse};
pub use server::HttpServer;
