//! # HTTP Server Module
//!
//! Thin HTTP boundary over the record service.
//!
//! # Endpoints
//!
//! - `GET /` - Welcome message
//! - `GET /health` - Health check
//! - `GET /students` - All records, or sorted with `?sort_by=&order_by=`
//! - `GET|PUT|DELETE /students/{id}` - One record
//! - `POST /students` - Create a record

pub mod config;
pub mod errors;
pub mod observability_routes;
pub mod server;
pub mod student_routes;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ApiResult, ErrorResponse};
pub use server::HttpServer;
