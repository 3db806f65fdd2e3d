//! studentdb - A validated student record store backed by a single JSON
//! file, served over HTTP.

pub mod cli;
pub mod http_server;
pub mod observability;
pub mod query;
pub mod schema;
pub mod service;
pub mod store;
