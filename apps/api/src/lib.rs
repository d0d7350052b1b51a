//! Resume / job-description keyword match service.
//!
//! The engine (`analysis`) is synchronous and pure; `routes` exposes it over
//! HTTP and `client` is the typed consumer of that endpoint.

pub mod analysis;
pub mod client;
pub mod config;
pub mod errors;
pub mod models;
pub mod routes;
pub mod state;
