//! # Mojio Infrastructure
//!
//! HTTP transport and API client for the Mojio telemetry platform.
//!
//! This crate contains:
//! - The decorated HTTP client every request goes through
//! - The API client: token lifecycle, commands, list operations
//! - Configuration loading from the environment or files
//!
//! ## Architecture
//! - Depends on `mojio-domain` for errors, config and entity types
//! - Depends on `mojio-common` for OAuth tokens and the grant exchange
//! - Contains all I/O

pub mod api;
pub mod config;
pub mod errors;
pub mod http;

// Re-export commonly used items
pub use api::{ApiClient, ApiClientBuilder, ApiCommands, Command, Credentials, GetList, ListQuery, Params, ResultList};
pub use errors::InfraError;
pub use http::*;
