//! # Mojio Domain
//!
//! Data types shared by the Mojio SDK crates.
//!
//! This crate contains:
//! - The SDK error taxonomy and Result alias
//! - Client configuration and template resolution
//! - Telemetry entity types (vehicles, trips, devices, users)
//!
//! ## Architecture
//! - No dependencies on other SDK crates
//! - No I/O

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
