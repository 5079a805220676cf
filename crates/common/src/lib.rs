//! Common utilities shared across the Mojio SDK crates.
//!
//! Currently hosts the OAuth 2.0 layer: token value objects, the shared
//! token slot and the provider client.

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

pub mod auth;

pub use auth::{Grant, OAuthProvider, OAuthProviderError, SharedToken, Token, TokenExchange};
