//! HTTP transport wrapper.

pub mod client;
pub mod decorator;

pub use client::{HttpClient, HttpClientBuilder};
pub use decorator::{BearerAuth, RequestDecorator};
