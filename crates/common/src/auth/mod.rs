//! OAuth 2.0 client-side infrastructure
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  OAuthProvider  │  Token-endpoint exchange + consent URL
//! └────────┬────────┘
//!          │ produces
//!          ▼
//!     ┌─────────┐        ┌──────────────┐
//!     │  Token  │ ─────► │ SharedToken  │  atomically replaced slot
//!     └─────────┘        └──────────────┘
//! ```
//!
//! # Module Organization
//!
//! - **[`types`]**: Grants, provider configuration, token-endpoint payloads
//! - **[`token`]**: Immutable `Token` value object
//! - **[`shared`]**: `SharedToken` holder used by clients and request
//!   decorators
//! - **[`provider`]**: HTTP client for the provider's endpoints
//! - **[`traits`]**: `TokenExchange` abstraction over the provider

pub mod provider;
pub mod shared;
pub mod token;
pub mod traits;
pub mod types;

pub use provider::{OAuthProvider, OAuthProviderError};
pub use shared::SharedToken;
pub use token::Token;
pub use traits::TokenExchange;
pub use types::{Grant, OAuthError, OAuthProviderConfig, TokenResponse};
