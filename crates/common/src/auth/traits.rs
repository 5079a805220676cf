//! Traits for OAuth operations
//!
//! Abstracts the provider so the API client can be driven by alternative
//! implementations (e.g. in tests).

use async_trait::async_trait;

use super::provider::OAuthProviderError;
use super::token::Token;
use super::types::Grant;

/// Token acquisition against an OAuth 2.0 provider
#[async_trait]
pub trait TokenExchange: Send + Sync {
    /// Build the interactive consent URL for `redirect_uri`.
    fn authorization_url(&self, redirect_uri: &str, state: Option<&str>) -> String;

    /// Exchange a grant for a new token.
    ///
    /// # Errors
    /// Returns error if the provider rejects the grant or the response is
    /// malformed.
    async fn acquire_token(&self, grant: Grant) -> Result<Token, OAuthProviderError>;
}
