//! OAuth 2.0 provider client
//!
//! Handles the provider side of authentication:
//! - Consent (authorization) URL building
//! - Token-endpoint exchange for the authorization-code, password and
//!   refresh-token grants

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use super::token::Token;
use super::traits::TokenExchange;
use super::types::{Grant, OAuthError, OAuthProviderConfig, TokenResponse};

/// Error type for OAuth provider operations
#[derive(Debug)]
pub enum OAuthProviderError {
    /// HTTP request failed before a response was received
    RequestFailed(reqwest::Error),

    /// Provider answered with a standard OAuth error body
    OAuthError(OAuthError),

    /// Provider answered with a non-success status and an unrecognized body
    Rejected { status: u16, body: String },

    /// Failed to parse a success response
    ParseError(String),

    /// Provider issued an empty or header-unsafe access token
    EmptyAccessToken,

    /// No refresh token available
    NoRefreshToken,

    /// Invalid configuration
    ConfigError(String),
}

impl std::fmt::Display for OAuthProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RequestFailed(e) => write!(f, "HTTP request failed: {e}"),
            Self::OAuthError(e) => write!(f, "OAuth error: {e}"),
            Self::Rejected { status, body } => {
                write!(f, "token endpoint returned status {status}: {body}")
            }
            Self::ParseError(msg) => write!(f, "Parse error: {msg}"),
            Self::EmptyAccessToken => write!(f, "Provider issued an empty or malformed access token"),
            Self::NoRefreshToken => write!(f, "No refresh token available"),
            Self::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
        }
    }
}

impl std::error::Error for OAuthProviderError {}

impl From<reqwest::Error> for OAuthProviderError {
    fn from(err: reqwest::Error) -> Self {
        Self::RequestFailed(err)
    }
}

/// OAuth 2.0 client for a single provider and application.
#[derive(Debug, Clone)]
pub struct OAuthProvider {
    config: OAuthProviderConfig,
    client: Client,
}

impl OAuthProvider {
    /// Create a provider client with the given request timeout.
    ///
    /// # Errors
    /// Returns [`OAuthProviderError::ConfigError`] if the HTTP client cannot
    /// be built.
    pub fn new(config: OAuthProviderConfig, timeout: Duration) -> Result<Self, OAuthProviderError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| OAuthProviderError::ConfigError(format!("HTTP client: {e}")))?;
        Ok(Self { config, client })
    }

    /// Build the interactive consent URL.
    ///
    /// Pure string construction; no request is made.
    #[must_use]
    pub fn authorization_url(&self, redirect_uri: &str, state: Option<&str>) -> String {
        let mut params = vec![
            ("response_type", "code"),
            ("client_id", self.config.client_id.as_str()),
            ("redirect_uri", redirect_uri),
        ];

        if let Some(scope) = self.config.scope.as_deref() {
            params.push(("scope", scope));
        }
        if let Some(state) = state {
            params.push(("state", state));
        }

        let query_string = params
            .iter()
            .map(|(k, v)| format!("{k}={}", urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        format!("{}?{}", self.config.authorization_url(), query_string)
    }

    /// Run a grant against the token endpoint.
    ///
    /// # Errors
    /// Returns error if:
    /// - A refresh grant carries an empty refresh token
    /// - The request fails or the provider rejects the grant
    /// - The response cannot be parsed or holds an empty access token
    pub async fn acquire_token(&self, grant: Grant) -> Result<Token, OAuthProviderError> {
        if let Grant::RefreshToken { refresh_token } = &grant {
            if refresh_token.is_empty() {
                return Err(OAuthProviderError::NoRefreshToken);
            }
        }

        self.exchange(&grant).await
    }

    async fn exchange(&self, grant: &Grant) -> Result<Token, OAuthProviderError> {
        let mut form = vec![
            ("client_id", self.config.client_id.clone()),
            ("client_secret", self.config.client_secret.clone()),
        ];
        form.extend(grant.form_fields());

        debug!(grant_type = grant.grant_type(), url = %self.config.token_url(), "exchanging grant");

        let response = self.client.post(self.config.token_url()).form(&form).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(grant_type = grant.grant_type(), %status, "token endpoint rejected grant");
            return Err(match serde_json::from_str::<OAuthError>(&body) {
                Ok(error) => OAuthProviderError::OAuthError(error),
                Err(_) => OAuthProviderError::Rejected { status: status.as_u16(), body },
            });
        }

        let token_response: TokenResponse =
            response.json().await.map_err(|e| OAuthProviderError::ParseError(e.to_string()))?;

        token_response.into_token().ok_or(OAuthProviderError::EmptyAccessToken)
    }

    /// Get a reference to the provider configuration
    #[must_use]
    pub const fn config(&self) -> &OAuthProviderConfig {
        &self.config
    }
}

#[async_trait]
impl TokenExchange for OAuthProvider {
    fn authorization_url(&self, redirect_uri: &str, state: Option<&str>) -> String {
        self.authorization_url(redirect_uri, state)
    }

    async fn acquire_token(&self, grant: Grant) -> Result<Token, OAuthProviderError> {
        self.acquire_token(grant).await
    }
}
