//! Token lifecycle on the API client
//!
//! Grants are exchanged through the client's [`TokenExchange`]. A new token
//! replaces the current one in a single swap; a failed exchange leaves the
//! current token untouched.

use std::fmt;
use std::sync::Arc;

use mojio_common::auth::{Grant, Token};
use mojio_domain::{MojioError, Result};
use serde::Deserialize;
use tracing::{debug, info, instrument};

use super::client::ApiClient;
use crate::errors::InfraError;

/// Resource-owner credentials for the password grant.
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub user_or_email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(user_or_email: impl Into<String>, password: impl Into<String>) -> Self {
        Self { user_or_email: user_or_email.into(), password: password.into() }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user_or_email", &self.user_or_email)
            .field("password", &"[redacted]")
            .finish()
    }
}

impl ApiClient {
    /// Consent URL the user should be sent to for the authorization-code flow.
    pub fn authorization_url(&self, redirect_uri: &str) -> String {
        self.oauth.authorization_url(redirect_uri, None)
    }

    /// Same as [`ApiClient::authorization_url`] with an opaque `state` value.
    pub fn authorization_url_with_state(&self, redirect_uri: &str, state: &str) -> String {
        self.oauth.authorization_url(redirect_uri, Some(state))
    }

    /// Exchange an authorization code for a token
    ///
    /// # Arguments
    ///
    /// * `redirect_uri` - Redirect URI the code was issued for
    /// * `code` - Authorization code from the redirect
    ///
    /// # Errors
    ///
    /// Returns [`MojioError::Auth`] if the provider rejects the code
    #[instrument(skip(self, code))]
    pub async fn authorize(&self, redirect_uri: &str, code: &str) -> Result<Arc<Token>> {
        self.acquire(Grant::AuthorizationCode {
            code: code.to_string(),
            redirect_uri: redirect_uri.to_string(),
        })
        .await
    }

    /// Exchange username/email and password for a token
    ///
    /// # Errors
    ///
    /// Returns [`MojioError::Auth`] if the provider rejects the credentials
    #[instrument(skip(self, credentials), fields(user = %credentials.user_or_email))]
    pub async fn login(&self, credentials: &Credentials) -> Result<Arc<Token>> {
        self.acquire(Grant::Password {
            username: credentials.user_or_email.clone(),
            password: credentials.password.clone(),
        })
        .await
    }

    /// Replace the current token using its refresh token
    ///
    /// # Errors
    ///
    /// Returns [`MojioError::Auth`] if no token or refresh token is held, or
    /// the provider rejects the refresh
    #[instrument(skip(self))]
    pub async fn extend_token(&self) -> Result<Arc<Token>> {
        let refresh_token = self
            .token
            .refresh_token()
            .ok_or_else(|| MojioError::Auth("no refresh token available".to_string()))?;

        self.acquire(Grant::RefreshToken { refresh_token }).await
    }

    /// Refresh the token if it expires within `threshold_seconds`
    ///
    /// Tokens without a known expiry are never refreshed here.
    ///
    /// # Returns
    ///
    /// `true` if a refresh was performed
    ///
    /// # Errors
    ///
    /// See [`ApiClient::extend_token`]
    pub async fn extend_token_if_expiring(&self, threshold_seconds: i64) -> Result<bool> {
        let expiring = self.token.current().is_some_and(|t| t.is_expired(threshold_seconds));
        if !expiring {
            return Ok(false);
        }

        debug!(threshold_seconds, "token close to expiry, refreshing");
        self.extend_token().await.map(|_| true)
    }

    /// Current token, if any.
    pub fn token(&self) -> Option<Arc<Token>> {
        self.token.current()
    }

    /// Access token string of the current token, if any.
    pub fn token_id(&self) -> Option<String> {
        self.token.access_token()
    }

    /// Install a token obtained elsewhere.
    pub fn set_token(&self, token: Token) {
        self.token.replace(token);
    }

    /// Drop the current token. Later requests go out unauthenticated.
    pub fn logout(&self) {
        if self.token.clear().is_some() {
            info!("cleared API token");
        }
    }

    /// Whether a token is held. Expiry is not checked.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_present()
    }

    async fn acquire(&self, grant: Grant) -> Result<Arc<Token>> {
        let grant_type = grant.grant_type();
        let token = self
            .oauth
            .acquire_token(grant)
            .await
            .map_err(|e| MojioError::from(InfraError::from(e)))?;

        self.token.replace(token);
        info!(grant_type, "acquired API token");

        self.token
            .current()
            .ok_or_else(|| MojioError::Internal("token vanished after replacement".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use mojio_common::auth::{OAuthProviderError, TokenExchange};
    use mojio_domain::ClientConfig;
    use parking_lot::Mutex;

    use super::*;

    #[derive(Default)]
    struct MockExchange {
        grants: Mutex<Vec<String>>,
        reject: bool,
    }

    #[async_trait]
    impl TokenExchange for MockExchange {
        fn authorization_url(&self, redirect_uri: &str, state: Option<&str>) -> String {
            format!("https://auth.test/authorize?redirect_uri={redirect_uri}&state={}", state.unwrap_or(""))
        }

        async fn acquire_token(&self, grant: Grant) -> std::result::Result<Token, OAuthProviderError> {
            self.grants.lock().push(grant.grant_type().to_string());
            if self.reject {
                return Err(OAuthProviderError::Rejected { status: 400, body: "invalid_grant".to_string() });
            }
            let access = format!("{}-token", grant.grant_type());
            Token::new(access, Some("refresh-1".to_string()), Some(3600), None)
                .ok_or(OAuthProviderError::EmptyAccessToken)
        }
    }

    fn client(exchange: Arc<MockExchange>) -> ApiClient {
        ApiClient::builder()
            .config(ClientConfig::new("app", "secret"))
            .token_exchange(exchange)
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn login_installs_token() {
        let exchange = Arc::new(MockExchange::default());
        let client = client(exchange.clone());
        assert!(!client.is_authenticated());

        client.login(&Credentials::new("u", "p")).await.unwrap();

        assert!(client.is_authenticated());
        assert_eq!(client.token_id().as_deref(), Some("password-token"));
        assert_eq!(exchange.grants.lock().as_slice(), ["password"]);
    }

    #[tokio::test]
    async fn authorize_uses_authorization_code_grant() {
        let exchange = Arc::new(MockExchange::default());
        let client = client(exchange.clone());

        let token = client.authorize("https://app/cb", "code-1").await.unwrap();

        assert_eq!(token.access_token(), "authorization_code-token");
    }

    #[tokio::test]
    async fn extend_without_token_is_an_auth_error() {
        let exchange = Arc::new(MockExchange::default());
        let client = client(exchange.clone());

        let err = client.extend_token().await.unwrap_err();

        assert!(matches!(err, MojioError::Auth(_)));
        assert!(exchange.grants.lock().is_empty());
    }

    #[tokio::test]
    async fn failed_exchange_keeps_previous_token() {
        let exchange = Arc::new(MockExchange { reject: true, ..MockExchange::default() });
        let client = client(exchange);
        client.set_token(Token::new("old", Some("r".to_string()), None, None).unwrap());

        let err = client.extend_token().await.unwrap_err();

        assert!(matches!(err, MojioError::Auth(_)));
        assert_eq!(client.token_id().as_deref(), Some("old"));
    }

    #[tokio::test]
    async fn refresh_only_when_expiring() {
        let exchange = Arc::new(MockExchange::default());
        let client = client(exchange.clone());
        client.set_token(Token::new("fresh", Some("r".to_string()), Some(3600), None).unwrap());

        assert!(!client.extend_token_if_expiring(60).await.unwrap());

        client.set_token(Token::new("stale", Some("r".to_string()), Some(10), None).unwrap());
        assert!(client.extend_token_if_expiring(60).await.unwrap());
        assert_eq!(client.token_id().as_deref(), Some("refresh_token-token"));
    }

    #[test]
    fn logout_clears_token() {
        let client = client(Arc::new(MockExchange::default()));
        client.set_token(Token::from_id("abc").unwrap());
        assert!(client.is_authenticated());

        client.logout();

        assert!(!client.is_authenticated());
        assert!(client.token().is_none());
    }

    #[test]
    fn expired_token_still_counts_as_authenticated() {
        let client = client(Arc::new(MockExchange::default()));
        let past = chrono::Utc::now() - chrono::Duration::hours(1);
        client.set_token(Token::with_expiry("old", None, Some(past)).unwrap());

        assert!(client.token().unwrap().is_expired(0));
        assert!(client.is_authenticated());
    }

    #[test]
    fn authorization_url_comes_from_exchange() {
        let client = client(Arc::new(MockExchange::default()));
        assert_eq!(
            client.authorization_url_with_state("cb", "xyz"),
            "https://auth.test/authorize?redirect_uri=cb&state=xyz"
        );
    }

    #[test]
    fn credentials_debug_hides_password() {
        let debug = format!("{:?}", Credentials::new("me@example.com", "hunter2"));
        assert!(!debug.contains("hunter2"));
    }
}
