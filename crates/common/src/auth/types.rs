//! OAuth 2.0 types and structures
//!
//! Grant descriptions, provider configuration and the wire formats of the
//! token endpoint (RFC 6749 §5).

use std::fmt;

use serde::Deserialize;

use super::token::Token;

/// One of the grant flows supported by the provider.
///
/// All grants go through the same token-endpoint exchange; they differ
/// only in `grant_type` and the accompanying form fields.
#[derive(Clone, PartialEq, Eq)]
pub enum Grant {
    /// Exchange an authorization code obtained from the consent page.
    AuthorizationCode { code: String, redirect_uri: String },
    /// Resource-owner password credentials.
    Password { username: String, password: String },
    /// Exchange a previously issued refresh token.
    RefreshToken { refresh_token: String },
}

impl Grant {
    /// Wire name sent as `grant_type`.
    #[must_use]
    pub const fn grant_type(&self) -> &'static str {
        match self {
            Self::AuthorizationCode { .. } => "authorization_code",
            Self::Password { .. } => "password",
            Self::RefreshToken { .. } => "refresh_token",
        }
    }

    /// Grant-specific form fields, `grant_type` included.
    #[must_use]
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![("grant_type", self.grant_type().to_string())];
        match self {
            Self::AuthorizationCode { code, redirect_uri } => {
                fields.push(("code", code.clone()));
                fields.push(("redirect_uri", redirect_uri.clone()));
            }
            Self::Password { username, password } => {
                fields.push(("username", username.clone()));
                fields.push(("password", password.clone()));
            }
            Self::RefreshToken { refresh_token } => {
                fields.push(("refresh_token", refresh_token.clone()));
            }
        }
        fields
    }
}

impl fmt::Debug for Grant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Only the flow is printed; every field is a credential or one-time code.
        f.debug_tuple("Grant").field(&self.grant_type()).finish()
    }
}

/// Token endpoint success payload.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub token_type: Option<String>,
}

impl TokenResponse {
    /// Convert into a [`Token`]; `None` if the provider sent an empty
    /// access token.
    #[must_use]
    pub fn into_token(self) -> Option<Token> {
        Token::new(self.access_token, self.refresh_token, self.expires_in, self.token_type)
    }
}

/// OAuth error response from the authorization server (RFC 6749 §5.2).
#[derive(Debug, Clone, Deserialize)]
pub struct OAuthError {
    pub error: String,
    pub error_description: Option<String>,
}

impl fmt::Display for OAuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.error_description {
            Some(desc) => write!(f, "{}: {}", self.error, desc),
            None => write!(f, "{}", self.error),
        }
    }
}

impl std::error::Error for OAuthError {}

/// Provider endpoint and application credentials.
#[derive(Clone)]
pub struct OAuthProviderConfig {
    /// Provider root, e.g. `https://accounts.moj.io`
    pub base_url: String,
    pub client_id: String,
    pub client_secret: String,
    /// Optional space-separated scopes for the consent URL
    pub scope: Option<String>,
}

impl OAuthProviderConfig {
    #[must_use]
    pub fn new(
        base_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            scope: None,
        }
    }

    #[must_use]
    pub fn authorization_url(&self) -> String {
        format!("{}/OAuth2/authorize", self.base_url.trim_end_matches('/'))
    }

    #[must_use]
    pub fn token_url(&self) -> String {
        format!("{}/OAuth2/token", self.base_url.trim_end_matches('/'))
    }
}

impl fmt::Debug for OAuthProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthProviderConfig")
            .field("base_url", &self.base_url)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("scope", &self.scope)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grant_form_fields() {
        let grant = Grant::Password { username: "u".to_string(), password: "p".to_string() };

        assert_eq!(grant.grant_type(), "password");
        assert_eq!(
            grant.form_fields(),
            vec![
                ("grant_type", "password".to_string()),
                ("username", "u".to_string()),
                ("password", "p".to_string()),
            ]
        );
    }

    #[test]
    fn authorization_code_fields_include_redirect_uri() {
        let grant = Grant::AuthorizationCode {
            code: "c0de".to_string(),
            redirect_uri: "https://app.example/cb".to_string(),
        };

        let fields = grant.form_fields();
        assert_eq!(fields[0], ("grant_type", "authorization_code".to_string()));
        assert!(fields.contains(&("redirect_uri", "https://app.example/cb".to_string())));
    }

    #[test]
    fn grant_debug_hides_credentials() {
        let grant = Grant::RefreshToken { refresh_token: "r-secret".to_string() };
        assert!(!format!("{grant:?}").contains("r-secret"));
    }

    #[test]
    fn token_response_with_only_access_token() {
        let response: TokenResponse = serde_json::from_str(r#"{"access_token":"abc"}"#).unwrap();
        let token = response.into_token().unwrap();

        assert_eq!(token.access_token(), "abc");
        assert!(token.refresh_token().is_none());
        assert!(token.expires_at().is_none());
    }

    #[test]
    fn provider_urls_ignore_trailing_slash() {
        let config = OAuthProviderConfig::new("https://accounts.moj.io/", "id", "s3cr3t");

        assert_eq!(config.authorization_url(), "https://accounts.moj.io/OAuth2/authorize");
        assert_eq!(config.token_url(), "https://accounts.moj.io/OAuth2/token");
        assert!(!format!("{config:?}").contains("s3cr3t"));
    }

    #[test]
    fn oauth_error_display() {
        let error = OAuthError {
            error: "invalid_grant".to_string(),
            error_description: Some("The refresh token is invalid".to_string()),
        };
        assert_eq!(error.to_string(), "invalid_grant: The refresh token is invalid");

        let bare = OAuthError { error: "invalid_request".to_string(), error_description: None };
        assert_eq!(bare.to_string(), "invalid_request");
    }
}
