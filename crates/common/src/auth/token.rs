//! OAuth 2.0 token value object
//!
//! A [`Token`] is immutable once issued. Holders replace it wholesale (see
//! [`super::SharedToken`]) instead of editing fields in place.

use std::fmt;

use chrono::{DateTime, Duration, Utc};

/// Access/refresh token pair with optional expiry.
///
/// The access token string is never empty: constructors return `None`
/// instead, so "no token" is always expressed as `Option::None`.
#[derive(Clone, PartialEq, Eq)]
pub struct Token {
    access_token: String,
    refresh_token: Option<String>,
    expires_at: Option<DateTime<Utc>>,
    token_type: String,
}

impl Token {
    /// Build a token, computing the absolute expiry from `expires_in`.
    ///
    /// Returns `None` when `access_token` is empty or holds characters that
    /// cannot travel in an `Authorization` header. A non-positive or
    /// unrepresentable `expires_in` means the provider gave no usable lifetime.
    #[must_use]
    pub fn new(
        access_token: impl Into<String>,
        refresh_token: Option<String>,
        expires_in: Option<i64>,
        token_type: Option<String>,
    ) -> Option<Self> {
        let access_token = access_token.into();
        if access_token.trim().is_empty() || !access_token.chars().all(is_header_safe) {
            return None;
        }

        let expires_at = expires_in
            .filter(|secs| *secs > 0)
            .and_then(Duration::try_seconds)
            .and_then(|lifetime| Utc::now().checked_add_signed(lifetime));

        Some(Self {
            access_token,
            refresh_token: refresh_token.filter(|r| !r.is_empty()),
            expires_at,
            token_type: token_type.unwrap_or_else(|| "Bearer".to_string()),
        })
    }

    /// Wrap a bare access token id, e.g. one seeded from configuration.
    #[must_use]
    pub fn from_id(access_token: impl Into<String>) -> Option<Self> {
        Self::new(access_token, None, None, None)
    }

    /// Same as [`Token::new`] but with an explicit absolute expiry.
    #[must_use]
    pub fn with_expiry(
        access_token: impl Into<String>,
        refresh_token: Option<String>,
        expires_at: Option<DateTime<Utc>>,
    ) -> Option<Self> {
        Self::new(access_token, refresh_token, None, None).map(|token| Self { expires_at, ..token })
    }

    #[must_use]
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    #[must_use]
    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }

    #[must_use]
    pub const fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    #[must_use]
    pub fn token_type(&self) -> &str {
        &self.token_type
    }

    /// Check if the token is expired or will expire within the threshold.
    ///
    /// A token without an expiry is never considered expired. A threshold
    /// too large to add to the current time reaches past any expiry.
    #[must_use]
    pub fn is_expired(&self, threshold_seconds: i64) -> bool {
        self.expires_at.is_some_and(|expires_at| {
            let limit = Duration::try_seconds(threshold_seconds)
                .and_then(|threshold| Utc::now().checked_add_signed(threshold));
            !matches!(limit, Some(limit) if limit < expires_at)
        })
    }

    /// Seconds until expiry, negative once expired.
    #[must_use]
    pub fn seconds_until_expiry(&self) -> Option<i64> {
        self.expires_at.map(|expires_at| (expires_at - Utc::now()).num_seconds())
    }
}

// Visible ASCII plus space and tab.
fn is_header_safe(c: char) -> bool {
    c == '\t' || (' '..='~').contains(&c)
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.access_token)
    }
}

// Keep secrets out of debug output.
impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "<redacted>"))
            .field("expires_at", &self.expires_at)
            .field("token_type", &self.token_type)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_access_token_is_absent() {
        assert!(Token::new("", Some("refresh".to_string()), Some(3600), None).is_none());
        assert!(Token::from_id("   ").is_none());
    }

    #[test]
    fn computes_expiry_from_expires_in() {
        let token = Token::new("abc", Some("r1".to_string()), Some(3600), None).unwrap();

        assert_eq!(token.access_token(), "abc");
        assert_eq!(token.refresh_token(), Some("r1"));
        assert_eq!(token.token_type(), "Bearer");
        let secs = token.seconds_until_expiry().unwrap();
        assert!(secs > 3590 && secs <= 3600);
        assert!(!token.is_expired(300));
        assert!(token.is_expired(7200));
    }

    #[test]
    fn no_expiry_is_never_expired() {
        let token = Token::new("abc", None, Some(0), None).unwrap();

        assert!(token.expires_at().is_none());
        assert!(!token.is_expired(i64::from(i32::MAX)));
        assert!(token.seconds_until_expiry().is_none());
    }

    #[test]
    fn past_expiry_reports_expired() {
        let token =
            Token::with_expiry("abc", None, Some(Utc::now() - Duration::seconds(60))).unwrap();

        assert!(token.is_expired(0));
        assert!(token.seconds_until_expiry().unwrap() < 0);
    }

    #[test]
    fn display_renders_access_token_and_debug_redacts() {
        let token = Token::new("secret-value", Some("r".to_string()), None, None).unwrap();

        assert_eq!(token.to_string(), "secret-value");
        assert!(!format!("{token:?}").contains("secret-value"));
    }

    #[test]
    fn overflowing_lifetime_means_no_expiry() {
        let token = Token::new("abc", None, Some(i64::MAX), None).unwrap();

        assert!(token.expires_at().is_none());
        assert!(!token.is_expired(300));
    }

    #[test]
    fn overflowing_threshold_counts_as_expired() {
        let token = Token::new("abc", None, Some(3600), None).unwrap();

        assert!(token.is_expired(i64::MAX));
        assert!(!token.is_expired(0));
    }

    #[test]
    fn header_unsafe_access_token_is_absent() {
        assert!(Token::from_id("abc\ndef").is_none());
        assert!(Token::from_id("abc\r\nX-Injected: 1").is_none());
        assert!(Token::from_id("jeton-\u{e9}t\u{e9}").is_none());
        assert!(Token::from_id("abc.def-ghi_jkl~mno").is_some());
    }

    #[test]
    fn empty_refresh_token_is_dropped() {
        let token = Token::new("abc", Some(String::new()), None, None).unwrap();
        assert!(token.refresh_token().is_none());
    }
}
