//! Request decorators
//!
//! A decorator sees every request an [`super::HttpClient`] dispatches,
//! immediately before it goes on the wire.

use mojio_common::SharedToken;
use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::Request;
use tracing::warn;

/// Cross-cutting hook applied to every outgoing request.
pub trait RequestDecorator: Send + Sync {
    fn decorate(&self, request: &mut Request);
}

/// Attaches `Authorization: Bearer <token>` when a token is held.
///
/// Reads a fresh snapshot of the shared token on every request; with no
/// token the request is left unauthenticated.
#[derive(Debug, Clone)]
pub struct BearerAuth {
    token: SharedToken,
}

impl BearerAuth {
    #[must_use]
    pub const fn new(token: SharedToken) -> Self {
        Self { token }
    }
}

impl RequestDecorator for BearerAuth {
    fn decorate(&self, request: &mut Request) {
        let Some(token) = self.token.current() else {
            return;
        };

        match HeaderValue::from_str(&format!("Bearer {}", token.access_token())) {
            Ok(mut value) => {
                value.set_sensitive(true);
                request.headers_mut().insert(AUTHORIZATION, value);
            }
            Err(_) => warn!("access token contains characters not allowed in a header"),
        }
    }
}
