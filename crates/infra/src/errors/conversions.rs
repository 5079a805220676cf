//! Conversions from external infrastructure errors into the SDK error.

use mojio_common::OAuthProviderError;
use mojio_domain::MojioError;
use reqwest::Error as HttpError;
use serde_json::Error as JsonError;
use url::ParseError as UrlError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub MojioError);

impl From<InfraError> for MojioError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<MojioError> for InfraError {
    fn from(value: MojioError) -> Self {
        Self(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoMojioError {
    fn into_mojio(self) -> MojioError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → MojioError */
/* -------------------------------------------------------------------------- */

impl IntoMojioError for HttpError {
    fn into_mojio(self) -> MojioError {
        if self.is_timeout() {
            return MojioError::Network("HTTP request timed out".into());
        }

        #[cfg(not(target_arch = "wasm32"))]
        if self.is_connect() {
            return MojioError::Network("HTTP connection failure".into());
        }

        if self.is_builder() {
            return MojioError::Validation(format!("invalid HTTP request: {self}"));
        }

        if self.is_decode() {
            return MojioError::Decode(self.to_string());
        }

        MojioError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        Self(value.into_mojio())
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json::Error → MojioError */
/* -------------------------------------------------------------------------- */

impl IntoMojioError for JsonError {
    fn into_mojio(self) -> MojioError {
        MojioError::Decode(format!("invalid JSON payload: {self}"))
    }
}

impl From<JsonError> for InfraError {
    fn from(value: JsonError) -> Self {
        Self(value.into_mojio())
    }
}

/* -------------------------------------------------------------------------- */
/* url::ParseError → MojioError */
/* -------------------------------------------------------------------------- */

impl IntoMojioError for UrlError {
    fn into_mojio(self) -> MojioError {
        MojioError::Config(format!("invalid URL: {self}"))
    }
}

impl From<UrlError> for InfraError {
    fn from(value: UrlError) -> Self {
        Self(value.into_mojio())
    }
}

/* -------------------------------------------------------------------------- */
/* OAuthProviderError → MojioError */
/* -------------------------------------------------------------------------- */

impl IntoMojioError for OAuthProviderError {
    fn into_mojio(self) -> MojioError {
        match self {
            OAuthProviderError::ConfigError(message) => MojioError::Config(message),
            other => MojioError::Auth(other.to_string()),
        }
    }
}

impl From<OAuthProviderError> for InfraError {
    fn from(value: OAuthProviderError) -> Self {
        Self(value.into_mojio())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
