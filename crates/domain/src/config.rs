//! Client configuration
//!
//! Mirrors the recognized configuration surface of the API client. URL
//! fields are templates; [`ClientConfig::resolve`] expands them and checks
//! that every required option is present.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_BASE_URL, DEFAULT_HOST, DEFAULT_OAUTH_BASE_URL, DEFAULT_SCHEME, DEFAULT_TIMEOUT_SECS,
    DEFAULT_VERSION,
};
use crate::errors::{MojioError, Result};

/// Raw client configuration, as loaded from a file, the environment or code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub scheme: String,
    pub host: String,
    /// Template, e.g. `https://{host}/{version}`
    pub base_url: String,
    /// Template for the OAuth2 provider root
    pub oauth_base_url: String,
    pub app_id: Option<String>,
    pub secret_key: Option<String>,
    pub version: String,
    /// Pre-seeded access token id
    pub token: Option<String>,
    pub timeout_secs: u64,
    pub user_agent: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            scheme: DEFAULT_SCHEME.to_string(),
            host: DEFAULT_HOST.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            oauth_base_url: DEFAULT_OAUTH_BASE_URL.to_string(),
            app_id: None,
            secret_key: None,
            version: DEFAULT_VERSION.to_string(),
            token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: None,
        }
    }
}

/// Configuration with templates expanded and required fields checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub base_url: String,
    pub oauth_base_url: String,
    pub app_id: String,
    pub secret_key: String,
    pub version: String,
    pub token: Option<String>,
    pub timeout_secs: u64,
    pub user_agent: Option<String>,
}

impl ClientConfig {
    /// Create a configuration with application credentials and defaults for
    /// everything else.
    #[must_use]
    pub fn new(app_id: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            app_id: Some(app_id.into()),
            secret_key: Some(secret_key.into()),
            ..Self::default()
        }
    }

    /// Validate required options and expand URL templates.
    ///
    /// # Errors
    /// Returns [`MojioError::Config`] if `app_id`, `secret_key`, `version`,
    /// `base_url` or `oauth_base_url` is missing or blank, or if a template
    /// still contains an unknown placeholder after expansion.
    pub fn resolve(&self) -> Result<ResolvedConfig> {
        let app_id = required("app_id", self.app_id.as_deref())?;
        let secret_key = required("secret_key", self.secret_key.as_deref())?;
        let version = required("version", Some(&self.version))?;
        required("base_url", Some(&self.base_url))?;
        required("oauth_base_url", Some(&self.oauth_base_url))?;

        let base_url = self.expand_template("base_url", &self.base_url)?;
        let oauth_base_url = self.expand_template("oauth_base_url", &self.oauth_base_url)?;

        Ok(ResolvedConfig {
            base_url,
            oauth_base_url,
            app_id,
            secret_key,
            version,
            token: self.token.clone().filter(|t| !t.trim().is_empty()),
            timeout_secs: self.timeout_secs,
            user_agent: self.user_agent.clone(),
        })
    }

    /// Expand `{scheme}`, `{host}` and `{version}` placeholders. The doubled
    /// `{{name}}` spelling is accepted too.
    ///
    /// # Errors
    /// Returns [`MojioError::Config`] if an unknown placeholder remains.
    pub fn expand_template(&self, option: &str, template: &str) -> Result<String> {
        let substitutions = [
            ("scheme", self.scheme.as_str()),
            ("host", self.host.as_str()),
            ("version", self.version.as_str()),
        ];

        let mut expanded = template.to_string();
        for (name, value) in substitutions {
            expanded = expanded.replace(&format!("{{{{{name}}}}}"), value);
            expanded = expanded.replace(&format!("{{{name}}}"), value);
        }

        if expanded.contains('{') || expanded.contains('}') {
            return Err(MojioError::Config(format!(
                "{option} contains an unknown placeholder: {template}"
            )));
        }

        Ok(expanded.trim_end_matches('/').to_string())
    }
}

fn required(option: &str, value: Option<&str>) -> Result<String> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(MojioError::Config(format!("missing required option: {option}"))),
    }
}
