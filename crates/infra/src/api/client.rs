//! Mojio API client
//!
//! Owns the transport, the current token and the OAuth provider. Every
//! request the client sends passes through the bearer decorator, so the
//! `Authorization` header always reflects the token held at send time.

use std::sync::Arc;
use std::time::Duration;

use mojio_common::auth::{OAuthProvider, OAuthProviderConfig, SharedToken, Token, TokenExchange};
use mojio_domain::{ClientConfig, MojioError, ResolvedConfig, Result};
use tracing::{debug, instrument};

use super::command::{Command, CommandKind, HttpResponse};
use super::params::Params;
use super::registry::ServiceDescription;
use crate::http::{BearerAuth, HttpClient, RequestDecorator};

const DEFAULT_USER_AGENT: &str = concat!("mojio-rust/", env!("CARGO_PKG_VERSION"));

/// Client for the Mojio REST API
pub struct ApiClient {
    pub(super) http: HttpClient,
    pub(super) config: ResolvedConfig,
    pub(super) oauth: Arc<dyn TokenExchange>,
    pub(super) token: SharedToken,
    description: &'static ServiceDescription,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.config.base_url)
            .field("oauth_base_url", &self.config.oauth_base_url)
            .field("version", &self.config.version)
            .field("authenticated", &self.token.is_present())
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a client from configuration
    ///
    /// # Arguments
    ///
    /// * `config` - Client configuration; `app_id` and `secret_key` are required
    ///
    /// # Returns
    ///
    /// Client holding the configured token, if any
    ///
    /// # Errors
    ///
    /// Returns [`MojioError::Config`] if required options are missing or a
    /// URL template cannot be resolved
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::builder().config(config).build()
    }

    /// Create a builder for fluent configuration
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    /// Resolved API root, e.g. `https://api.moj.io/v2`.
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    pub fn oauth_base_url(&self) -> &str {
        &self.config.oauth_base_url
    }

    pub fn version(&self) -> &str {
        &self.config.version
    }

    pub fn app_id(&self) -> &str {
        &self.config.app_id
    }

    pub fn service_description(&self) -> &'static ServiceDescription {
        self.description
    }

    /// Create a command for a named operation
    ///
    /// # Arguments
    ///
    /// * `operation` - Operation name, e.g. `"GetVehicles"`
    /// * `params` - Raw parameters; normalized when the command is validated
    ///
    /// # Errors
    ///
    /// Returns [`MojioError::Validation`] if the operation is unknown or
    /// returns a shape the command kind cannot decode
    pub fn command<K: CommandKind>(&self, operation: &str, params: Params) -> Result<Command<K>> {
        let spec = self.description.operation(operation)?;
        Command::new(spec, params)
    }

    /// Validate, send and process a command in place
    ///
    /// The result is left on the command. A command can be dispatched once.
    ///
    /// # Errors
    ///
    /// Returns the first failure among validation, transport, response
    /// status and decoding
    #[instrument(skip(self, command), fields(operation = command.name()))]
    pub async fn dispatch<K: CommandKind>(&self, command: &mut Command<K>) -> Result<()> {
        command.validate()?;
        let request = command.build_request(&self.http, &self.config.base_url).inspect_err(|_| command.fail())?;
        command.mark_dispatched()?;

        let response = match self.http.send(request).await {
            Ok(response) => HttpResponse::read(response).await,
            Err(err) => Err(err),
        };
        let response = response.inspect_err(|_| command.fail())?;

        debug!(status = response.status.as_u16(), "processing response");
        command.process(response).map(|_| ())
    }

    /// Dispatch a command and hand back its result
    ///
    /// # Errors
    ///
    /// See [`ApiClient::dispatch`]
    pub async fn execute<K: CommandKind>(&self, mut command: Command<K>) -> Result<K::Output> {
        self.dispatch(&mut command).await?;
        command
            .into_result()
            .ok_or_else(|| MojioError::Internal("dispatched command holds no result".to_string()))
    }

    /// Create and execute a command in one step
    ///
    /// # Errors
    ///
    /// See [`ApiClient::command`] and [`ApiClient::dispatch`]
    pub async fn call<K: CommandKind>(&self, operation: &str, params: Params) -> Result<K::Output> {
        let command = self.command::<K>(operation, params)?;
        self.execute(command).await
    }
}

/// Builder for [`ApiClient`]
#[derive(Default)]
pub struct ApiClientBuilder {
    config: Option<ClientConfig>,
    token_exchange: Option<Arc<dyn TokenExchange>>,
    decorators: Vec<Arc<dyn RequestDecorator>>,
}

impl ApiClientBuilder {
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Replace the OAuth provider, e.g. with a stub in tests.
    pub fn token_exchange(mut self, exchange: Arc<dyn TokenExchange>) -> Self {
        self.token_exchange = Some(exchange);
        self
    }

    /// Register an extra decorator. Runs after the bearer decorator.
    pub fn decorator(mut self, decorator: Arc<dyn RequestDecorator>) -> Self {
        self.decorators.push(decorator);
        self
    }

    /// Build the client
    ///
    /// # Errors
    ///
    /// Returns [`MojioError::Config`] if no configuration was given, it does
    /// not resolve, or the transport cannot be built
    pub fn build(self) -> Result<ApiClient> {
        let config = self
            .config
            .ok_or_else(|| MojioError::Config("client configuration is required".to_string()))?
            .resolve()?;

        let token = SharedToken::new(config.token.as_deref().and_then(Token::from_id));
        let timeout = Duration::from_secs(config.timeout_secs);

        let mut http = HttpClient::builder()
            .timeout(timeout)
            .user_agent(config.user_agent.clone().unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()))
            .decorator(Arc::new(BearerAuth::new(token.clone())));
        for decorator in self.decorators {
            http = http.decorator(decorator);
        }
        let http = http.build().map_err(|e| MojioError::Config(e.to_string()))?;

        let oauth = match self.token_exchange {
            Some(exchange) => exchange,
            None => Arc::new(
                OAuthProvider::new(
                    OAuthProviderConfig::new(
                        config.oauth_base_url.clone(),
                        config.app_id.clone(),
                        config.secret_key.clone(),
                    ),
                    timeout,
                )
                .map_err(|e| MojioError::Config(e.to_string()))?,
            ),
        };

        debug!(base_url = %config.base_url, version = %config.version, "created API client");

        Ok(ApiClient { http, config, oauth, token, description: ServiceDescription::mojio_v2() })
    }
}
