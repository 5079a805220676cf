use std::sync::Arc;
use std::time::Duration;

use mojio_domain::MojioError;
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response};
use tracing::debug;

use super::decorator::RequestDecorator;
use crate::errors::InfraError;

/// HTTP client that runs registered decorators before every dispatch.
///
/// Connection handling, TLS and timeouts are left to reqwest; the wrapper
/// adds no retry policy of its own.
#[derive(Clone)]
pub struct HttpClient {
    client: ReqwestClient,
    decorators: Vec<Arc<dyn RequestDecorator>>,
}

impl HttpClient {
    /// Start building a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Convenience constructor with default configuration.
    pub fn new() -> Result<Self, MojioError> {
        Self::builder().build()
    }

    /// Create a request builder using the underlying reqwest client.
    pub fn request<U>(&self, method: Method, url: U) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        self.client.request(method, url)
    }

    /// Number of registered decorators.
    pub fn decorator_count(&self) -> usize {
        self.decorators.len()
    }

    /// Build the request, decorate it and send it.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response, MojioError> {
        let mut request = builder.build().map_err(|err| MojioError::from(InfraError::from(err)))?;

        for decorator in &self.decorators {
            decorator.decorate(&mut request);
        }

        let method = request.method().clone();
        let url = request.url().clone();
        debug!(%method, %url, "sending HTTP request");

        match self.client.execute(request).await {
            Ok(response) => {
                debug!(%method, %url, status = %response.status(), "received HTTP response");
                Ok(response)
            }
            Err(err) => {
                debug!(%method, %url, error = %err, "HTTP request failed");
                Err(InfraError::from(err).into())
            }
        }
    }
}

/// Builder for [`HttpClient`].
pub struct HttpClientBuilder {
    timeout: Duration,
    user_agent: Option<String>,
    decorators: Vec<Arc<dyn RequestDecorator>>,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: None,
            decorators: Vec::new(),
        }
    }
}

impl HttpClientBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Register a decorator. Decorators run in registration order.
    pub fn decorator(mut self, decorator: Arc<dyn RequestDecorator>) -> Self {
        self.decorators.push(decorator);
        self
    }

    pub fn build(self) -> Result<HttpClient, MojioError> {
        let mut builder = ReqwestClient::builder().timeout(self.timeout).no_proxy();

        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }

        let client = builder.build().map_err(|err| MojioError::from(InfraError::from(err)))?;

        Ok(HttpClient { client, decorators: self.decorators })
    }
}
