use std::time::Duration;

use reqwest::{Client as ReqwestClient, Method, RequestBuilder, StatusCode};
use riskview_domain::RiskViewError;
use tracing::debug;

use crate::errors::InfraError;

/// Fully read HTTP response.
#[derive(Debug, Clone)]
pub struct BufferedResponse {
    pub status: StatusCode,
    pub body: String,
}

/// HTTP client that performs a single attempt per request, bounded by a
/// timeout covering both the exchange and the body read.
#[derive(Clone)]
pub struct HttpClient {
    client: ReqwestClient,
    timeout: Duration,
}

impl HttpClient {
    /// Start building a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Create a request builder using the underlying reqwest client.
    pub fn request<U>(&self, method: Method, url: U) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        self.client.request(method, url)
    }

    /// Execute the request and read its body.
    ///
    /// When the timeout elapses the in-flight request is dropped and the call
    /// fails with [`RiskViewError::Timeout`]. Non-success statuses are
    /// returned as responses, not errors.
    pub async fn send(&self, builder: RequestBuilder) -> Result<BufferedResponse, RiskViewError> {
        let request = builder.build().map_err(|err| RiskViewError::from(InfraError::from(err)))?;

        let method = request.method().clone();
        let url = request.url().clone();
        debug!(%method, %url, timeout_ms = self.timeout.as_millis() as u64, "sending HTTP request");

        let exchange = async {
            let response = self.client.execute(request).await?;
            let status = response.status();
            let body = response.text().await?;
            Ok::<_, reqwest::Error>(BufferedResponse { status, body })
        };

        match tokio::time::timeout(self.timeout, exchange).await {
            Ok(Ok(response)) => {
                debug!(%method, %url, status = %response.status, "received HTTP response");
                Ok(response)
            }
            Ok(Err(err)) => {
                debug!(%method, %url, error = %err, "HTTP request failed");
                Err(InfraError::from(err).into())
            }
            Err(_) => {
                debug!(%method, %url, "HTTP request timed out");
                Err(RiskViewError::Timeout(format!(
                    "{method} {} exceeded {} ms",
                    url.path(),
                    self.timeout.as_millis()
                )))
            }
        }
    }
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    user_agent: Option<String>,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self { timeout: Duration::from_secs(30), user_agent: None }
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

    pub fn build(self) -> Result<HttpClient, RiskViewError> {
        let mut builder = ReqwestClient::builder().no_proxy();

        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }

        let client = builder.build().map_err(|err| {
            let infra: InfraError = err.into();
            RiskViewError::from(infra)
        })?;

        Ok(HttpClient { client, timeout: self.timeout })
    }
}
