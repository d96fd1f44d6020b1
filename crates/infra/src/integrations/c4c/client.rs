/// C4C OData client: authenticated collection reads and connection probing
use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use reqwest::header::{HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder};
use riskview_core::ports::ODataGateway;
use riskview_core::QueryStringExt;
use riskview_domain::constants::{JSON_CONTENT_TYPE, METADATA_PATH};
use riskview_domain::{C4cSettings, Credentials, QueryOptions, Result, RiskViewError};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};
use url::Url;
use uuid::Uuid;

use super::errors::C4cError;
use crate::http::HttpClient;

const USER_AGENT: &str = concat!("riskview/", env!("CARGO_PKG_VERSION"));

/// Read-only client for the C4C OData API of one tenant domain.
///
/// Credentials are supplied per call; the tenant they name selects the host.
pub struct C4cClient {
    settings: C4cSettings,
    http_client: HttpClient,
}

impl C4cClient {
    /// Create a client from endpoint settings.
    ///
    /// # Errors
    /// Returns `RiskViewError::Config` if `base_url_override` is not an
    /// absolute URL.
    pub fn new(settings: C4cSettings) -> Result<Self> {
        if let Some(base_url) = &settings.base_url_override {
            Url::parse(base_url).map_err(|e| {
                RiskViewError::Config(format!("invalid base URL override '{base_url}': {e}"))
            })?;
        }

        let http_client = HttpClient::builder()
            .timeout(settings.request_timeout())
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self { settings, http_client })
    }

    pub fn settings(&self) -> &C4cSettings {
        &self.settings
    }

    /// Service root for the credentials' tenant, always ending in `/`.
    pub fn base_url(&self, credentials: &Credentials) -> String {
        let base = match &self.settings.base_url_override {
            Some(base_url) => base_url.clone(),
            None => format!(
                "https://{}{}{}",
                credentials.tenant(),
                self.settings.domain_suffix,
                self.settings.base_path
            ),
        };

        if base.ends_with('/') {
            base
        } else {
            format!("{base}/")
        }
    }

    /// GET a collection and decode the JSON body into `T`.
    ///
    /// # Errors
    /// - `Timeout` when no complete response arrived within the request timeout
    /// - `Network` for transport failures
    /// - `Auth` / `Http` for non-success statuses
    /// - `Decode` when the body is not valid JSON for `T`
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        credentials: &Credentials,
        collection: &str,
        options: &QueryOptions,
    ) -> Result<T> {
        let request_id = Uuid::new_v4();
        let url =
            format!("{}{}{}", self.base_url(credentials), collection, options.to_encoded_query());

        debug!(%request_id, collection, %url, "C4C request");

        let request = self.authorized(&self.http_client, Method::GET, &url, credentials);
        let response = self.http_client.send(request).await.map_err(|err| {
            warn!(%request_id, collection, error = %err, "C4C request failed");
            err
        })?;

        if !response.status.is_success() {
            let error = C4cError::from_response(response.status, &response.body);
            warn!(
                %request_id,
                collection,
                status = response.status.as_u16(),
                category = %error.category(),
                code = error.code(),
                "C4C returned an error"
            );
            return Err(error.into_domain_error());
        }

        debug!(%request_id, collection, status = response.status.as_u16(), "C4C response");

        serde_json::from_str(&response.body).map_err(|e| {
            RiskViewError::Decode(format!("invalid JSON from {collection}: {e}"))
        })
    }

    /// Check that the tenant is reachable and accepts the credentials.
    ///
    /// Performs a GET of `$metadata` with the probe timeout.
    ///
    /// # Returns
    /// * `true` - 2xx response
    /// * `false` - any other status, timeout or network failure
    pub async fn test_connection(&self, credentials: &Credentials) -> bool {
        let url = format!("{}{}", self.base_url(credentials), METADATA_PATH);

        // Short-lived client with the probe timeout
        let probe_client = match HttpClient::builder()
            .timeout(self.probe_timeout())
            .user_agent(USER_AGENT)
            .build()
        {
            Ok(client) => client,
            Err(err) => {
                warn!(error = %err, "could not build C4C probe client");
                return false;
            }
        };

        let request = self.authorized(&probe_client, Method::GET, &url, credentials);
        match probe_client.send(request).await {
            Ok(response) if response.status.is_success() => {
                info!(tenant = credentials.tenant(), "C4C connection test succeeded");
                true
            }
            Ok(response) => {
                let error = C4cError::from_status_code(response.status);
                warn!(
                    tenant = credentials.tenant(),
                    status = response.status.as_u16(),
                    category = %error.category(),
                    "C4C connection test rejected"
                );
                false
            }
            Err(err) => {
                warn!(tenant = credentials.tenant(), error = %err, "C4C connection test failed");
                false
            }
        }
    }

    fn probe_timeout(&self) -> Duration {
        self.settings.probe_timeout()
    }

    fn authorized(
        &self,
        client: &HttpClient,
        method: Method,
        url: &str,
        credentials: &Credentials,
    ) -> RequestBuilder {
        let token = STANDARD.encode(format!("{}:{}", credentials.username(), credentials.password()));
        let mut authorization = HeaderValue::from_str(&format!("Basic {token}"))
            .unwrap_or_else(|_| HeaderValue::from_static("Basic"));
        authorization.set_sensitive(true);

        client
            .request(method, url)
            .header(ACCEPT, JSON_CONTENT_TYPE)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .header(AUTHORIZATION, authorization)
    }
}

#[async_trait]
impl ODataGateway for C4cClient {
    async fn fetch_json(
        &self,
        credentials: &Credentials,
        collection: &str,
        options: &QueryOptions,
    ) -> Result<serde_json::Value> {
        self.fetch(credentials, collection, options).await
    }

    async fn test_connection(&self, credentials: &Credentials) -> bool {
        C4cClient::test_connection(self, credentials).await
    }
}
