//! High-level ServiceNow client implementing the `TableApi` contract.
//!
//! ## Security
//!
//! - Credentials are redacted in Debug output
//! - Payloads are skipped in tracing spans

use serde_json::Value;
use tracing::instrument;

use crate::api::TableApi;
use crate::client::SnHttpClient;
use crate::config::ClientConfig;
use crate::credentials::{Credentials, InstanceConfig};
use crate::error::{Error, ErrorKind, Result};
use crate::request::RequestBuilder;
use crate::response::ApiResponse;
use crate::DEFAULT_API_PATH;

/// Authenticated client for a single ServiceNow instance.
///
/// # Example
///
/// ```rust,ignore
/// use snow_client::{Credentials, ServiceNowClient, TableApi};
///
/// let client = ServiceNowClient::new(
///     "https://dev12345.service-now.com",
///     Credentials::basic("admin", "secret"),
/// )?;
///
/// let response = client.get("api/now/table/sys_user", &[]).await?;
/// ```
#[derive(Clone)]
pub struct ServiceNowClient {
    http: SnHttpClient,
    instance_url: String,
    credentials: Credentials,
    api_path: Vec<String>,
}

impl std::fmt::Debug for ServiceNowClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceNowClient")
            .field("instance_url", &self.instance_url)
            .field("credentials", &self.credentials)
            .field("api_path", &self.api_path)
            .finish_non_exhaustive()
    }
}

impl ServiceNowClient {
    /// Create a client with default HTTP configuration.
    pub fn new(instance_url: impl Into<String>, credentials: Credentials) -> Result<Self> {
        Self::with_config(instance_url, credentials, ClientConfig::default())
    }

    /// Create a client with custom HTTP configuration.
    pub fn with_config(
        instance_url: impl Into<String>,
        credentials: Credentials,
        config: ClientConfig,
    ) -> Result<Self> {
        let instance_url = normalize_instance_url(&instance_url.into())?;
        let http = SnHttpClient::new(config)?;

        Ok(Self {
            http,
            instance_url,
            credentials,
            api_path: split_path(DEFAULT_API_PATH),
        })
    }

    /// Create a client from an [`InstanceConfig`].
    pub fn from_config(config: InstanceConfig) -> Result<Self> {
        Self::with_config(config.host, config.credentials, config.client)
    }

    /// Override the REST API base path (default `api/now`).
    pub fn with_api_path(mut self, api_path: &str) -> Self {
        self.api_path = split_path(api_path);
        self
    }

    /// Get the instance URL.
    pub fn instance_url(&self) -> &str {
        &self.instance_url
    }

    /// Build the full URL for a path relative to the instance root.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.instance_url, path.trim_start_matches('/'))
    }

    fn request(&self, builder: RequestBuilder, query: &[(String, String)]) -> RequestBuilder {
        builder.auth(self.credentials.clone()).query_pairs(query)
    }
}

impl TableApi for ServiceNowClient {
    fn api_path(&self) -> &[String] {
        &self.api_path
    }

    #[instrument(skip(self, query), fields(path = %path))]
    async fn get(&self, path: &str, query: &[(String, String)]) -> Result<ApiResponse> {
        let request = self.request(self.http.get(self.url(path)), query);
        self.http.execute(request).await
    }

    #[instrument(skip(self, payload, query), fields(path = %path))]
    async fn post(
        &self,
        path: &str,
        payload: &Value,
        query: &[(String, String)],
    ) -> Result<ApiResponse> {
        let request = self
            .request(self.http.post(self.url(path)), query)
            .json_value(payload.clone());
        self.http.execute(request).await
    }

    #[instrument(skip(self, payload, query), fields(path = %path))]
    async fn patch(
        &self,
        path: &str,
        payload: &Value,
        query: &[(String, String)],
    ) -> Result<ApiResponse> {
        let request = self
            .request(self.http.patch(self.url(path)), query)
            .json_value(payload.clone());
        self.http.execute(request).await
    }

    #[instrument(skip(self, query), fields(path = %path))]
    async fn delete(&self, path: &str, query: &[(String, String)]) -> Result<ApiResponse> {
        let request = self.request(self.http.delete(self.url(path)), query);
        self.http.execute(request).await
    }
}

/// Validate the instance URL and strip any trailing slash. A bare host name
/// is assumed to be served over HTTPS.
fn normalize_instance_url(raw: &str) -> Result<String> {
    let raw = raw.trim();
    let candidate = if raw.contains("://") {
        raw.to_string()
    } else {
        format!("https://{}", raw)
    };

    let parsed = url::Url::parse(&candidate)?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(Error::new(ErrorKind::InvalidUrl(format!(
            "unsupported scheme '{}'",
            parsed.scheme()
        ))));
    }

    Ok(candidate.trim_end_matches('/').to_string())
}

fn split_path(path: &str) -> Vec<String> {
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}
