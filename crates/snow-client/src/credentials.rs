//! Instance credentials and environment-based configuration.
//!
//! Credential types implement custom Debug to redact secrets.

use std::time::Duration;

use crate::config::ClientConfig;
use crate::error::{Error, ErrorKind, Result};

/// Static credentials attached to every request.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// HTTP basic authentication.
    Basic { username: String, password: String },
    /// Pre-issued OAuth access token.
    Bearer(String),
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credentials::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"[REDACTED]")
                .finish(),
            Credentials::Bearer(_) => f.debug_tuple("Bearer").field(&"[REDACTED]").finish(),
        }
    }
}

impl Credentials {
    /// Basic authentication credentials.
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Credentials::Basic {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Bearer token credentials.
    pub fn bearer(token: impl Into<String>) -> Self {
        Credentials::Bearer(token.into())
    }
}

/// Everything needed to build a `ServiceNowClient`.
#[derive(Debug, Clone)]
pub struct InstanceConfig {
    /// Instance root URL, e.g. `https://dev12345.service-now.com`.
    pub host: String,
    pub credentials: Credentials,
    pub client: ClientConfig,
}

impl InstanceConfig {
    /// Create a configuration with default HTTP settings.
    pub fn new(host: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            host: host.into(),
            credentials,
            client: ClientConfig::default(),
        }
    }

    /// Replace the HTTP client settings.
    pub fn with_client_config(mut self, client: ClientConfig) -> Self {
        self.client = client;
        self
    }

    /// Load configuration from environment variables.
    ///
    /// Required:
    /// - `SN_HOST`
    /// - `SN_ACCESS_TOKEN`, or both `SN_USERNAME` and `SN_PASSWORD`
    ///
    /// Optional:
    /// - `SN_TIMEOUT` request timeout in seconds
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`InstanceConfig::from_env`] with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |name: &str| lookup(name).filter(|v| !v.is_empty());

        let host = var("SN_HOST").ok_or_else(|| Error::new(ErrorKind::EnvVar("SN_HOST".into())))?;

        let credentials = match var("SN_ACCESS_TOKEN") {
            Some(token) => Credentials::Bearer(token),
            None => {
                let username = var("SN_USERNAME")
                    .ok_or_else(|| Error::new(ErrorKind::EnvVar("SN_USERNAME".into())))?;
                let password = var("SN_PASSWORD")
                    .ok_or_else(|| Error::new(ErrorKind::EnvVar("SN_PASSWORD".into())))?;
                Credentials::Basic { username, password }
            }
        };

        let mut client = ClientConfig::default();
        if let Some(timeout) = var("SN_TIMEOUT") {
            let secs: u64 = timeout.parse().map_err(|_| {
                Error::new(ErrorKind::Config(format!(
                    "SN_TIMEOUT must be a whole number of seconds, got '{}'",
                    timeout
                )))
            })?;
            client.timeout = Duration::from_secs(secs);
        }

        Ok(Self {
            host,
            credentials,
            client,
        })
    }
}
