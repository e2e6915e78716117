//! # snow-client
//!
//! Core HTTP client infrastructure for the ServiceNow REST API.
//!
//! This crate provides the foundational HTTP layer with:
//! - Basic and bearer-token authentication
//! - Compression support (gzip, deflate)
//! - ServiceNow error body parsing and sanitisation
//! - Connection pooling
//! - Request/response tracing
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Application Layer                        │
//! │  (snow-table: TableClient, lookup helpers)                  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │  TableApi
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   ServiceNowClient                          │
//! │  - Holds instance URL, credentials and API path             │
//! │  - get / post / patch / delete returning ApiResponse        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    SnHttpClient                             │
//! │  - Raw HTTP with compression and error mapping              │
//! │  - Request building                                         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use snow_client::{InstanceConfig, ServiceNowClient, TableApi};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), snow_client::Error> {
//!     let client = ServiceNowClient::from_config(InstanceConfig::from_env()?)?;
//!
//!     let response = client
//!         .get("api/now/table/incident", &[("sysparm_limit".into(), "1".into())])
//!         .await?;
//!
//!     println!("{}", response.json["result"]);
//!     Ok(())
//! }
//! ```

mod api;
mod client;
mod config;
mod credentials;
mod error;
mod request;
mod response;
mod servicenow_client;
pub mod security;

pub use api::TableApi;
pub use client::SnHttpClient;
pub use config::{ClientConfig, ClientConfigBuilder};
pub use credentials::{Credentials, InstanceConfig};
pub use error::{Error, ErrorKind, Result};
pub use request::{RequestBuilder, RequestMethod};
pub use response::ApiResponse;
pub use servicenow_client::ServiceNowClient;

/// Default ServiceNow REST API base path.
pub const DEFAULT_API_PATH: &str = "api/now";

/// User-Agent string for the client
pub const USER_AGENT: &str = concat!("snow-api/", env!("CARGO_PKG_VERSION"));
