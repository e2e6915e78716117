//! # snow-api
//!
//! A ServiceNow Table API client library for Rust.
//!
//! ## Security
//!
//! - Credentials are redacted in Debug output
//! - Tracing spans skip payloads and records
//! - Error messages taken from response bodies are sanitized
//!
//! ## Crates
//!
//! - **snow-client** - HTTP layer: configuration, credentials, request/response handling
//! - **snow-table** - Table API: paginated listing, CRUD with check mode, lookups
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use snow_api::{InstanceConfig, Query, ServiceNowClient, TableClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // SN_HOST, SN_USERNAME, SN_PASSWORD or SN_ACCESS_TOKEN
//!     let client = ServiceNowClient::from_config(InstanceConfig::from_env()?)?;
//!     let tables = TableClient::new(client);
//!
//!     let incidents = tables
//!         .list_records("incident", &Query::from([("active", "true")]))
//!         .await?;
//!
//!     for incident in incidents {
//!         println!("{}", incident["number"]);
//!     }
//!
//!     Ok(())
//! }
//! ```

// Re-export all crates for convenient access
pub use snow_client as client;
pub use snow_table as table;

// Re-export commonly used types at the top level
pub use snow_client::{ClientConfig, Credentials, InstanceConfig, ServiceNowClient, TableApi};
pub use snow_table::{EncodedQuery, Query, Record, TableClient};
