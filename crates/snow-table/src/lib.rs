//! # snow-table
//!
//! ServiceNow Table API client built on [`snow_client`].
//!
//! ## Features
//!
//! - **Listing** - Fetch every matching record with transparent offset pagination
//! - **Single-record reads** - By query (with uniqueness checks) or by `sys_id`
//! - **CRUD with check mode** - Create, update and delete, or approximate the
//!   result locally without sending anything
//! - **Encoded queries** - Build escaped `sysparm_query` filters
//! - **Lookups** - Users, groups, change requests, CIs, problems and standard
//!   change templates by their natural keys
//!
//! ## Example
//!
//! ```rust,ignore
//! use serde_json::json;
//! use snow_client::{InstanceConfig, ServiceNowClient};
//! use snow_table::{find_user, Query, Record, TableClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), snow_table::Error> {
//!     let client = ServiceNowClient::from_config(InstanceConfig::from_env()?)?;
//!     let tables = TableClient::new(client);
//!
//!     // Lookup
//!     let caller = find_user(&tables, "abel.tuter").await?;
//!
//!     // Create
//!     let mut payload = Record::new();
//!     payload.insert("caller_id".into(), caller["sys_id"].clone());
//!     payload.insert("short_description".into(), json!("VPN is down"));
//!     let incident = tables
//!         .create_record("incident", payload, false, &Query::new())
//!         .await?;
//!
//!     // Delete
//!     tables.delete_record("incident", &incident, false).await?;
//!
//!     Ok(())
//! }
//! ```

mod client;
mod encoded_query;
mod error;
mod lookup;
pub mod query;

pub use client::{Record, TableClient, DEFAULT_BATCH_SIZE};
pub use encoded_query::EncodedQuery;
pub use error::{Error, ErrorKind, Result};
pub use lookup::{
    find_assignment_group, find_change_request, find_configuration_item, find_problem,
    find_standard_change_template, find_user,
};
pub use query::Query;
