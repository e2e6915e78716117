//! Table API client.
//!
//! `TableClient` wraps any [`TableApi`] implementation and provides the
//! record-level operations: paginated listing, single-record lookups, and
//! create/update/delete with check mode.

use serde_json::Value;
use tracing::{debug, instrument};

use snow_client::security::{names, path as path_security};
use snow_client::{ApiResponse, TableApi};

use crate::error::{Error, ErrorKind, Result};
use crate::query::{Query, EXCLUDE_REFERENCE_LINK, LIMIT, OFFSET};

/// A table row keyed by field name.
pub type Record = serde_json::Map<String, Value>;

/// Page size used when none is given; matches the server's own default.
pub const DEFAULT_BATCH_SIZE: usize = 1000;

/// Record-level access to ServiceNow tables.
///
/// Every operation is a sequence of awaited requests on the wrapped client;
/// the only state kept between calls is the page size.
///
/// # Check mode
///
/// Mutating operations accept a `check_mode` flag. When set, no request is
/// sent and the result is approximated locally: `create_record` returns the
/// payload and `update_record` returns the record with the payload applied.
/// Server-side defaults and computed fields are therefore absent from
/// check-mode results.
///
/// # Example
///
/// ```rust,ignore
/// use snow_client::{Credentials, ServiceNowClient};
/// use snow_table::{Query, TableClient};
///
/// let client = ServiceNowClient::new(
///     "https://dev12345.service-now.com",
///     Credentials::basic("admin", "secret"),
/// )?;
/// let tables = TableClient::new(client);
///
/// let open = tables
///     .list_records("incident", &Query::from([("active", "true")]))
///     .await?;
/// ```
#[derive(Debug, Clone)]
pub struct TableClient<C> {
    client: C,
    batch_size: usize,
}

impl<C: TableApi> TableClient<C> {
    /// Create a table client with the default page size.
    pub fn new(client: C) -> Self {
        Self::with_batch_size(client, DEFAULT_BATCH_SIZE)
    }

    /// Create a table client with a custom page size (at least 1).
    pub fn with_batch_size(client: C, batch_size: usize) -> Self {
        Self {
            client,
            batch_size: batch_size.max(1),
        }
    }

    /// Get the underlying HTTP client.
    pub fn inner(&self) -> &C {
        &self.client
    }

    /// Page size used by `list_records`.
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Build `<api_path>/table/<table>[/<subpath>...]`.
    pub fn table_path(&self, table: &str, subpaths: &[&str]) -> Result<String> {
        if !names::is_safe_table_name(table) {
            return Err(Error::new(ErrorKind::InvalidTable(table.to_string())));
        }

        let mut segments: Vec<String> = self.client.api_path().to_vec();
        segments.push("table".to_string());
        segments.push(table.to_string());
        segments.extend(subpaths.iter().map(|s| path_security::encode_segment(s)));

        Ok(segments.join("/"))
    }

    /// Fetch every record of `table` matching `query`.
    ///
    /// Pages of `batch_size` records are requested at increasing offsets
    /// until the offset reaches the `X-Total-Count` reported by the most
    /// recent page. At least one request is always made. Any failed request
    /// aborts the whole listing.
    #[instrument(skip(self, query))]
    pub async fn list_records(&self, table: &str, query: &Query) -> Result<Vec<Record>> {
        let path = self.table_path(table, &[])?;
        let mut base_query = with_defaults(query);
        base_query.insert(LIMIT, self.batch_size);

        let mut offset = 0;
        let mut total = 1;
        let mut records = Vec::new();

        while offset < total {
            let page_query = base_query.clone().with(OFFSET, offset);
            let response = self.client.get(&path, &page_query.to_pairs()).await?;

            total = total_count(&response)?;
            let page = result_list(response)?;
            debug!(offset, page_len = page.len(), total, "Fetched page");

            records.extend(page);
            offset += self.batch_size;
        }

        Ok(records)
    }

    /// Fetch the single record matching `query`.
    ///
    /// More than one match is always an error. No match is an error only
    /// when `must_exist` is set; otherwise `None` is returned.
    #[instrument(skip(self, query))]
    pub async fn get_record(
        &self,
        table: &str,
        query: &Query,
        must_exist: bool,
    ) -> Result<Option<Record>> {
        let mut records = self.list_records(table, query).await?;

        if records.len() > 1 {
            return Err(Error::new(ErrorKind::MultipleMatches {
                count: records.len(),
                table: table.to_string(),
                query: query.to_string(),
            }));
        }

        if must_exist && records.is_empty() {
            return Err(Error::new(ErrorKind::NotFound {
                table: table.to_string(),
                query: query.to_string(),
            }));
        }

        Ok(records.pop())
    }

    /// Fetch a record directly by its `sys_id`.
    ///
    /// A missing record surfaces as the client's not-found error.
    #[instrument(skip(self))]
    pub async fn get_record_by_sys_id(&self, table: &str, sys_id: &str) -> Result<Record> {
        let path = self.table_path(table, &[sys_id])?;
        let response = self.client.get(&path, &[]).await?;
        result_record(response)
    }

    /// Create a record.
    ///
    /// In check mode the payload itself is returned and nothing is sent.
    #[instrument(skip(self, payload, query))]
    pub async fn create_record(
        &self,
        table: &str,
        payload: Record,
        check_mode: bool,
        query: &Query,
    ) -> Result<Record> {
        if check_mode {
            debug!("Check mode: approximating created record with the payload");
            return Ok(payload);
        }

        let path = self.table_path(table, &[])?;
        let response = self
            .client
            .post(&path, &Value::Object(payload), &with_defaults(query).to_pairs())
            .await?;
        result_record(response)
    }

    /// Update `record` with the fields in `payload`.
    ///
    /// In check mode nothing is sent and `record` with `payload` applied on
    /// top is returned.
    #[instrument(skip(self, record, payload, query))]
    pub async fn update_record(
        &self,
        table: &str,
        record: &Record,
        payload: Record,
        check_mode: bool,
        query: &Query,
    ) -> Result<Record> {
        if check_mode {
            debug!("Check mode: approximating updated record by merging the payload");
            let mut merged = record.clone();
            merged.extend(payload);
            return Ok(merged);
        }

        let path = self.table_path(table, &[sys_id(table, record)?])?;
        let response = self
            .client
            .patch(&path, &Value::Object(payload), &with_defaults(query).to_pairs())
            .await?;
        result_record(response)
    }

    /// Delete `record`. Nothing is sent in check mode.
    #[instrument(skip(self, record))]
    pub async fn delete_record(&self, table: &str, record: &Record, check_mode: bool) -> Result<()> {
        if check_mode {
            debug!("Check mode: skipping delete");
            return Ok(());
        }

        let path = self.table_path(table, &[sys_id(table, record)?])?;
        self.client.delete(&path, &[]).await?;
        Ok(())
    }
}

/// Caller query with `sysparm_exclude_reference_link=true` unless already set.
fn with_defaults(query: &Query) -> Query {
    let mut query = query.clone();
    query.set_default(EXCLUDE_REFERENCE_LINK, "true");
    query
}

fn sys_id<'a>(table: &str, record: &'a Record) -> Result<&'a str> {
    record
        .get("sys_id")
        .and_then(Value::as_str)
        .ok_or_else(|| Error::new(ErrorKind::MissingSysId(table.to_string())))
}

fn total_count(response: &ApiResponse) -> Result<usize> {
    let raw = response.header("x-total-count").ok_or_else(|| {
        Error::new(ErrorKind::MalformedResponse(
            "missing X-Total-Count header".to_string(),
        ))
    })?;

    raw.trim().parse().map_err(|_| {
        Error::new(ErrorKind::MalformedResponse(format!(
            "X-Total-Count is not a number: {}",
            raw
        )))
    })
}

fn result_list(response: ApiResponse) -> Result<Vec<Record>> {
    match response.into_result() {
        Some(Value::Array(items)) => items
            .into_iter()
            .map(|item| match item {
                Value::Object(record) => Ok(record),
                other => Err(Error::new(ErrorKind::MalformedResponse(format!(
                    "expected record object in result list, got {}",
                    other
                )))),
            })
            .collect(),
        Some(other) => Err(Error::new(ErrorKind::MalformedResponse(format!(
            "expected result list, got {}",
            other
        )))),
        None => Err(Error::new(ErrorKind::MalformedResponse(
            "response body has no result".to_string(),
        ))),
    }
}

fn result_record(response: ApiResponse) -> Result<Record> {
    match response.into_result() {
        Some(Value::Object(record)) => Ok(record),
        Some(other) => Err(Error::new(ErrorKind::MalformedResponse(format!(
            "expected result object, got {}",
            other
        )))),
        None => Err(Error::new(ErrorKind::MalformedResponse(
            "response body has no result".to_string(),
        ))),
    }
}
