//! The collaborator contract consumed by the table layer.

use std::future::Future;

use serde_json::Value;

use crate::error::Result;
use crate::response::ApiResponse;

/// Authenticated HTTP access to a ServiceNow instance.
///
/// Paths are relative to the instance root (for example
/// `api/now/table/incident`) and queries are sent as URL parameters.
/// Implementations own authentication, timeouts and error signalling;
/// callers treat every `Err` as final.
pub trait TableApi {
    /// Base path segments of the REST API, e.g. `["api", "now"]`.
    fn api_path(&self) -> &[String];

    /// Issue a GET request.
    fn get(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> impl Future<Output = Result<ApiResponse>> + Send;

    /// Issue a POST request with a JSON payload.
    fn post(
        &self,
        path: &str,
        payload: &Value,
        query: &[(String, String)],
    ) -> impl Future<Output = Result<ApiResponse>> + Send;

    /// Issue a PATCH request with a JSON payload.
    fn patch(
        &self,
        path: &str,
        payload: &Value,
        query: &[(String, String)],
    ) -> impl Future<Output = Result<ApiResponse>> + Send;

    /// Issue a DELETE request.
    fn delete(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> impl Future<Output = Result<ApiResponse>> + Send;
}
