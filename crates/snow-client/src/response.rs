//! HTTP response handling with ServiceNow-specific extensions.

use std::collections::HashMap;

use serde_json::Value;

use crate::error::{Error, ErrorKind, Result};

/// A fully read HTTP response.
///
/// Header names are normalised to lowercase so lookups are
/// case-insensitive. An empty body (as returned by DELETE) is `Value::Null`.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub json: Value,
}

impl ApiResponse {
    /// Build a response, lowercasing header names.
    pub fn new(status: u16, headers: HashMap<String, String>, json: Value) -> Self {
        let headers = headers
            .into_iter()
            .map(|(k, v)| (k.to_lowercase(), v))
            .collect();

        Self {
            status,
            headers,
            json,
        }
    }

    /// Returns true if the response status is successful (2xx).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Get a header value.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_lowercase()).map(|s| s.as_str())
    }

    /// The `result` member of the body, present on every table API payload.
    pub fn result(&self) -> Option<&Value> {
        self.json.get("result")
    }

    /// Take ownership of the `result` member.
    pub fn into_result(self) -> Option<Value> {
        match self.json {
            Value::Object(mut body) => body.remove("result"),
            _ => None,
        }
    }

    /// Read a reqwest response, turning non-success statuses into errors.
    pub(crate) async fn read(response: reqwest::Response) -> Result<Self> {
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();

        let body = response.text().await?;

        if !(200..300).contains(&status) {
            return Err(parse_error_response(status, &body));
        }

        let json = if body.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&body)?
        };

        Ok(Self::new(status, headers, json))
    }
}

/// ServiceNow error body: `{"error": {"message": "..", "detail": ".."}, "status": "failure"}`.
#[derive(Debug, serde::Deserialize)]
struct ServiceNowErrorBody {
    error: ServiceNowErrorDetail,
}

#[derive(Debug, serde::Deserialize)]
struct ServiceNowErrorDetail {
    message: Option<String>,
    detail: Option<String>,
}

/// Parse error response body and convert to appropriate error kind.
fn parse_error_response(status: u16, body: &str) -> Error {
    if let Ok(parsed) = serde_json::from_str::<ServiceNowErrorBody>(body) {
        return Error::new(ErrorKind::ServiceNowApi {
            status,
            message: sanitize_error_message(parsed.error.message.as_deref().unwrap_or("")),
            detail: parsed.error.detail.as_deref().map(sanitize_error_message),
        });
    }

    let sanitized = sanitize_error_message(body);
    let kind = match status {
        401 => ErrorKind::Authentication(sanitized),
        403 => ErrorKind::Authorization(sanitized),
        404 => ErrorKind::NotFound(sanitized),
        _ => ErrorKind::Http {
            status,
            message: sanitized,
        },
    };

    Error::new(kind)
}

/// Sanitize an error message to prevent exposing sensitive data.
///
/// Redacts authorization headers and password parameters, and truncates
/// messages longer than 500 characters.
fn sanitize_error_message(message: &str) -> String {
    const MAX_LENGTH: usize = 500;
    const PATTERNS: [(&str, &str); 3] = [
        (r"(?i)(basic|bearer)\s+[A-Za-z0-9+/=._~-]{8,}", "$1 [REDACTED]"),
        (r"(?i)(password|passwd|access_token)=[^&\s]+", "$1=[REDACTED]"),
        (r"(?i)JSESSIONID=[A-Za-z0-9]+", "JSESSIONID=[REDACTED]"),
    ];

    let mut sanitized = message.to_string();
    for (pattern, replacement) in PATTERNS {
        if let Ok(re) = regex_lite::Regex::new(pattern) {
            sanitized = re.replace_all(&sanitized, replacement).into_owned();
        }
    }

    if let Some((cut, _)) = sanitized.char_indices().nth(MAX_LENGTH) {
        sanitized.truncate(cut);
        sanitized.push_str("...[truncated]");
    }

    sanitized
}
