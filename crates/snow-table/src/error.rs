//! Error types for snow-table.

/// Result type alias for snow-table operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for snow-table operations.
#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional source error.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    /// Create a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    /// The underlying HTTP-layer error, if this error came from the client.
    pub fn client_error(&self) -> Option<&snow_client::Error> {
        self.source.as_ref()?.downcast_ref::<snow_client::Error>()
    }

    /// Returns true if a lookup matched no records.
    pub fn is_not_found(&self) -> bool {
        matches!(self.kind, ErrorKind::NotFound { .. })
    }

    /// Returns true if a lookup matched more than one record.
    pub fn is_multiple_matches(&self) -> bool {
        matches!(self.kind, ErrorKind::MultipleMatches { .. })
    }
}

/// The kind of error that occurred.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// A single-record lookup matched several records.
    #[error("{count} {table} records match the {query} query")]
    MultipleMatches {
        count: usize,
        table: String,
        query: String,
    },

    /// A mandatory lookup matched nothing.
    #[error("No {table} records match the {query} query")]
    NotFound { table: String, query: String },

    /// Table name rejected before sending any request.
    #[error("Invalid table name: {0}")]
    InvalidTable(String),

    /// Field name rejected by the encoded query builder.
    #[error("Invalid field name: {0}")]
    InvalidField(String),

    /// A record passed to update/delete has no string `sys_id`.
    #[error("{0} record has no sys_id")]
    MissingSysId(String),

    /// The server answered with a body or headers the table API never produces.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Error reported by the HTTP layer.
    #[error("Client error: {0}")]
    Client(String),
}

impl From<snow_client::Error> for Error {
    fn from(err: snow_client::Error) -> Self {
        Error {
            kind: ErrorKind::Client(err.to_string()),
            source: Some(Box::new(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_error_messages() {
        let err = Error::new(ErrorKind::MultipleMatches {
            count: 2,
            table: "sys_user".into(),
            query: "{user_name: alice}".into(),
        });
        assert_eq!(
            err.to_string(),
            "2 sys_user records match the {user_name: alice} query"
        );
        assert!(err.is_multiple_matches());
        assert!(!err.is_not_found());

        let err = Error::new(ErrorKind::NotFound {
            table: "problem".into(),
            query: "{number: PRB0000001}".into(),
        });
        assert_eq!(
            err.to_string(),
            "No problem records match the {number: PRB0000001} query"
        );
        assert!(err.is_not_found());
    }

    #[test]
    fn test_client_error_is_preserved() {
        let client_err = snow_client::Error::new(snow_client::ErrorKind::NotFound(
            "No Record found".into(),
        ));
        let err: Error = client_err.into();

        assert!(matches!(err.kind, ErrorKind::Client(_)));
        assert!(err.to_string().contains("No Record found"));
        let inner = err.client_error().unwrap();
        assert!(inner.is_not_found());
        assert_eq!(inner.status(), Some(404));
    }

    #[test]
    fn test_other_kinds_have_no_client_error() {
        let err = Error::new(ErrorKind::InvalidTable("bad/table".into()));
        assert!(err.client_error().is_none());
        assert_eq!(err.to_string(), "Invalid table name: bad/table");
    }
}
