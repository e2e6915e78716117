//! Table API query parameters.

use std::collections::BTreeMap;
use std::fmt;

use crate::encoded_query::EncodedQuery;

/// Parameter excluding reference links from table API responses.
pub const EXCLUDE_REFERENCE_LINK: &str = "sysparm_exclude_reference_link";
/// Page size parameter.
pub const LIMIT: &str = "sysparm_limit";
/// Page offset parameter.
pub const OFFSET: &str = "sysparm_offset";
/// Encoded query parameter.
pub const ENCODED_QUERY: &str = "sysparm_query";
/// Field selection parameter.
pub const FIELDS: &str = "sysparm_fields";
/// Display value parameter.
pub const DISPLAY_VALUE: &str = "sysparm_display_value";

/// Query parameters sent with a table request.
///
/// Plain field filters (`user_name=alice`) and `sysparm_*` options share the
/// same map, matching how the table API reads its URL parameters. Keys are
/// kept sorted so requests and error messages are deterministic.
///
/// ```rust
/// use snow_table::Query;
///
/// let query = Query::from([("user_name", "alice")]).fields(&["sys_id", "email"]);
/// assert_eq!(query.get("sysparm_fields"), Some("sys_id,email"));
/// assert_eq!(query.to_string(), "{sysparm_fields: sys_id,email, user_name: alice}");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    params: BTreeMap<String, String>,
}

impl Query {
    /// An empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter, builder style.
    pub fn with(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.insert(name, value);
        self
    }

    /// Add or replace a parameter.
    pub fn insert(&mut self, name: impl Into<String>, value: impl ToString) -> Option<String> {
        self.params.insert(name.into(), value.to_string())
    }

    /// Add a parameter unless the caller already set it.
    pub fn set_default(&mut self, name: impl Into<String>, value: impl ToString) {
        self.params
            .entry(name.into())
            .or_insert_with(|| value.to_string());
    }

    /// Get a parameter value.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Returns true if the parameter is set.
    pub fn contains_key(&self, name: &str) -> bool {
        self.params.contains_key(name)
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Returns true if no parameters are set.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Restrict the returned fields (`sysparm_fields`).
    pub fn fields(self, fields: &[&str]) -> Self {
        self.with(FIELDS, fields.join(","))
    }

    /// Choose between raw values, display values or both (`sysparm_display_value`).
    pub fn display_value(self, mode: impl ToString) -> Self {
        self.with(DISPLAY_VALUE, mode)
    }

    /// Filter with an encoded query (`sysparm_query`).
    pub fn encoded(self, query: &EncodedQuery) -> Self {
        self.with(ENCODED_QUERY, query.build())
    }

    /// Iterate parameters in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Parameters as owned pairs, ready for the HTTP layer.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        self.params
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (name, value)) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", name, value)?;
        }
        f.write_str("}")
    }
}

impl<K: Into<String>, V: ToString, const N: usize> From<[(K, V); N]> for Query {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for Query {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut query = Query::new();
        for (name, value) in iter {
            query.insert(name, value);
        }
        query
    }
}

impl<K: Into<String>, V: ToString> Extend<(K, V)> for Query {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.insert(name, value);
        }
    }
}
