//! Encoded query builder with automatic value escaping.
//!
//! ServiceNow filters records with an "encoded query": conditions such as
//! `active=true` joined by `^` (AND) or `^OR` (OR), optionally followed by
//! `ORDERBY<field>` terms. Values are escaped and field names validated so
//! user input cannot smuggle in extra conditions.
//!
//! # Example
//!
//! ```rust
//! use snow_table::{EncodedQuery, Query};
//!
//! let filter = EncodedQuery::new()
//!     .eq("active", "true")?
//!     .starts_with("short_description", "Printer")?
//!     .order_by_desc("sys_created_on")?;
//!
//! assert_eq!(
//!     filter.build(),
//!     "active=true^short_descriptionSTARTSWITHPrinter^ORDERBYDESCsys_created_on"
//! );
//!
//! let query = Query::new().encoded(&filter);
//! assert!(query.contains_key("sysparm_query"));
//! # Ok::<(), snow_table::Error>(())
//! ```

use snow_client::security::{encoded_query, names};

use crate::error::{Error, ErrorKind, Result};

/// Builder for `sysparm_query` values.
#[derive(Debug, Clone, Default)]
pub struct EncodedQuery {
    conditions: Vec<String>,
    order_by: Vec<String>,
}

impl EncodedQuery {
    /// An empty query matching every record.
    pub fn new() -> Self {
        Self::default()
    }

    /// `field=value`
    pub fn eq(self, field: &str, value: impl AsRef<str>) -> Result<Self> {
        self.and(field, "=", value.as_ref())
    }

    /// `field!=value`
    pub fn ne(self, field: &str, value: impl AsRef<str>) -> Result<Self> {
        self.and(field, "!=", value.as_ref())
    }

    /// `fieldLIKEvalue` (contains)
    pub fn like(self, field: &str, value: impl AsRef<str>) -> Result<Self> {
        self.and(field, "LIKE", value.as_ref())
    }

    /// `fieldSTARTSWITHvalue`
    pub fn starts_with(self, field: &str, value: impl AsRef<str>) -> Result<Self> {
        self.and(field, "STARTSWITH", value.as_ref())
    }

    /// `fieldINa,b,c`
    ///
    /// Commas separate list members, so values must not contain one.
    pub fn in_list(mut self, field: &str, values: &[impl AsRef<str>]) -> Result<Self> {
        let field = checked_field(field)?;
        let mut escaped = Vec::with_capacity(values.len());
        for value in values {
            let value = value.as_ref();
            if value.contains(',') {
                return Err(Error::new(ErrorKind::InvalidField(format!(
                    "IN value for {} contains a comma: {}",
                    field, value
                ))));
            }
            escaped.push(encoded_query::escape_value(value));
        }
        self.conditions
            .push(format!("{}IN{}", field, escaped.join(",")));
        Ok(self)
    }

    /// `fieldISEMPTY`
    pub fn empty(mut self, field: &str) -> Result<Self> {
        let field = checked_field(field)?;
        self.conditions.push(format!("{}ISEMPTY", field));
        Ok(self)
    }

    /// `fieldISNOTEMPTY`
    pub fn not_empty(mut self, field: &str) -> Result<Self> {
        let field = checked_field(field)?;
        self.conditions.push(format!("{}ISNOTEMPTY", field));
        Ok(self)
    }

    /// `^ORfield=value`, OR-ed with the preceding condition.
    ///
    /// Without a preceding condition this is a plain `eq`.
    pub fn or_eq(mut self, field: &str, value: impl AsRef<str>) -> Result<Self> {
        let field = checked_field(field)?;
        let condition = format!("{}={}", field, encoded_query::escape_value(value.as_ref()));
        match self.conditions.last_mut() {
            Some(last) => {
                last.push_str("^OR");
                last.push_str(&condition);
            }
            None => self.conditions.push(condition),
        }
        Ok(self)
    }

    /// Sort ascending by `field`.
    pub fn order_by(mut self, field: &str) -> Result<Self> {
        let field = checked_field(field)?;
        self.order_by.push(format!("ORDERBY{}", field));
        Ok(self)
    }

    /// Sort descending by `field`.
    pub fn order_by_desc(mut self, field: &str) -> Result<Self> {
        let field = checked_field(field)?;
        self.order_by.push(format!("ORDERBYDESC{}", field));
        Ok(self)
    }

    /// Append a condition verbatim.
    ///
    /// **WARNING**: no escaping is applied. Only use with trusted input.
    pub fn raw(mut self, condition: impl Into<String>) -> Self {
        self.conditions.push(condition.into());
        self
    }

    /// Render the encoded query string.
    pub fn build(&self) -> String {
        self.conditions
            .iter()
            .chain(self.order_by.iter())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("^")
    }

    fn and(mut self, field: &str, operator: &str, value: &str) -> Result<Self> {
        let field = checked_field(field)?;
        self.conditions.push(format!(
            "{}{}{}",
            field,
            operator,
            encoded_query::escape_value(value)
        ));
        Ok(self)
    }
}

fn checked_field(field: &str) -> Result<&str> {
    if names::is_safe_field_name(field) {
        Ok(field)
    } else {
        Err(Error::new(ErrorKind::InvalidField(field.to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query() {
        assert_eq!(EncodedQuery::new().build(), "");
    }

    #[test]
    fn test_conditions_are_joined_with_caret() {
        let query = EncodedQuery::new()
            .eq("active", "true")
            .unwrap()
            .ne("state", "7")
            .unwrap()
            .like("short_description", "email")
            .unwrap();

        assert_eq!(
            query.build(),
            "active=true^state!=7^short_descriptionLIKEemail"
        );
    }

    #[test]
    fn test_values_are_escaped() {
        let query = EncodedQuery::new()
            .eq("name", "x^ORactive=false")
            .unwrap();
        assert_eq!(query.build(), "name=x^^ORactive=false");
    }

    #[test]
    fn test_invalid_field_rejected() {
        let err = EncodedQuery::new().eq("name^ORsys_id", "1").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::InvalidField(_)));

        let err = EncodedQuery::new().order_by("").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::InvalidField(_)));
    }

    #[test]
    fn test_in_and_emptiness() {
        let query = EncodedQuery::new()
            .in_list("priority", &["1", "2"])
            .unwrap()
            .empty("assigned_to")
            .unwrap()
            .not_empty("caller_id.email")
            .unwrap();

        assert_eq!(
            query.build(),
            "priorityIN1,2^assigned_toISEMPTY^caller_id.emailISNOTEMPTY"
        );

        let err = EncodedQuery::new().in_list("name", &["a,b"]).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::InvalidField(_)));
    }

    #[test]
    fn test_or_and_ordering() {
        let query = EncodedQuery::new()
            .eq("priority", "1")
            .unwrap()
            .or_eq("priority", "2")
            .unwrap()
            .eq("active", "true")
            .unwrap()
            .order_by("number")
            .unwrap();

        assert_eq!(
            query.build(),
            "priority=1^ORpriority=2^active=true^ORDERBYnumber"
        );

        let lonely = EncodedQuery::new().or_eq("priority", "2").unwrap();
        assert_eq!(lonely.build(), "priority=2");
    }

    #[test]
    fn test_raw_condition() {
        let query = EncodedQuery::new()
            .raw("sys_created_on>javascript:gs.daysAgoStart(7)")
            .order_by_desc("sys_created_on")
            .unwrap();
        assert_eq!(
            query.build(),
            "sys_created_on>javascript:gs.daysAgoStart(7)^ORDERBYDESCsys_created_on"
        );
    }
}
