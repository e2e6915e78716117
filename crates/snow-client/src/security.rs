//! Security utilities for ServiceNow API operations.
//!
//! User-provided values end up in two places: URL path segments (table
//! names, sys_ids) and encoded queries (`sysparm_query`). Both have their own
//! escaping rules, collected here.
//!
//! ```rust
//! use snow_client::security::{encoded_query, names, path};
//!
//! assert!(names::is_safe_table_name("cmdb_ci_server"));
//! assert_eq!(path::encode_segment("a/b"), "a%2Fb");
//! assert_eq!(encoded_query::escape_value("a^b"), "a^^b");
//! ```

/// Validation of table and field names.
pub mod names {
    /// Validate a table name: ASCII letters, digits and underscores only.
    ///
    /// ```rust
    /// use snow_client::security::names;
    ///
    /// assert!(names::is_safe_table_name("sys_user"));
    /// assert!(names::is_safe_table_name("x_acme_app_table"));
    /// assert!(!names::is_safe_table_name("sys_user/../../secret"));
    /// assert!(!names::is_safe_table_name(""));
    /// ```
    #[must_use]
    pub fn is_safe_table_name(name: &str) -> bool {
        !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
    }

    /// Validate a field name for encoded queries.
    ///
    /// Dot-walked references (`caller_id.email`) are allowed, empty segments
    /// are not.
    ///
    /// ```rust
    /// use snow_client::security::names;
    ///
    /// assert!(names::is_safe_field_name("short_description"));
    /// assert!(names::is_safe_field_name("caller_id.email"));
    /// assert!(!names::is_safe_field_name("caller_id..email"));
    /// assert!(!names::is_safe_field_name("active=true^ORactive"));
    /// ```
    #[must_use]
    pub fn is_safe_field_name(name: &str) -> bool {
        !name.is_empty() && name.split('.').all(is_safe_table_name)
    }
}

/// URL path encoding.
pub mod path {
    /// Percent-encode a value used as a single path segment.
    ///
    /// ```rust
    /// use snow_client::security::path;
    ///
    /// assert_eq!(path::encode_segment("46d44a5dc0a8010e0000f5bbc2eee7c8"), "46d44a5dc0a8010e0000f5bbc2eee7c8");
    /// assert_eq!(path::encode_segment("../../etc"), "..%2F..%2Fetc");
    /// ```
    #[must_use]
    pub fn encode_segment(value: &str) -> String {
        urlencoding::encode(value).into_owned()
    }
}

/// Encoded query escaping.
pub mod encoded_query {
    /// Escape a value for an encoded query.
    ///
    /// Conditions are separated by `^`, so a literal caret inside a value is
    /// written as `^^`.
    #[must_use]
    pub fn escape_value(value: &str) -> String {
        value.replace('^', "^^")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_names() {
        assert!(names::is_safe_table_name("incident"));
        assert!(names::is_safe_table_name("u_custom_2"));
        assert!(!names::is_safe_table_name("incident?sysparm_limit=1"));
        assert!(!names::is_safe_table_name("inci dent"));
        assert!(!names::is_safe_table_name("sys.user"));
    }

    #[test]
    fn test_field_names() {
        assert!(names::is_safe_field_name("number"));
        assert!(names::is_safe_field_name("assignment_group.manager.name"));
        assert!(!names::is_safe_field_name(".name"));
        assert!(!names::is_safe_field_name("name."));
        assert!(!names::is_safe_field_name("na me"));
    }

    #[test]
    fn test_encode_segment() {
        assert_eq!(path::encode_segment("simple"), "simple");
        assert_eq!(path::encode_segment("has space"), "has%20space");
        assert_eq!(path::encode_segment("a?b=c"), "a%3Fb%3Dc");
    }

    #[test]
    fn test_escape_value() {
        assert_eq!(encoded_query::escape_value("plain"), "plain");
        assert_eq!(encoded_query::escape_value("a^b^^c"), "a^^b^^^^c");
        assert_eq!(
            encoded_query::escape_value("x^ORactive=false"),
            "x^^ORactive=false"
        );
    }
}
