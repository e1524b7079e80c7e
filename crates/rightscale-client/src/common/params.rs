//! Ordered request parameters
//!
//! RightScale takes form and query parameters with bracketed keys
//! (`backup[name]`, `filter[]`) that may repeat, so a map will not do.

use crate::common::filter::Filter;

/// Ordered list of key/value pairs used for query strings and form bodies
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    pairs: Vec<(String, String)>,
}

impl Params {
    /// Empty parameter list
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a pair unconditionally
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.pairs.push((key.into(), value.into()));
        self
    }

    /// Append a pair unless the value is absent or blank
    pub fn push_opt<V: ToString>(&mut self, key: impl Into<String>, value: Option<V>) -> &mut Self {
        if let Some(value) = value {
            let value = value.to_string();
            if !value.trim().is_empty() {
                self.pairs.push((key.into(), value));
            }
        }
        self
    }

    /// Append a boolean rendered the way the API expects (`true`/`false`)
    pub fn push_bool(&mut self, key: impl Into<String>, value: bool) -> &mut Self {
        self.push(key, if value { "true" } else { "false" })
    }

    /// Append one `filter[]` pair per filter
    pub fn push_filters(&mut self, filters: &[Filter]) -> &mut Self {
        for filter in filters {
            self.push("filter[]", filter.to_string());
        }
        self
    }

    /// True when no pairs have been added
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// All pairs in insertion order
    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// First value for `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    /// Every value for a repeated `key`
    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_values_are_skipped_when_unset() {
        let mut params = Params::new();
        params
            .push_opt("backup[description]", None::<String>)
            .push_opt("backup[name]", Some("nightly"))
            .push_opt("backup[size]", Some(""))
            .push_opt("backup[iops]", Some(100));
        assert_eq!(
            params.pairs(),
            &[
                ("backup[name]".to_string(), "nightly".to_string()),
                ("backup[iops]".to_string(), "100".to_string()),
            ]
        );
    }

    #[test]
    fn booleans_are_lowercase() {
        let mut params = Params::new();
        params.push_bool("backup[from_master]", true).push_bool("backup[committed]", false);
        assert_eq!(params.get("backup[from_master]"), Some("true"));
        assert_eq!(params.get("backup[committed]"), Some("false"));
    }

    #[test]
    fn repeated_keys_keep_order() {
        let mut params = Params::new();
        params
            .push("account_group_hrefs[]", "/api/account_groups/1")
            .push("allow_comments", "true")
            .push("account_group_hrefs[]", "/api/account_groups/2");
        assert_eq!(
            params.get_all("account_group_hrefs[]"),
            vec!["/api/account_groups/1", "/api/account_groups/2"]
        );
    }

    #[test]
    fn filters_become_filter_array() {
        let mut params = Params::new();
        params.push_filters(&[Filter::eq("name", "web"), Filter::ne("cloud_type", "amazon")]);
        assert_eq!(params.get_all("filter[]"), vec!["name==web", "cloud_type<>amazon"]);
    }
}
