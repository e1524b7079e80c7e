//! Index filters
//!
//! A filter is rendered `field==value` or `field<>value` and sent as a
//! repeated `filter[]` query parameter.

use crate::common::timestamp;
use crate::error::RightScaleError;
use chrono::{DateTime, TimeZone};
use std::fmt;
use std::str::FromStr;

/// Comparison applied by a filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOperator {
    /// `==`
    Equal,
    /// `<>`
    NotEqual,
}

impl FilterOperator {
    /// Wire representation
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Equal => "==",
            Self::NotEqual => "<>",
        }
    }
}

/// A single `filter[]` constraint on an index call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub field: String,
    pub operator: FilterOperator,
    pub value: String,
}

impl Filter {
    /// `field==value`
    pub fn eq(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            operator: FilterOperator::Equal,
            value: value.into(),
        }
    }

    /// `field<>value`
    pub fn ne(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            operator: FilterOperator::NotEqual,
            value: value.into(),
        }
    }

    /// Backup filter returning only the latest backup before `at`
    pub fn latest_before<Tz: TimeZone>(at: &DateTime<Tz>) -> Self
    where
        Tz::Offset: fmt::Display,
    {
        Self::eq("latest_before", timestamp::format(at))
    }

    /// Parse a comma separated list such as `name==web,revision<>0`
    pub fn parse_list(list: &str) -> Result<Vec<Self>, RightScaleError> {
        list.split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(str::parse)
            .collect()
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.field, self.operator.as_str(), self.value)
    }
}

impl FromStr for Filter {
    type Err = RightScaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, operator, value) = if let Some((field, value)) = s.split_once("==") {
            (field, FilterOperator::Equal, value)
        } else if let Some((field, value)) = s.split_once("<>") {
            (field, FilterOperator::NotEqual, value)
        } else {
            return Err(RightScaleError::invalid_parameter(
                "filter",
                format!("'{s}' is not of the form field==value or field<>value"),
            ));
        };

        let field = field.trim();
        if field.is_empty() {
            return Err(RightScaleError::invalid_parameter("filter", format!("'{s}' has no field name")));
        }

        Ok(Self {
            field: field.to_string(),
            operator,
            value: value.trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn renders_operators() {
        assert_eq!(Filter::eq("name", "db").to_string(), "name==db");
        assert_eq!(Filter::ne("committed", "true").to_string(), "committed<>true");
    }

    #[test]
    fn parses_filter_lists() {
        let filters = Filter::parse_list("name==base, revision<>0,").unwrap();
        assert_eq!(filters, vec![Filter::eq("name", "base"), Filter::ne("revision", "0")]);
    }

    #[test]
    fn rejects_entries_without_operator() {
        let err = Filter::parse_list("name=base").unwrap_err();
        assert!(err.is_validation());
        assert!("==x".parse::<Filter>().is_err());
    }

    #[test]
    fn latest_before_uses_api_timestamp_format() {
        let at = Utc.with_ymd_and_hms(2013, 3, 6, 19, 50, 0).unwrap();
        assert_eq!(
            Filter::latest_before(&at).to_string(),
            "latest_before==2013/03/06 19:50:00 +0000"
        );
    }
}
