//! Client-side argument checks
//!
//! Every check here runs before a request is built, so a rejected argument
//! never costs a round trip.

use crate::common::filter::Filter;
use crate::error::RightScaleError;

/// View used when the caller does not ask for one
pub const DEFAULT_VIEW: &str = "default";

fn owned(valid: &[&str]) -> Vec<String> {
    valid.iter().map(|v| (*v).to_string()).collect()
}

/// Every filter must name a field from `valid`
pub fn check_filters(valid: &[&str], filters: &[Filter]) -> Result<(), RightScaleError> {
    match filters.iter().find(|f| !valid.contains(&f.field.as_str())) {
        Some(filter) => Err(RightScaleError::InvalidFilter {
            field: filter.field.clone(),
            valid: owned(valid),
        }),
        None => Ok(()),
    }
}

/// Resolve a view for index calls: blank means `default`, anything else must be valid
pub fn resolve_view(valid: &[&str], view: Option<&str>) -> Result<String, RightScaleError> {
    Ok(check_view(valid, view)?.unwrap_or_else(|| DEFAULT_VIEW.to_string()))
}

/// Validate an optional view; blank stays absent
pub fn check_view(valid: &[&str], view: Option<&str>) -> Result<Option<String>, RightScaleError> {
    match view.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(v) if valid.contains(&v) => Ok(Some(v.to_string())),
        Some(v) => Err(RightScaleError::InvalidView {
            view: v.to_string(),
            valid: owned(valid),
        }),
    }
}

/// Required string parameters must not be blank
pub fn require_value(name: &str, value: &str) -> Result<(), RightScaleError> {
    if value.trim().is_empty() {
        return Err(RightScaleError::MissingParameter(name.to_string()));
    }
    Ok(())
}

/// Ids that the API only accepts as integers
pub fn check_numeric(name: &str, value: &str) -> Result<(), RightScaleError> {
    require_value(name, value)?;
    if !value.chars().all(|c| c.is_ascii_digit()) {
        return Err(RightScaleError::invalid_parameter(name, format!("'{value}' is not numeric")));
    }
    Ok(())
}

/// Value must be one of a fixed set
pub fn check_choice(name: &str, valid: &[&str], value: &str) -> Result<(), RightScaleError> {
    if !valid.contains(&value) {
        return Err(RightScaleError::invalid_parameter(
            name,
            format!("'{}' is not one of {}", value, valid.join(", ")),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const FILTERS: &[&str] = &["cloud_type", "description", "name"];
    const VIEWS: &[&str] = &["default", "inputs", "inputs_2_0"];

    #[test]
    fn accepts_known_filters() {
        let filters = vec![Filter::eq("name", "EC2 us-east"), Filter::ne("cloud_type", "google")];
        assert!(check_filters(FILTERS, &filters).is_ok());
        assert!(check_filters(FILTERS, &[]).is_ok());
    }

    #[test]
    fn rejects_unknown_filter() {
        let filters = vec![Filter::eq("name", "x"), Filter::eq("region", "x")];
        match check_filters(FILTERS, &filters) {
            Err(RightScaleError::InvalidFilter { field, valid }) => {
                assert_eq!(field, "region");
                assert_eq!(valid.len(), 3);
            }
            other => panic!("expected InvalidFilter, got {other:?}"),
        }
    }

    #[test]
    fn blank_view_resolves_to_default() {
        assert_eq!(resolve_view(VIEWS, None).unwrap(), "default");
        assert_eq!(resolve_view(VIEWS, Some("  ")).unwrap(), "default");
        assert_eq!(resolve_view(VIEWS, Some("inputs_2_0")).unwrap(), "inputs_2_0");
        assert_eq!(check_view(VIEWS, None).unwrap(), None);
    }

    #[test]
    fn unknown_view_is_rejected() {
        let err = resolve_view(VIEWS, Some("extended")).unwrap_err();
        assert!(matches!(err, RightScaleError::InvalidView { ref view, .. } if view == "extended"));
    }

    #[test]
    fn required_values_must_not_be_blank() {
        assert!(require_value("lineage", "db-prod").is_ok());
        let err = require_value("lineage", " ").unwrap_err();
        assert!(matches!(err, RightScaleError::MissingParameter(ref n) if n == "lineage"));
    }

    #[test]
    fn numeric_ids() {
        assert!(check_numeric("backup id", "12345").is_ok());
        assert!(check_numeric("backup id", "12a45").is_err());
        assert!(matches!(
            check_numeric("backup id", ""),
            Err(RightScaleError::MissingParameter(_))
        ));
    }

    #[test]
    fn choices() {
        assert!(check_choice("protocol", &["tcp", "udp", "icmp"], "udp").is_ok());
        assert!(check_choice("protocol", &["tcp", "udp", "icmp"], "sctp").is_err());
    }
}
