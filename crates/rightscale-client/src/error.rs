//! RightScale client errors

use thiserror::Error;

/// Errors that can occur when interacting with the RightScale API
#[derive(Debug, Error)]
pub enum RightScaleError {
    /// HTTP request/response error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// RightScale API answered with a failure status
    #[error("RightScale API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the API
        status: u16,
        /// Response body, or a description of the failed call
        message: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Authentication failed (bad credentials, expired session cookies, etc.)
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// A filter names a field the resource does not support
    #[error("Invalid filter '{field}' (valid filters: {})", .valid.join(", "))]
    InvalidFilter {
        /// Offending filter field
        field: String,
        /// Filter fields accepted by the resource
        valid: Vec<String>,
    },

    /// A view is not one of the resource's views
    #[error("Invalid view '{view}' (valid views: {})", .valid.join(", "))]
    InvalidView {
        /// Offending view
        view: String,
        /// Views accepted by the resource
        valid: Vec<String>,
    },

    /// A parameter has a value the API does not accept
    #[error("Invalid parameter {name}: {reason}")]
    InvalidParameter {
        /// Parameter name
        name: String,
        /// Why the value was rejected
        reason: String,
    },

    /// A required parameter was empty
    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    /// The resource carries no link with the requested rel
    #[error("{kind} has no '{rel}' link")]
    MissingLink {
        /// Resource type name
        kind: &'static str,
        /// Link relation that was requested
        rel: String,
    },

    /// A create or action call succeeded but returned no Location header
    #[error("No Location header in response to {0}")]
    MissingLocation(String),

    /// Configuration could not be loaded or is inconsistent
    #[error("Configuration error: {0}")]
    Config(String),

    /// Reading a configuration file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RightScaleError {
    /// True for errors raised while checking arguments, before any request is sent.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidFilter { .. }
                | Self::InvalidView { .. }
                | Self::InvalidParameter { .. }
                | Self::MissingParameter(_)
        )
    }

    /// True when the API itself rejected the call.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            Self::Api { .. } | Self::NotFound(_) | Self::Authentication(_)
        )
    }

    pub(crate) fn invalid_parameter(name: &str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_are_not_remote() {
        let err = RightScaleError::MissingParameter("lineage".to_string());
        assert!(err.is_validation());
        assert!(!err.is_remote());
    }

    #[test]
    fn invalid_filter_lists_valid_fields() {
        let err = RightScaleError::InvalidFilter {
            field: "colour".to_string(),
            valid: vec!["name".to_string(), "description".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Invalid filter 'colour' (valid filters: name, description)"
        );
    }

    #[test]
    fn api_errors_are_remote() {
        let err = RightScaleError::Api {
            status: 422,
            message: "bad lineage".to_string(),
        };
        assert!(err.is_remote());
        assert!(!err.is_validation());
    }
}
