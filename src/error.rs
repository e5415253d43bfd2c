//! Error types for the dashboard.
//!
//! Each concern gets its own enum so callers can match on what actually went
//! wrong: record validation, upstream fetches, configuration files and the
//! persisted session.

use std::path::PathBuf;
use thiserror::Error;

/// Rejection of a draft record passed to `ListView::add_item`.
///
/// The collection is never modified when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field was empty.
    #[error("{field} is required")]
    MissingField {
        /// Name of the empty field.
        field: &'static str,
    },
    /// A field was present but unusable.
    #[error("{field} is invalid: {reason}")]
    Invalid {
        /// Name of the offending field.
        field: &'static str,
        /// Why it was rejected.
        reason: String,
    },
}

impl ValidationError {
    /// Returns the human-readable reason shown to the user.
    pub fn reason(&self) -> String {
        self.to_string()
    }

    /// Returns the name of the field that failed validation.
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingField { field } | Self::Invalid { field, .. } => field,
        }
    }
}

/// Checks that a text field is non-empty after trimming.
pub(crate) fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::MissingField { field })
    } else {
        Ok(())
    }
}

/// Failure loading data from the upstream JSON API.
///
/// `Clone` so it can be carried inside bubbletea messages and kept in view
/// state for display.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The request never produced a response (connection, DNS, TLS, ...).
    #[error("request failed: {0}")]
    Request(String),
    /// The server answered with a non-success status.
    #[error("API error: {status} {reason}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Canonical reason phrase, if known.
        reason: String,
    },
    /// The body was not the JSON shape we expected.
    #[error("failed to decode response: {0}")]
    Decode(String),
    /// A paged response lacked its collection array.
    #[error("response has no `{0}` collection")]
    MissingCollection(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            FetchError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            FetchError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            }
        } else {
            FetchError::Request(err.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Decode(err.to_string())
    }
}

/// Failure reading or writing the dashboard configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No per-user configuration directory on this platform.
    #[error("could not determine the configuration directory")]
    NoConfigDir,
    /// The file exists but could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The file could not be written.
    #[error("failed to write {path}: {source}")]
    Write {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid TOML for [`crate::config::DashboardConfig`].
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
    /// The configuration could not be serialized.
    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Failure in the session store or login flow.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Login was attempted without an e-mail address.
    #[error("email is required")]
    MissingEmail,
    /// The backing file could not be read or written.
    #[error("session storage failed: {0}")]
    Io(#[from] std::io::Error),
    /// The stored session is not valid JSON.
    #[error("stored session is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_reason_names_field() {
        let err = require("name", "   ").unwrap_err();
        assert_eq!(err.field(), "name");
        assert_eq!(err.reason(), "name is required");
        assert!(require("name", "Somchai").is_ok());
    }

    #[test]
    fn test_fetch_error_messages() {
        let err = FetchError::Status {
            status: 404,
            reason: "Not Found".to_string(),
        };
        assert_eq!(err.to_string(), "API error: 404 Not Found");
        assert_eq!(
            FetchError::MissingCollection("products".into()).to_string(),
            "response has no `products` collection"
        );
    }
}
