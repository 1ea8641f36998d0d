//! Drift response model.

use super::error_message;
use serde::{Deserialize, Serialize};

/// What `schema diff` prints when the live database matches the migration directory.
pub const NO_DRIFT_SENTINEL: &str = "Schemas are synced, no changes to be made.";

/// Result of comparing a live database against its migration directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DriftResponse {
    NoDrift,
    Drift { sql: String },
    Error { message: String },
}

impl DriftResponse {
    /// Classify raw diff output. Empty output and the sentinel both mean no drift.
    pub fn build(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed == NO_DRIFT_SENTINEL {
            DriftResponse::NoDrift
        } else {
            DriftResponse::Drift { sql: raw.to_string() }
        }
    }

    pub fn from_error(message: &str) -> Self {
        DriftResponse::Error { message: error_message(message) }
    }

    pub fn has_drift(&self) -> bool {
        matches!(self, DriftResponse::Drift { .. })
    }

    pub fn sql(&self) -> Option<&str> {
        match self {
            DriftResponse::Drift { sql } => Some(sql),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            DriftResponse::Error { message } => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_means_no_drift() {
        assert_eq!(DriftResponse::build(NO_DRIFT_SENTINEL), DriftResponse::NoDrift);
        assert_eq!(DriftResponse::build("Schemas are synced, no changes to be made.\n"), DriftResponse::NoDrift);
        assert_eq!(DriftResponse::build(""), DriftResponse::NoDrift);
        assert!(!DriftResponse::build("").has_drift());
    }

    #[test]
    fn test_sql_means_drift() {
        let response = DriftResponse::build("-- comment\ndrop table b;");
        assert!(response.has_drift());
        assert_eq!(response.sql(), Some("-- comment\ndrop table b;"));
        assert_eq!(response.error(), None);
    }

    #[test]
    fn test_from_error() {
        let response = DriftResponse::from_error("connection refused");
        assert!(!response.has_drift());
        assert_eq!(response.sql(), None);
        assert_eq!(response.error(), Some("connection refused"));
    }

    #[test]
    fn test_blank_error_gets_a_message() {
        let response = DriftResponse::from_error("");
        assert_eq!(response.error(), Some(crate::response::UNKNOWN_ERROR));
    }
}
