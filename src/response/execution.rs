//! Execution response model.
//!
//! Parses the JSON emitted by `migrate apply --format json` (or whatever the
//! tool printed instead) into a normalized per-database execution tree.

use super::error_message;
use log::debug;
use serde::{Deserialize, Serialize};

/// Raw record for one migration file as emitted by the migration tool.
///
/// `Start`/`End` are present in the payload but unused; serde drops them.
#[derive(Debug, Clone, Deserialize)]
struct RawVersionExecution {
    #[serde(rename = "Name", default)]
    name: String,
    #[serde(rename = "Version", default)]
    version: String,
    #[serde(rename = "Description", default)]
    description: String,
    #[serde(rename = "Applied", default)]
    applied: Option<Vec<String>>,
    #[serde(rename = "Error", default)]
    error: Option<RawExecutionError>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawExecutionError {
    #[serde(rename = "Stmt", default)]
    stmt: String,
    #[serde(rename = "Text", default)]
    text: String,
}

/// The statement that failed inside one migration file and the tool's error text for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionExecutionError {
    pub statement: String,
    pub message: String,
}

/// One migration file's attempted application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionExecution {
    pub name: String,
    pub version: String,
    pub description: String,
    /// Statements exactly as reported by the tool. When `error` is set the
    /// last entry is the failing statement.
    pub applied_statements: Vec<String>,
    pub error: Option<VersionExecutionError>,
}

impl VersionExecution {
    fn from_raw(raw: RawVersionExecution) -> Self {
        VersionExecution {
            name: raw.name,
            version: raw.version,
            description: raw.description,
            applied_statements: raw.applied.unwrap_or_default(),
            error: raw.error.map(|e| VersionExecutionError { message: error_message(&e.text), statement: e.stmt }),
        }
    }

    /// Statements that actually succeeded.
    ///
    /// Drops the trailing failing statement when an error is present. A file
    /// that failed before any statement was recorded yields an empty slice.
    pub fn successful_statements(&self) -> &[String] {
        if self.error.is_some() {
            let end = self.applied_statements.len().saturating_sub(1);
            &self.applied_statements[..end]
        } else {
            &self.applied_statements
        }
    }

    /// Number of statements counted as executed in reports.
    pub fn executed_count(&self) -> usize {
        self.successful_statements().len()
    }

    pub fn has_applied_statements(&self) -> bool {
        !self.successful_statements().is_empty()
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }
}

/// One database's migration run.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MigrationExecutionResponse {
    pub contains_migrations: bool,
    pub versions: Vec<VersionExecution>,
    pub first_error: Option<String>,
}

impl MigrationExecutionResponse {
    /// Build a response from raw tool output. Never fails.
    ///
    /// - empty or `null` → no migrations, no error
    /// - JSON array → one `VersionExecution` per element
    /// - anything else → the raw text becomes `first_error`
    pub fn build(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed == "null" {
            return Self::default();
        }

        match serde_json::from_str::<Vec<RawVersionExecution>>(trimmed) {
            Ok(entries) => Self::from_versions(entries.into_iter().map(VersionExecution::from_raw).collect()),
            Err(e) => {
                debug!("Execution output is not a version list ({}), treating it as an error", e);
                Self::from_error(raw)
            }
        }
    }

    /// Build a response from a caught process or network failure.
    pub fn from_error(message: &str) -> Self {
        MigrationExecutionResponse {
            contains_migrations: false,
            versions: Vec::new(),
            first_error: Some(error_message(message)),
        }
    }

    fn from_versions(versions: Vec<VersionExecution>) -> Self {
        let contains_migrations = versions.iter().any(|v| v.has_applied_statements());
        let first_error = versions.iter().find_map(|v| v.error.as_ref().map(|e| e.message.clone()));
        MigrationExecutionResponse { contains_migrations, versions, first_error }
    }
}

/// Migration results for every database touched by a pull request.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MigrationRunListResponse {
    pub migration_available: bool,
    pub execution_response_list: Vec<MigrationExecutionResponse>,
    /// First error across all databases, in list order.
    pub err_msg: Option<String>,
}

impl MigrationRunListResponse {
    pub fn build(execution_response_list: Vec<MigrationExecutionResponse>) -> Self {
        let migration_available = execution_response_list.iter().any(|r| r.contains_migrations);
        let err_msg = execution_response_list.iter().find_map(|r| r.first_error.clone());
        MigrationRunListResponse { migration_available, execution_response_list, err_msg }
    }

    pub fn has_errors(&self) -> bool {
        self.err_msg.is_some()
    }
}
