//! Normalized models of the migration, lint and drift tool output.
//!
//! Every constructor here is total: malformed tool output degrades into an
//! error value instead of failing, so the renderer only ever sees one shape.
//!
//! # Module Organization
//!
//! - `execution` - `migrate apply` results per file and per database
//! - `lint` - `migrate lint` diagnostics and skip policy
//! - `drift` - `schema diff` results

mod drift;
mod execution;
mod lint;

pub use drift::{DriftResponse, NO_DRIFT_SENTINEL};
pub use execution::{MigrationExecutionResponse, MigrationRunListResponse, VersionExecution, VersionExecutionError};
pub use lint::{
    FileLintResult, LintDiagnostic, MigrationLintResponse, ReportDiagnostic, SkipPolicy, error_code_prefix,
};

/// Message used when the tool reports a failure without any text.
pub const UNKNOWN_ERROR: &str = "unknown error";

/// A failure always carries a non-blank message.
fn error_message(message: &str) -> String {
    if message.trim().is_empty() { UNKNOWN_ERROR.to_string() } else { message.to_string() }
}
