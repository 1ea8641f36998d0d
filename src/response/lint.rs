//! Lint response model.
//!
//! Parses `migrate lint --format json` output into per-file diagnostics and
//! decides which of them an operator has agreed to skip.

use super::error_message;
use log::debug;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
struct RawFileReport {
    #[serde(rename = "Name", default)]
    name: String,
    #[serde(rename = "Error", default)]
    error: Option<String>,
    #[serde(rename = "Reports", default)]
    reports: Option<Vec<RawReport>>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawReport {
    #[serde(rename = "Text", default)]
    text: String,
    #[serde(rename = "Diagnostics", default)]
    diagnostics: Option<Vec<RawDiagnostic>>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawDiagnostic {
    #[serde(rename = "Pos", default)]
    pos: Option<i64>,
    #[serde(rename = "Text", default)]
    text: String,
    #[serde(rename = "Code", default)]
    code: Option<String>,
}

/// Leading run of ASCII letters of an error code (`PG103` → `PG`).
pub fn error_code_prefix(code: &str) -> &str {
    let end = code.find(|c: char| !c.is_ascii_alphabetic()).unwrap_or(code.len());
    &code[..end]
}

/// Caller-supplied skip policy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkipPolicy {
    pub skip_codes: Vec<String>,
    pub recognized_prefixes: Vec<String>,
}

impl SkipPolicy {
    pub fn new(skip_codes: Vec<String>, recognized_prefixes: Vec<String>) -> Self {
        SkipPolicy { skip_codes, recognized_prefixes }
    }

    /// A code is skippable only when its prefix is recognized and the exact code is skip-listed.
    pub fn can_skip(&self, code: &str) -> bool {
        let prefix = error_code_prefix(code);
        !prefix.is_empty()
            && self.recognized_prefixes.iter().any(|p| p == prefix)
            && self.skip_codes.iter().any(|c| c == code)
    }
}

/// One lint finding reported against a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportDiagnostic {
    pub message: String,
    pub error_code: Option<String>,
    pub error_code_group: Option<String>,
    pub position: Option<i64>,
    pub can_skip: bool,
}

/// A diagnostic as surfaced to the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LintDiagnostic {
    /// A finding from one of the lint analyzers.
    Report(ReportDiagnostic),
    /// The tool could not lint the file at all. Never skippable.
    FileError { message: String },
}

impl LintDiagnostic {
    pub fn message(&self) -> &str {
        match self {
            LintDiagnostic::Report(d) => &d.message,
            LintDiagnostic::FileError { message } => message,
        }
    }

    pub fn error_code(&self) -> Option<&str> {
        match self {
            LintDiagnostic::Report(d) => d.error_code.as_deref(),
            LintDiagnostic::FileError { .. } => None,
        }
    }

    pub fn position(&self) -> Option<i64> {
        match self {
            LintDiagnostic::Report(d) => d.position,
            LintDiagnostic::FileError { .. } => None,
        }
    }

    pub fn can_skip(&self) -> bool {
        match self {
            LintDiagnostic::Report(d) => d.can_skip,
            LintDiagnostic::FileError { .. } => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileLintResult {
    pub filename: String,
    pub diagnostics: Vec<LintDiagnostic>,
}

impl FileLintResult {
    /// Returns `None` for a clean file (no reports, no error).
    fn from_raw(raw: RawFileReport, policy: &SkipPolicy) -> Option<Self> {
        let mut diagnostics = Vec::new();
        for report in raw.reports.unwrap_or_default() {
            let group = if report.text.is_empty() { None } else { Some(report.text) };
            for diag in report.diagnostics.unwrap_or_default() {
                let error_code = diag.code.filter(|c| !c.is_empty());
                let can_skip = error_code.as_deref().map(|c| policy.can_skip(c)).unwrap_or(false);
                diagnostics.push(LintDiagnostic::Report(ReportDiagnostic {
                    message: diag.text,
                    error_code,
                    error_code_group: group.clone(),
                    position: diag.pos,
                    can_skip,
                }));
            }
        }

        // Reports win over a file-level error when the tool sends both.
        if diagnostics.is_empty()
            && let Some(message) = raw.error.filter(|e| !e.is_empty())
        {
            diagnostics.push(LintDiagnostic::FileError { message });
        }

        if diagnostics.is_empty() { None } else { Some(FileLintResult { filename: raw.name, diagnostics }) }
    }
}

/// One database's lint run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationLintResponse {
    pub migration_dir: String,
    pub file_lint_results: Vec<FileLintResult>,
    pub all_skipped: bool,
    pub first_error: Option<String>,
}

impl MigrationLintResponse {
    /// Build a response from raw lint output. Never fails.
    ///
    /// Empty or `null` output means the tool found nothing to lint, and
    /// `all_skipped` stays false. A parsed list sets `all_skipped` when
    /// every diagnostic (vacuously, none) can be skipped.
    pub fn build(raw: &str, migration_dir: &str, policy: &SkipPolicy) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed == "null" {
            return Self::empty(migration_dir);
        }

        let files = match serde_json::from_str::<Vec<RawFileReport>>(trimmed) {
            Ok(files) => files,
            Err(e) => {
                debug!("Lint output for {} is not a file list ({}), treating it as an error", migration_dir, e);
                return Self::from_error(raw, migration_dir);
            }
        };

        let file_lint_results: Vec<FileLintResult> =
            files.into_iter().filter_map(|f| FileLintResult::from_raw(f, policy)).collect();
        let first_error = file_lint_results
            .iter()
            .flat_map(|f| f.diagnostics.first())
            .next()
            .map(|d| d.message().to_string());
        let all_skipped = file_lint_results.iter().flat_map(|f| f.diagnostics.iter()).all(|d| d.can_skip());

        MigrationLintResponse { migration_dir: migration_dir.to_string(), file_lint_results, all_skipped, first_error }
    }

    /// Build a response from a caught process or network failure.
    pub fn from_error(message: &str, migration_dir: &str) -> Self {
        MigrationLintResponse {
            migration_dir: migration_dir.to_string(),
            file_lint_results: Vec::new(),
            all_skipped: false,
            first_error: Some(error_message(message)),
        }
    }

    fn empty(migration_dir: &str) -> Self {
        MigrationLintResponse {
            migration_dir: migration_dir.to_string(),
            file_lint_results: Vec::new(),
            all_skipped: false,
            first_error: None,
        }
    }

    pub fn can_skip_all_errors(&self) -> bool {
        self.all_skipped
    }

    pub fn has_errors(&self) -> bool {
        self.first_error.is_some()
    }

    /// Diagnostics that would block a merge, in file then emission order.
    pub fn blocking_diagnostics(&self) -> impl Iterator<Item = (&str, &LintDiagnostic)> {
        self.file_lint_results
            .iter()
            .flat_map(|f| f.diagnostics.iter().map(move |d| (f.filename.as_str(), d)))
            .filter(|(_, d)| !d.can_skip())
    }

    /// True when this database has an error nobody agreed to skip.
    pub fn is_blocking(&self) -> bool {
        self.has_errors() && !self.can_skip_all_errors()
    }
}

#[cfg(test)]
#[path = "lint_test.rs"]
mod lint_test;
