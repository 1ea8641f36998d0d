//! Report text generation shared by both dialects.
//!
//! `TextBuilder` owns every sequencing and aggregation decision (which
//! databases appear, row order, statement counts) and asks its `Formatter`
//! only for spelling. Rendering is pure: the same inputs always give the same
//! string, including the timestamp, which the caller supplies.

use crate::format::{Dialect, Formatter};
use crate::response::{
    DriftResponse, LintDiagnostic, MigrationExecutionResponse, MigrationLintResponse, MigrationRunListResponse,
    VersionExecution,
};
use chrono::{DateTime, Utc};
use log::warn;
use thiserror::Error;

/// Documentation page for lint analyzer codes; the code is appended as the anchor.
pub const LINT_DOC_BASE_URL: &str = "https://atlasgo.io/lint/analyzers#";

const RUN_COLUMNS: [&str; 5] = ["Status", "File", "Executed/Total Statement Count", "Error", "Error Statement"];
const LINT_COLUMNS: [&str; 5] = ["Skipped", "File", "Error", "Error Code", "Position"];
const EMPTY_CELL: &str = "-";
const NO_MIGRATION: &str = "No migration available";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("{operation} is not supported by the {dialect} dialect")]
    UnsupportedOperation { operation: &'static str, dialect: Dialect },
}

/// Metadata about the pull request and run being reported on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunContext {
    pub dry_run: bool,
    /// Migration directories, one per database, in invocation order.
    pub directories: Vec<String>,
    /// `owner/name`
    pub repo: String,
    pub repo_url: String,
    pub pr_number: u64,
    pub pr_url: String,
    /// Link to the CI run that executed the migration tool.
    pub run_url: String,
    pub author: Option<String>,
    pub timestamp: DateTime<Utc>,
}

pub struct TextBuilder<'a> {
    formatter: &'a dyn Formatter,
    context: &'a RunContext,
}

impl<'a> TextBuilder<'a> {
    pub fn new(formatter: &'a dyn Formatter, context: &'a RunContext) -> Self {
        TextBuilder { formatter, context }
    }

    pub fn dialect(&self) -> Dialect {
        self.formatter.dialect()
    }

    /// Execution report: an overall status line, then per database a status
    /// line, its quoted error and a table of files, then every successfully
    /// applied statement in a collapsible block.
    pub fn render_run(&self, response: &MigrationRunListResponse) -> String {
        let f = self.formatter;
        let mut lines = vec![self.run_status_line(response)];

        if self.context.directories.len() != response.execution_response_list.len() {
            warn!(
                "{} migration directories but {} execution results",
                self.context.directories.len(),
                response.execution_response_list.len()
            );
        }

        for (i, dir) in self.context.directories.iter().enumerate() {
            let execution = response.execution_response_list.get(i);
            let body = match execution {
                Some(execution) if !execution.versions.is_empty() => {
                    let mut table = vec![f.build_header(&RUN_COLUMNS)];
                    table.extend(execution.versions.iter().map(|v| self.version_row(v)));
                    table
                }
                // Opaque failure: the quoted error is all there is to show.
                Some(MigrationExecutionResponse { first_error: Some(_), .. }) => Vec::new(),
                _ => vec![f.italic(NO_MIGRATION)],
            };

            lines.push(String::new());
            lines.push(self.directory_status_line(dir, execution));
            if let Some(err) = execution.and_then(|e| e.first_error.as_deref()) {
                lines.push(f.build_quote(err));
                if !body.is_empty() {
                    lines.push(String::new());
                }
            }
            lines.extend(body);
        }

        lines.push(String::new());
        lines.push(f.build_code_block(&self.statement_listing(response), Some("SQL Statements")));
        lines.join("\n")
    }

    fn run_status_line(&self, response: &MigrationRunListResponse) -> String {
        let f = self.formatter;
        let kind = if self.context.dry_run { "Migration dry run" } else { "Migration" };
        let (glyph, summary) = if response.has_errors() {
            (f.failure(), format!("{} failed", kind))
        } else if !response.migration_available {
            (f.skip(), format!("{}: {}", kind, NO_MIGRATION.to_lowercase()))
        } else {
            (f.success(), format!("{} succeeded", kind))
        };
        format!("{} {} {}", glyph, f.bold(&summary), self.run_stamp())
    }

    fn directory_status_line(&self, dir: &str, execution: Option<&MigrationExecutionResponse>) -> String {
        let f = self.formatter;
        let glyph = match execution {
            Some(e) if e.first_error.is_some() => f.failure(),
            Some(e) if e.contains_migrations => f.success(),
            _ => f.skip(),
        };
        format!("{} {} {}", glyph, self.directory_heading(dir), self.run_stamp())
    }

    /// `at <timestamp> (<link to the run>)`
    fn run_stamp(&self) -> String {
        format!(
            "at {} ({})",
            self.context.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.formatter.build_link("view run", &self.context.run_url)
        )
    }

    fn version_row(&self, version: &VersionExecution) -> String {
        let f = self.formatter;
        let (glyph, error, statement) = match version.error {
            Some(ref e) => {
                let statement = if f.supports_code_block_inside_table() {
                    f.build_code_block(&e.statement, None)
                } else {
                    f.escape_cell(&e.statement)
                };
                (f.failure(), f.escape_cell(&e.message), statement)
            }
            None => (f.success(), EMPTY_CELL.to_string(), EMPTY_CELL.to_string()),
        };
        f.build_row(&[
            glyph.to_string(),
            f.escape_cell(&version.name),
            version.executed_count().to_string(),
            error,
            statement,
        ])
    }

    /// Plain SQL listing of what actually ran, grouped by directory and file.
    fn statement_listing(&self, response: &MigrationRunListResponse) -> String {
        let mut out = Vec::new();
        for (i, dir) in self.context.directories.iter().enumerate() {
            out.push(format!("-- DIRECTORY: {}", dir));
            match response.execution_response_list.get(i) {
                Some(execution) if !execution.versions.is_empty() => {
                    for version in &execution.versions {
                        out.push(format!("-- File: {}", version.name));
                        out.extend(version.successful_statements().iter().cloned());
                    }
                }
                _ => out.push(format!("-- {}", NO_MIGRATION)),
            }
        }
        out.join("\n")
    }

    /// Lint report. Databases without lint errors are left out entirely, so a
    /// clean run renders as an empty string.
    pub fn render_lint(&self, results: &[MigrationLintResponse]) -> String {
        let f = self.formatter;
        results
            .iter()
            .filter(|r| r.has_errors())
            .map(|r| {
                let mut lines = vec![self.directory_heading(&r.migration_dir), f.build_header(&LINT_COLUMNS)];
                let before = lines.len();
                for file in &r.file_lint_results {
                    lines.extend(file.diagnostics.iter().map(|d| self.diagnostic_row(&file.filename, d)));
                }
                // Output the tool could not parse has no files to attach rows to.
                if lines.len() == before
                    && let Some(ref err) = r.first_error
                {
                    lines.push(f.build_row(&[
                        f.failure().to_string(),
                        EMPTY_CELL.to_string(),
                        f.escape_cell(err),
                        EMPTY_CELL.to_string(),
                        EMPTY_CELL.to_string(),
                    ]));
                }
                lines.join("\n")
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    fn diagnostic_row(&self, filename: &str, diagnostic: &LintDiagnostic) -> String {
        let f = self.formatter;
        let glyph = if diagnostic.can_skip() { f.success() } else { f.failure() };
        let code = match diagnostic.error_code() {
            Some(code) => f.build_link(code, &format!("{}{}", LINT_DOC_BASE_URL, code)),
            None => EMPTY_CELL.to_string(),
        };
        let position = match diagnostic.position() {
            Some(pos) if pos >= 0 => pos.to_string(),
            _ => EMPTY_CELL.to_string(),
        };
        f.build_row(&[glyph.to_string(), f.escape_cell(filename), f.escape_cell(diagnostic.message()), code, position])
    }

    /// Drift report, one block per database directory.
    pub fn render_drift(&self, responses: &[DriftResponse]) -> String {
        let f = self.formatter;
        if self.context.directories.len() != responses.len() {
            warn!("{} migration directories but {} drift results", self.context.directories.len(), responses.len());
        }

        self.context
            .directories
            .iter()
            .zip(responses)
            .map(|(dir, response)| {
                let heading = self.directory_heading(dir);
                match response {
                    DriftResponse::NoDrift => format!("{} {} No schema drift", heading, f.success()),
                    DriftResponse::Drift { sql } => {
                        let status = format!("{} {} Schema drift detected", heading, f.failure());
                        if sql.trim().is_empty() {
                            status
                        } else {
                            format!("{}\n{}", status, f.build_code_block(sql, Some("Drift")))
                        }
                    }
                    DriftResponse::Error { message } => format!("{} {} {}", heading, f.failure(), message),
                }
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Ticket title. Only the issue-tracker dialect has tickets.
    pub fn title(&self, prefix: &str) -> Result<String, RenderError> {
        self.require_tickets("title")?;
        Ok(format!("[{}] Schema migration review: {}#{}", prefix, self.context.repo, self.context.pr_number))
    }

    /// Ticket description: `body` followed by links back to the pull request.
    pub fn description(&self, body: &str) -> Result<String, RenderError> {
        self.require_tickets("description")?;
        let f = self.formatter;
        let ctx = self.context;
        let mut out = format!(
            "{}\n\n{} {}\n{} {}",
            body,
            f.bold("Pull request:"),
            f.build_link(&format!("{}#{}", ctx.repo, ctx.pr_number), &ctx.pr_url),
            f.bold("Repository:"),
            f.build_link(&ctx.repo, &ctx.repo_url)
        );
        if let Some(ref author) = ctx.author {
            out.push_str(&format!("\n{} {}", f.bold("Author:"), f.user_reference(author)));
        }
        Ok(out)
    }

    fn require_tickets(&self, operation: &'static str) -> Result<(), RenderError> {
        match self.dialect() {
            Dialect::IssueTracker => Ok(()),
            dialect => Err(RenderError::UnsupportedOperation { operation, dialect }),
        }
    }

    fn directory_heading(&self, dir: &str) -> String {
        format!("{} {}", self.formatter.bold("Directory:"), self.formatter.inline_code(dir))
    }
}

#[cfg(test)]
#[path = "text_builder_test.rs"]
mod text_builder_test;
