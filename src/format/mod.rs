//! Formatter vocabulary for the two output dialects.
//!
//! A `Formatter` only knows how to spell primitives (glyphs, emphasis, table
//! headers, links, code blocks). All sequencing lives in `text_builder`, so
//! both dialects always agree on row order, counts and filtering.

mod hosted_review;
mod issue_tracker;

pub use hosted_review::HostedReviewFormatter;
pub use issue_tracker::IssueTrackerFormatter;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Output markup dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Dialect {
    /// Code-review comments (GitHub flavoured Markdown)
    HostedReview,
    /// Issue-tracker comments and tickets (Jira wiki markup)
    IssueTracker,
}

impl Dialect {
    pub fn as_str(&self) -> &'static str {
        match self {
            Dialect::HostedReview => "hosted-review",
            Dialect::IssueTracker => "issue-tracker",
        }
    }

    pub fn formatter(self) -> &'static dyn Formatter {
        match self {
            Dialect::HostedReview => &HostedReviewFormatter,
            Dialect::IssueTracker => &IssueTrackerFormatter,
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rendering primitives for one dialect.
pub trait Formatter {
    fn dialect(&self) -> Dialect;

    fn success(&self) -> &'static str;
    fn failure(&self) -> &'static str;
    fn skip(&self) -> &'static str;

    /// Delimiter between header cells.
    fn header_separator(&self) -> &'static str;
    /// Delimiter between body cells.
    fn row_separator(&self) -> &'static str;

    fn supports_code_block_inside_table(&self) -> bool {
        false
    }

    fn bold(&self, text: &str) -> String;
    fn italic(&self, text: &str) -> String;
    fn inline_code(&self, text: &str) -> String;

    /// Make `text` safe to place in a single table cell.
    ///
    /// Row separators are backslash-escaped and line breaks folded into spaces.
    fn escape_cell(&self, text: &str) -> String {
        let sep = self.row_separator();
        text.replace("\r\n", " ").replace('\n', " ").replace(sep, &format!("\\{}", sep))
    }

    fn build_header(&self, columns: &[&str]) -> String;

    fn build_row(&self, cells: &[String]) -> String {
        let sep = self.row_separator();
        format!("{} {} {}", sep, cells.join(&format!(" {} ", sep)), sep)
    }

    fn user_reference(&self, login: &str) -> String;
    fn build_link(&self, text: &str, url: &str) -> String;
    fn build_quote(&self, text: &str) -> String;

    /// Collapsible block for long SQL listings.
    fn build_code_block(&self, text: &str, title: Option<&str>) -> String;
}
