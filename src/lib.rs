//! Response modeling and report rendering for schema migration pull requests.
//!
//! Raw output from the migration, lint and drift tools is parsed into the
//! models in [`response`], then rendered by [`text_builder::TextBuilder`] into
//! one of the two [`format::Dialect`]s.

pub mod format;
pub mod response;
pub mod text_builder;

pub use format::{Dialect, Formatter, HostedReviewFormatter, IssueTrackerFormatter};
pub use response::{
    DriftResponse, MigrationExecutionResponse, MigrationLintResponse, MigrationRunListResponse, SkipPolicy,
};
pub use text_builder::{RenderError, RunContext, TextBuilder};
