use crate::inputs::{InputSpec, parse_input_spec};
use clap::builder::{EnumValueParser, TypedValueParser};
use clap::{Args, Parser, Subcommand, ValueEnum};
use migration_reporter::format::Dialect;
use std::path::PathBuf;

/// Config file looked up in the working directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "migration-reporter.toml";

#[derive(Parser, Debug, Clone)]
#[command(name = "migration-reporter")]
#[command(about = "Render schema migration, lint and drift tool output as review comments or tickets")]
#[command(version)]
pub struct CliArgs {
    /// TOML config file (skip codes, recognized prefixes, default dialect)
    #[arg(long, global = true, value_name = "PATH", env = "MIGRATION_REPORTER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output dialect (overrides the config file)
    #[arg(long, global = true, value_parser = EnumValueParser::<DialectArg>::new().map(Dialect::from))]
    pub dialect: Option<Dialect>,

    /// Write the rendered report here instead of stdout
    #[arg(long, short = 'o', global = true, value_name = "PATH")]
    pub output: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Values accepted by `--dialect`
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialectArg {
    /// Code-review comments (GitHub flavoured Markdown)
    HostedReview,
    /// Issue-tracker comments and tickets (Jira wiki markup)
    IssueTracker,
}

impl From<DialectArg> for Dialect {
    fn from(arg: DialectArg) -> Self {
        match arg {
            DialectArg::HostedReview => Dialect::HostedReview,
            DialectArg::IssueTracker => Dialect::IssueTracker,
        }
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Render `migrate apply` results
    Run(RunArgs),
    /// Render `migrate lint` results
    Lint(LintArgs),
    /// Render `schema diff` results
    Drift(DriftArgs),
    /// Print an issue-tracker ticket title and description
    Ticket(TicketArgs),
}

/// Pull request the report is about
#[derive(Args, Debug, Clone, Default)]
pub struct PullRequestArgs {
    /// Repository as owner/name
    #[arg(long, default_value = "")]
    pub repo: String,

    /// Repository web URL
    #[arg(long, default_value = "")]
    pub repo_url: String,

    /// Pull request number
    #[arg(long, default_value = "0")]
    pub pr_number: u64,

    /// Pull request web URL
    #[arg(long, default_value = "")]
    pub pr_url: String,

    /// CI run that executed the tool (defaults to the pull request URL)
    #[arg(long)]
    pub run_url: Option<String>,

    /// Pull request author login
    #[arg(long)]
    pub author: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Raw tool output per database, as DIR=PATH (repeat in invocation order)
    #[arg(long = "dir", value_name = "DIR=PATH", required = true, value_parser = parse_input_spec)]
    pub dirs: Vec<InputSpec>,

    /// The migration was applied with --dry-run
    #[arg(long)]
    pub dry_run: bool,

    #[command(flatten)]
    pub pull_request: PullRequestArgs,
}

#[derive(Args, Debug, Clone)]
pub struct LintArgs {
    /// Raw tool output per database, as DIR=PATH (repeat in invocation order)
    #[arg(long = "dir", value_name = "DIR=PATH", required = true, value_parser = parse_input_spec)]
    pub dirs: Vec<InputSpec>,

    /// Additional lint codes the reviewers agreed to skip
    #[arg(long = "skip-code", value_name = "CODE")]
    pub skip_codes: Vec<String>,

    /// Additional recognized lint code prefixes
    #[arg(long = "prefix", value_name = "PREFIX")]
    pub prefixes: Vec<String>,
}

#[derive(Args, Debug, Clone)]
pub struct DriftArgs {
    /// Raw tool output per database, as DIR=PATH (repeat in invocation order)
    #[arg(long = "dir", value_name = "DIR=PATH", required = true, value_parser = parse_input_spec)]
    pub dirs: Vec<InputSpec>,
}

#[derive(Args, Debug, Clone)]
pub struct TicketArgs {
    /// File holding the ticket body (usually a rendered report)
    #[arg(long, value_name = "PATH")]
    pub body_file: PathBuf,

    /// Title prefix (overrides the config file)
    #[arg(long)]
    pub prefix: Option<String>,

    #[command(flatten)]
    pub pull_request: PullRequestArgs,
}

impl CliArgs {
    pub fn parse_args() -> Self {
        CliArgs::parse()
    }
}
