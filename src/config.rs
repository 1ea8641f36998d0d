/// Configuration resolution module
///
/// This module handles:
/// - Loading the optional TOML config file
/// - Merging it with CLI arguments into a resolved ReportConfig
/// - Defaults for the lint skip policy
use crate::cli::{CliArgs, Command, DEFAULT_CONFIG_FILE};
use log::debug;
use migration_reporter::format::Dialect;
use migration_reporter::response::SkipPolicy;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Lint code prefixes recognized when the config file does not list any
pub const DEFAULT_RECOGNIZED_PREFIXES: &[&str] = &["BC", "CD", "DS", "MF", "MY", "NM", "PG"];

pub const DEFAULT_TICKET_PREFIX: &str = "DB";

/// On-disk config file layout
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub report: ReportSection,
    pub lint: LintSection,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportSection {
    pub dialect: Option<Dialect>,
    pub ticket_prefix: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LintSection {
    pub skip_codes: Vec<String>,
    pub recognized_prefixes: Option<Vec<String>>,
}

/// Fully resolved settings for one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    pub dialect: Dialect,
    pub ticket_prefix: String,
    pub skip_policy: SkipPolicy,
}

/// Parse config file contents
pub fn parse_config(contents: &str) -> Result<FileConfig, String> {
    toml::from_str(contents).map_err(|e| format!("invalid config: {}", e))
}

/// Load a config file from disk
pub fn load_config_file(path: &Path) -> Result<FileConfig, String> {
    let contents = fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    parse_config(&contents).map_err(|e| format!("{}: {}", path.display(), e))
}

/// Build a ReportConfig from CLI arguments and the config file they point to
pub fn resolve_config(args: &CliArgs) -> Result<ReportConfig, String> {
    let file_config = match config_path(args) {
        Some(path) => {
            debug!("Loading config from {:?}", path);
            load_config_file(&path)?
        }
        None => {
            debug!("No config file, using defaults");
            FileConfig::default()
        }
    };

    Ok(merge_config(args, file_config))
}

/// An explicit `--config` must exist; the default file is optional.
fn config_path(args: &CliArgs) -> Option<PathBuf> {
    if let Some(ref path) = args.config {
        return Some(path.clone());
    }
    let default = PathBuf::from(DEFAULT_CONFIG_FILE);
    if default.is_file() { Some(default) } else { None }
}

/// CLI values win over the file; lint lists from the CLI are appended
pub fn merge_config(args: &CliArgs, file: FileConfig) -> ReportConfig {
    let dialect = args.dialect.or(file.report.dialect).unwrap_or(Dialect::HostedReview);

    let cli_prefix = match args.command {
        Command::Ticket(ref ticket) => ticket.prefix.clone(),
        _ => None,
    };
    let ticket_prefix =
        cli_prefix.or(file.report.ticket_prefix).unwrap_or_else(|| DEFAULT_TICKET_PREFIX.to_string());

    let mut skip_codes = file.lint.skip_codes;
    let mut recognized_prefixes = file
        .lint
        .recognized_prefixes
        .unwrap_or_else(|| DEFAULT_RECOGNIZED_PREFIXES.iter().map(|p| p.to_string()).collect());

    if let Command::Lint(ref lint) = args.command {
        extend_unique(&mut skip_codes, &lint.skip_codes);
        extend_unique(&mut recognized_prefixes, &lint.prefixes);
    }

    debug!("Dialect {}, skip codes {:?}, recognized prefixes {:?}", dialect, skip_codes, recognized_prefixes);

    ReportConfig { dialect, ticket_prefix, skip_policy: SkipPolicy::new(skip_codes, recognized_prefixes) }
}

fn extend_unique(list: &mut Vec<String>, extra: &[String]) {
    for item in extra {
        if !list.contains(item) {
            list.push(item.clone());
        }
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
