/// Tests for config module
#[cfg(test)]
mod tests {
    use crate::cli::{CliArgs, Command, DriftArgs, LintArgs, PullRequestArgs, TicketArgs};
    use crate::config::*;
    use crate::inputs::InputSpec;
    use migration_reporter::format::Dialect;
    use std::io::Write;
    use std::path::PathBuf;

    fn dirs() -> Vec<InputSpec> {
        vec![InputSpec { dir: "mg1".to_string(), path: PathBuf::from("mg1.json") }]
    }

    fn drift_args() -> CliArgs {
        CliArgs { config: None, dialect: None, output: None, command: Command::Drift(DriftArgs { dirs: dirs() }) }
    }

    fn lint_args(skip_codes: &[&str], prefixes: &[&str]) -> CliArgs {
        CliArgs {
            config: None,
            dialect: None,
            output: None,
            command: Command::Lint(LintArgs {
                dirs: dirs(),
                skip_codes: skip_codes.iter().map(|s| s.to_string()).collect(),
                prefixes: prefixes.iter().map(|s| s.to_string()).collect(),
            }),
        }
    }

    #[test]
    fn test_defaults_without_file() {
        let config = merge_config(&drift_args(), FileConfig::default());
        assert_eq!(config.dialect, Dialect::HostedReview);
        assert_eq!(config.ticket_prefix, DEFAULT_TICKET_PREFIX);
        assert!(config.skip_policy.skip_codes.is_empty());
        assert_eq!(config.skip_policy.recognized_prefixes, DEFAULT_RECOGNIZED_PREFIXES);
    }

    #[test]
    fn test_parse_full_file() {
        let file = parse_config(
            r#"
            [report]
            dialect = "issue-tracker"
            ticket_prefix = "SCHEMA"

            [lint]
            skip_codes = ["DS103"]
            recognized_prefixes = ["DS"]
            "#,
        )
        .expect("Should parse config");

        assert_eq!(file.report.dialect, Some(Dialect::IssueTracker));
        let config = merge_config(&drift_args(), file);
        assert_eq!(config.dialect, Dialect::IssueTracker);
        assert_eq!(config.ticket_prefix, "SCHEMA");
        assert_eq!(config.skip_policy.skip_codes, vec!["DS103".to_string()]);
        assert_eq!(config.skip_policy.recognized_prefixes, vec!["DS".to_string()]);
    }

    #[test]
    fn test_parse_rejects_unknown_keys() {
        assert!(parse_config("[lint]\nskip = [\"DS103\"]\n").is_err());
        assert!(parse_config("[report]\ndialect = \"html\"\n").is_err());
    }

    #[test]
    fn test_cli_dialect_overrides_file() {
        let mut args = drift_args();
        args.dialect = Some(Dialect::HostedReview);
        let file = parse_config("[report]\ndialect = \"issue-tracker\"\n").unwrap();
        assert_eq!(merge_config(&args, file).dialect, Dialect::HostedReview);
    }

    #[test]
    fn test_lint_flags_extend_file_lists() {
        let file = parse_config("[lint]\nskip_codes = [\"DS103\"]\nrecognized_prefixes = [\"DS\"]\n").unwrap();
        let config = merge_config(&lint_args(&["PG103", "DS103"], &["PG"]), file);

        assert_eq!(config.skip_policy.skip_codes, vec!["DS103".to_string(), "PG103".to_string()]);
        assert_eq!(config.skip_policy.recognized_prefixes, vec!["DS".to_string(), "PG".to_string()]);
        assert!(config.skip_policy.can_skip("PG103"));
    }

    #[test]
    fn test_ticket_prefix_from_cli() {
        let args = CliArgs {
            config: None,
            dialect: Some(Dialect::IssueTracker),
            output: None,
            command: Command::Ticket(TicketArgs {
                body_file: PathBuf::from("body.txt"),
                prefix: Some("OPS".to_string()),
                pull_request: PullRequestArgs::default(),
            }),
        };
        let file = parse_config("[report]\nticket_prefix = \"SCHEMA\"\n").unwrap();
        assert_eq!(merge_config(&args, file).ticket_prefix, "OPS");
    }

    #[test]
    fn test_resolve_config_reads_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[lint]\nskip_codes = [\"MF101\"]").unwrap();

        let mut args = drift_args();
        args.config = Some(file.path().to_path_buf());
        let config = resolve_config(&args).expect("Should resolve config");
        assert_eq!(config.skip_policy.skip_codes, vec!["MF101".to_string()]);
    }

    #[test]
    fn test_resolve_config_missing_explicit_file() {
        let mut args = drift_args();
        args.config = Some(PathBuf::from("/nonexistent/migration-reporter.toml"));
        let err = resolve_config(&args).unwrap_err();
        assert!(err.contains("/nonexistent/migration-reporter.toml"));
    }
}
