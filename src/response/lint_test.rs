/// Tests for the lint response model
#[cfg(test)]
mod tests {
    use crate::response::lint::*;

    fn pg_policy(skip_codes: &[&str]) -> SkipPolicy {
        SkipPolicy::new(skip_codes.iter().map(|s| s.to_string()).collect(), vec!["PG".to_string()])
    }

    const TWO_PG_DIAGNOSTICS: &str = r#"[
        {"Name":"20240101_add_index.sql","Text":"","Reports":[
            {"Text":"concurrent index violations detected","Diagnostics":[
                {"Pos":26,"Text":"Creating index \"idx\" non-concurrently causes write locks","Code":"PG103"},
                {"Pos":0,"Text":"Statement is not transactional","Code":"PG101"}
            ]}
        ]}
    ]"#;

    #[test]
    fn test_error_code_prefix() {
        assert_eq!(error_code_prefix("PG103"), "PG");
        assert_eq!(error_code_prefix("DS103"), "DS");
        assert_eq!(error_code_prefix("ABC1"), "ABC");
        assert_eq!(error_code_prefix("103"), "");
        assert_eq!(error_code_prefix("MF"), "MF");
    }

    #[test]
    fn test_empty_output() {
        let response = MigrationLintResponse::build("", "mg1", &pg_policy(&[]));
        assert_eq!(response.migration_dir, "mg1");
        assert!(response.file_lint_results.is_empty());
        assert!(!response.all_skipped);
        assert_eq!(response.first_error, None);
        assert!(!response.is_blocking());
    }

    #[test]
    fn test_null_output() {
        let response = MigrationLintResponse::build("null", "mg1", &pg_policy(&[]));
        assert!(response.file_lint_results.is_empty());
        assert_eq!(response.first_error, None);
    }

    #[test]
    fn test_unlisted_codes_are_not_skippable() {
        let response = MigrationLintResponse::build(TWO_PG_DIAGNOSTICS, "mg1", &pg_policy(&[]));

        assert_eq!(response.file_lint_results.len(), 1);
        let file = &response.file_lint_results[0];
        assert_eq!(file.filename, "20240101_add_index.sql");
        assert_eq!(file.diagnostics.len(), 2);
        assert!(file.diagnostics.iter().all(|d| !d.can_skip()));
        assert!(!response.all_skipped);
        assert!(!response.can_skip_all_errors());
        assert_eq!(
            response.first_error.as_deref(),
            Some("Creating index \"idx\" non-concurrently causes write locks")
        );
        assert!(response.is_blocking());
    }

    #[test]
    fn test_diagnostic_fields() {
        let response = MigrationLintResponse::build(TWO_PG_DIAGNOSTICS, "mg1", &pg_policy(&["PG103"]));
        match &response.file_lint_results[0].diagnostics[0] {
            LintDiagnostic::Report(d) => {
                assert_eq!(d.error_code.as_deref(), Some("PG103"));
                assert_eq!(d.error_code_group.as_deref(), Some("concurrent index violations detected"));
                assert_eq!(d.position, Some(26));
                assert!(d.can_skip);
            }
            other => panic!("expected a report diagnostic, got {:?}", other),
        }
        assert!(!response.file_lint_results[0].diagnostics[1].can_skip());
        assert!(!response.all_skipped);
    }

    #[test]
    fn test_all_skip_listed_codes() {
        let response = MigrationLintResponse::build(TWO_PG_DIAGNOSTICS, "mg1", &pg_policy(&["PG101", "PG103"]));
        assert!(response.all_skipped);
        assert!(response.can_skip_all_errors());
        assert!(response.has_errors());
        assert!(!response.is_blocking());
        assert_eq!(response.blocking_diagnostics().count(), 0);
    }

    #[test]
    fn test_unrecognized_prefix_blocks_skip() {
        let raw = r#"[{"Name":"1.sql","Reports":[{"Text":"destructive changes detected","Diagnostics":[
            {"Pos":0,"Text":"Dropping table \"users\"","Code":"DS102"}
        ]}]}]"#;
        let policy = SkipPolicy::new(vec!["DS102".to_string()], vec!["PG".to_string()]);
        let response = MigrationLintResponse::build(raw, "mg1", &policy);

        assert!(!response.file_lint_results[0].diagnostics[0].can_skip());
        assert!(!response.all_skipped);

        let policy = SkipPolicy::new(vec!["DS102".to_string()], vec!["PG".to_string(), "DS".to_string()]);
        let response = MigrationLintResponse::build(raw, "mg1", &policy);
        assert!(response.all_skipped);
    }

    #[test]
    fn test_bare_file_error_forces_not_skipped() {
        let raw = r#"[
            {"Name":"1.sql","Reports":[{"Text":"g","Diagnostics":[{"Pos":1,"Text":"skippable","Code":"PG103"}]}]},
            {"Name":"2.sql","Error":"executing statement: syntax error at or near \"tabel\""}
        ]"#;
        let response = MigrationLintResponse::build(raw, "mg1", &pg_policy(&["PG103"]));

        assert_eq!(response.file_lint_results.len(), 2);
        assert_eq!(
            response.file_lint_results[1].diagnostics,
            vec![LintDiagnostic::FileError {
                message: "executing statement: syntax error at or near \"tabel\"".to_string()
            }]
        );
        assert_eq!(response.first_error.as_deref(), Some("skippable"));
        assert!(!response.all_skipped);

        let blocking: Vec<_> = response.blocking_diagnostics().collect();
        assert_eq!(blocking.len(), 1);
        assert_eq!(blocking[0].0, "2.sql");
    }

    #[test]
    fn test_bare_file_error_can_be_first_error() {
        let raw = r#"[
            {"Name":"1.sql","Error":"file level"},
            {"Name":"2.sql","Reports":[{"Text":"g","Diagnostics":[{"Pos":1,"Text":"diag","Code":"PG103"}]}]}
        ]"#;
        let response = MigrationLintResponse::build(raw, "mg1", &pg_policy(&[]));
        assert_eq!(response.first_error.as_deref(), Some("file level"));
    }

    #[test]
    fn test_clean_files_are_dropped() {
        let raw = r#"[{"Name":"1.sql","Text":""},{"Name":"2.sql","Reports":[]}]"#;
        let response = MigrationLintResponse::build(raw, "mg1", &pg_policy(&[]));
        assert!(response.file_lint_results.is_empty());
        assert_eq!(response.first_error, None);
        assert!(response.all_skipped);
        assert!(!response.is_blocking());
    }

    #[test]
    fn test_diagnostic_without_code() {
        let raw = r#"[{"Name":"1.sql","Reports":[{"Text":"g","Diagnostics":[{"Pos":-1,"Text":"no code"}]}]}]"#;
        let response = MigrationLintResponse::build(raw, "mg1", &pg_policy(&[]));
        let diag = &response.file_lint_results[0].diagnostics[0];
        assert_eq!(diag.error_code(), None);
        assert_eq!(diag.position(), Some(-1));
        assert!(!diag.can_skip());
    }

    #[test]
    fn test_opaque_output_and_from_error() {
        let response = MigrationLintResponse::build("Error: no such directory", "mg2", &pg_policy(&[]));
        assert_eq!(response.first_error.as_deref(), Some("Error: no such directory"));
        assert!(response.file_lint_results.is_empty());
        assert!(!response.all_skipped);
        assert_eq!(response, MigrationLintResponse::from_error("Error: no such directory", "mg2"));
    }
}
