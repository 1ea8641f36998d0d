use super::{Dialect, Formatter};

/// Jira wiki markup used in issue-tracker comments and ticket descriptions.
#[derive(Debug, Clone, Copy, Default)]
pub struct IssueTrackerFormatter;

impl Formatter for IssueTrackerFormatter {
    fn dialect(&self) -> Dialect {
        Dialect::IssueTracker
    }

    fn success(&self) -> &'static str {
        "(/)"
    }

    fn failure(&self) -> &'static str {
        "(x)"
    }

    fn skip(&self) -> &'static str {
        "(!)"
    }

    fn header_separator(&self) -> &'static str {
        "||"
    }

    fn row_separator(&self) -> &'static str {
        "|"
    }

    fn bold(&self, text: &str) -> String {
        format!("*{}*", text)
    }

    fn italic(&self, text: &str) -> String {
        format!("_{}_", text)
    }

    fn inline_code(&self, text: &str) -> String {
        format!("{{{{{}}}}}", text)
    }

    /// Single line, no delimiter row.
    fn build_header(&self, columns: &[&str]) -> String {
        let sep = self.header_separator();
        format!("{} {} {}", sep, columns.join(&format!(" {} ", sep)), sep)
    }

    fn user_reference(&self, login: &str) -> String {
        format!("[~{}]", login)
    }

    fn build_link(&self, text: &str, url: &str) -> String {
        format!("[{}|{}]", text, url)
    }

    fn build_quote(&self, text: &str) -> String {
        format!("{{quote}}{}{{quote}}", text)
    }

    fn build_code_block(&self, text: &str, title: Option<&str>) -> String {
        let open = match title {
            Some(t) => format!("{{code:sql|title={}}}", t),
            None => "{code:sql}".to_string(),
        };
        format!("{}\n{}\n{{code}}", open, text.trim_end_matches('\n'))
    }
}
