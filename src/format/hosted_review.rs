use super::{Dialect, Formatter};

/// GitHub flavoured Markdown used in pull-request comments.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostedReviewFormatter;

impl Formatter for HostedReviewFormatter {
    fn dialect(&self) -> Dialect {
        Dialect::HostedReview
    }

    fn success(&self) -> &'static str {
        "✅"
    }

    fn failure(&self) -> &'static str {
        "❌"
    }

    fn skip(&self) -> &'static str {
        "⚠️"
    }

    fn header_separator(&self) -> &'static str {
        "|"
    }

    fn row_separator(&self) -> &'static str {
        "|"
    }

    fn bold(&self, text: &str) -> String {
        format!("**{}**", text)
    }

    fn italic(&self, text: &str) -> String {
        format!("_{}_", text)
    }

    fn inline_code(&self, text: &str) -> String {
        format!("`{}`", text)
    }

    /// Two lines: the column names, then one `--- |` per column.
    fn build_header(&self, columns: &[&str]) -> String {
        let sep = self.header_separator();
        let names = format!("{} {} {}", sep, columns.join(&format!(" {} ", sep)), sep);
        let rule: String = columns.iter().map(|_| " --- |").collect();
        format!("{}\n{}{}", names, sep, rule)
    }

    fn user_reference(&self, login: &str) -> String {
        format!("@{}", login)
    }

    fn build_link(&self, text: &str, url: &str) -> String {
        format!("[{}]({})", text, url)
    }

    fn build_quote(&self, text: &str) -> String {
        text.lines().map(|line| format!("> {}", line)).collect::<Vec<_>>().join("\n")
    }

    fn build_code_block(&self, text: &str, title: Option<&str>) -> String {
        let summary = title.map(|t| format!("<summary>{}</summary>", t)).unwrap_or_default();
        let fence = code_fence(text);
        format!("<details>{}\n\n{}sql\n{}\n{}\n\n</details>", summary, fence, text.trim_end_matches('\n'), fence)
    }
}

/// Backtick fence longer than any backtick run in `text`, never shorter than three.
fn code_fence(text: &str) -> String {
    let longest = text.split(|c| c != '`').map(str::len).max().unwrap_or(0);
    "`".repeat(longest.max(2) + 1)
}
