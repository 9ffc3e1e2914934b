use chrono::NaiveDate;

use shiplog_core::ClosedIssue;

/// One changelog line derived from a closed issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangelogEntry {
    pub issue_number: u64,
    pub title: String,
    pub url: String,
    pub labels: Vec<String>,
}

impl ChangelogEntry {
    #[must_use]
    pub fn new(issue_number: u64, title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            issue_number,
            title: title.into(),
            url: url.into(),
            labels: Vec::new(),
        }
    }

    #[must_use]
    pub fn from_issue(issue: &ClosedIssue) -> Self {
        Self {
            issue_number: issue.number,
            title: issue.title.clone(),
            url: issue.url.clone(),
            labels: issue.labels.clone(),
        }
    }

    /// Markdown list item, e.g. `- Fix crash (#42) [Link](https://x/42)`.
    #[must_use]
    pub fn render(&self) -> String {
        format!("- {} (#{}) [Link]({})", self.title, self.issue_number, self.url)
    }
}

/// Everything needed to render one version section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRelease {
    pub version: String,
    pub date: NaiveDate,
    pub entries: Vec<ChangelogEntry>,
}

impl VersionRelease {
    #[must_use]
    pub fn new(version: impl Into<String>, date: NaiveDate, entries: Vec<ChangelogEntry>) -> Self {
        Self {
            version: version.into(),
            date,
            entries,
        }
    }
}
