use chrono::NaiveDate;

use crate::entry::{ChangelogEntry, VersionRelease};

pub const CHANGELOG_HEADER: &str = "# Changelog\n";

/// Rendered in place of entries when a release has nothing to report.
pub const NO_CHANGES_LINE: &str = "- No significant changes.";

#[must_use]
pub fn new_changelog() -> String {
    CHANGELOG_HEADER.to_string()
}

#[must_use]
pub fn format_entries(entries: &[ChangelogEntry]) -> String {
    if entries.is_empty() {
        return NO_CHANGES_LINE.to_string();
    }

    entries
        .iter()
        .map(ChangelogEntry::render)
        .collect::<Vec<_>>()
        .join("\n")
}

#[must_use]
pub fn format_version_header(version: &str, date: NaiveDate) -> String {
    format!("## {version} ({})", date.format("%Y-%m-%d"))
}

#[must_use]
pub fn format_version_release(release: &VersionRelease) -> String {
    let mut output = format_version_header(&release.version, release.date);
    output.push('\n');
    output.push_str(&format_entries(&release.entries));
    output.push('\n');
    output
}
