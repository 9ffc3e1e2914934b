use chrono::{DateTime, Utc};

use shiplog_core::{ClosedIssue, OpenIssue, ReleaseRecord};

use crate::Result;

/// Read/write access to the issue tracker hosting the releases.
pub trait IssueTracker: Send + Sync {
    /// Tag of the most recent published release, `None` when there is none.
    ///
    /// # Errors
    ///
    /// Returns an error if the tracker cannot be queried.
    fn latest_release_tag(&self) -> Result<Option<String>>;

    /// # Errors
    ///
    /// Returns an error if the release cannot be found or queried.
    fn release_created_at(&self, tag: &str) -> Result<DateTime<Utc>>;

    /// Closed issues, restricted to those closed at or after `since` when given.
    ///
    /// # Errors
    ///
    /// Returns an error if the tracker cannot be queried.
    fn closed_issues(&self, since: Option<DateTime<Utc>>) -> Result<Vec<ClosedIssue>>;

    /// # Errors
    ///
    /// Returns an error if the tracker cannot be queried.
    fn open_issues_with_label(&self, label: &str) -> Result<Vec<OpenIssue>>;

    /// # Errors
    ///
    /// Returns an error if the tracker cannot be queried.
    fn open_issues_in_milestone(&self, milestone: &str) -> Result<Vec<OpenIssue>>;

    /// # Errors
    ///
    /// Returns an error if the issue cannot be closed.
    fn close_issue(&self, number: u64) -> Result<()>;

    /// Creates the release and returns its URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the release cannot be created.
    fn create_release(&self, release: &ReleaseRecord) -> Result<String>;
}
