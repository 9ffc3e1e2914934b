use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use shiplog_changelog::{ChangelogError, VersionRelease};
use shiplog_core::{ClosedIssue, OpenIssue, ReleaseRecord};
use shiplog_tracker::TrackerError;

use crate::Result;
use crate::error::OperationError;
use crate::traits::{ChangelogWriteResult, ChangelogWriter, IssueTracker};

fn tracker_failure(command: &str) -> OperationError {
    OperationError::Tracker(TrackerError::CommandFailed {
        command: format!("gh {command}"),
        status: "status 1".to_string(),
        stderr: "HTTP 502: Bad Gateway".to_string(),
    })
}

#[derive(Default)]
struct TrackerFailures {
    latest_tag: bool,
    closed_issues: bool,
    milestones: bool,
    ready_listing: bool,
    release_creation: bool,
    close: HashSet<u64>,
}

/// In-memory tracker that records every mutating call.
#[derive(Default)]
pub struct MockIssueTracker {
    latest_tag: Option<String>,
    release_dates: HashMap<String, DateTime<Utc>>,
    closed: Vec<ClosedIssue>,
    ready: HashMap<String, Vec<OpenIssue>>,
    milestones: HashMap<String, Vec<OpenIssue>>,
    failures: TrackerFailures,
    closed_queries: Mutex<Vec<Option<DateTime<Utc>>>>,
    close_attempts: Mutex<Vec<u64>>,
    closed_numbers: Mutex<Vec<u64>>,
    releases: Mutex<Vec<ReleaseRecord>>,
}

impl MockIssueTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_latest_tag(mut self, tag: &str) -> Self {
        self.latest_tag = Some(tag.to_string());
        self
    }

    #[must_use]
    pub fn with_release_date(mut self, tag: &str, created_at: DateTime<Utc>) -> Self {
        self.release_dates.insert(tag.to_string(), created_at);
        self
    }

    #[must_use]
    pub fn with_closed_issues(mut self, issues: Vec<ClosedIssue>) -> Self {
        self.closed.extend(issues);
        self
    }

    #[must_use]
    pub fn with_ready_issue(mut self, label: &str, issue: OpenIssue) -> Self {
        self.ready.entry(label.to_string()).or_default().push(issue);
        self
    }

    #[must_use]
    pub fn with_milestone_issue(mut self, milestone: &str, issue: OpenIssue) -> Self {
        self.milestones
            .entry(milestone.to_string())
            .or_default()
            .push(issue);
        self
    }

    #[must_use]
    pub fn failing_latest_tag(mut self) -> Self {
        self.failures.latest_tag = true;
        self
    }

    #[must_use]
    pub fn failing_closed_issues(mut self) -> Self {
        self.failures.closed_issues = true;
        self
    }

    #[must_use]
    pub fn failing_milestones(mut self) -> Self {
        self.failures.milestones = true;
        self
    }

    #[must_use]
    pub fn failing_ready_listing(mut self) -> Self {
        self.failures.ready_listing = true;
        self
    }

    #[must_use]
    pub fn failing_release_creation(mut self) -> Self {
        self.failures.release_creation = true;
        self
    }

    #[must_use]
    pub fn failing_close(mut self, number: u64) -> Self {
        self.failures.close.insert(number);
        self
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn closed_issue_queries(&self) -> Vec<Option<DateTime<Utc>>> {
        self.closed_queries.lock().expect("lock poisoned").clone()
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn close_attempts(&self) -> Vec<u64> {
        self.close_attempts.lock().expect("lock poisoned").clone()
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn closed_issue_numbers(&self) -> Vec<u64> {
        self.closed_numbers.lock().expect("lock poisoned").clone()
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn created_releases(&self) -> Vec<ReleaseRecord> {
        self.releases.lock().expect("lock poisoned").clone()
    }
}

impl IssueTracker for MockIssueTracker {
    fn latest_release_tag(&self) -> Result<Option<String>> {
        if self.failures.latest_tag {
            return Err(tracker_failure("release list"));
        }
        Ok(self.latest_tag.clone())
    }

    fn release_created_at(&self, tag: &str) -> Result<DateTime<Utc>> {
        self.release_dates
            .get(tag)
            .copied()
            .ok_or_else(|| tracker_failure(&format!("release view {tag}")))
    }

    fn closed_issues(&self, since: Option<DateTime<Utc>>) -> Result<Vec<ClosedIssue>> {
        self.closed_queries
            .lock()
            .expect("lock poisoned")
            .push(since);
        if self.failures.closed_issues {
            return Err(tracker_failure("issue list --state closed"));
        }
        Ok(self.closed.clone())
    }

    fn open_issues_with_label(&self, label: &str) -> Result<Vec<OpenIssue>> {
        if self.failures.ready_listing {
            return Err(tracker_failure("issue list --label"));
        }
        Ok(self.ready.get(label).cloned().unwrap_or_default())
    }

    fn open_issues_in_milestone(&self, milestone: &str) -> Result<Vec<OpenIssue>> {
        if self.failures.milestones {
            return Err(tracker_failure("issue list --search milestone:"));
        }
        Ok(self.milestones.get(milestone).cloned().unwrap_or_default())
    }

    fn close_issue(&self, number: u64) -> Result<()> {
        self.close_attempts
            .lock()
            .expect("lock poisoned")
            .push(number);
        if self.failures.close.contains(&number) {
            return Err(tracker_failure(&format!("issue close {number}")));
        }
        self.closed_numbers
            .lock()
            .expect("lock poisoned")
            .push(number);
        Ok(())
    }

    fn create_release(&self, release: &ReleaseRecord) -> Result<String> {
        if self.failures.release_creation {
            return Err(tracker_failure(&format!("release create {}", release.tag)));
        }
        self.releases
            .lock()
            .expect("lock poisoned")
            .push(release.clone());
        Ok(format!("https://example.test/releases/{}", release.tag))
    }
}

impl IssueTracker for Arc<MockIssueTracker> {
    fn latest_release_tag(&self) -> Result<Option<String>> {
        (**self).latest_release_tag()
    }

    fn release_created_at(&self, tag: &str) -> Result<DateTime<Utc>> {
        (**self).release_created_at(tag)
    }

    fn closed_issues(&self, since: Option<DateTime<Utc>>) -> Result<Vec<ClosedIssue>> {
        (**self).closed_issues(since)
    }

    fn open_issues_with_label(&self, label: &str) -> Result<Vec<OpenIssue>> {
        (**self).open_issues_with_label(label)
    }

    fn open_issues_in_milestone(&self, milestone: &str) -> Result<Vec<OpenIssue>> {
        (**self).open_issues_in_milestone(milestone)
    }

    fn close_issue(&self, number: u64) -> Result<()> {
        (**self).close_issue(number)
    }

    fn create_release(&self, release: &ReleaseRecord) -> Result<String> {
        (**self).create_release(release)
    }
}

pub struct MockChangelogWriter {
    written: Mutex<Vec<(PathBuf, VersionRelease)>>,
    existing_changelogs: HashSet<PathBuf>,
    fail: bool,
}

impl MockChangelogWriter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            written: Mutex::new(Vec::new()),
            existing_changelogs: HashSet::new(),
            fail: false,
        }
    }

    #[must_use]
    pub fn with_existing_changelog(mut self, path: PathBuf) -> Self {
        self.existing_changelogs.insert(path);
        self
    }

    #[must_use]
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn written_releases(&self) -> Vec<(PathBuf, VersionRelease)> {
        self.written.lock().expect("lock poisoned").clone()
    }
}

impl Default for MockChangelogWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangelogWriter for MockChangelogWriter {
    fn write_release(
        &self,
        changelog_path: &Path,
        release: &VersionRelease,
    ) -> Result<ChangelogWriteResult> {
        if self.fail {
            return Err(OperationError::Changelog(ChangelogError::Write {
                path: changelog_path.to_path_buf(),
                source: std::io::Error::other("disk full"),
            }));
        }

        let created = !self.existing_changelogs.contains(changelog_path);

        self.written
            .lock()
            .expect("lock poisoned")
            .push((changelog_path.to_path_buf(), release.clone()));

        Ok(ChangelogWriteResult {
            path: changelog_path.to_path_buf(),
            created,
        })
    }

    fn changelog_exists(&self, path: &Path) -> bool {
        self.existing_changelogs.contains(path)
    }
}

impl ChangelogWriter for Arc<MockChangelogWriter> {
    fn write_release(
        &self,
        changelog_path: &Path,
        release: &VersionRelease,
    ) -> Result<ChangelogWriteResult> {
        (**self).write_release(changelog_path, release)
    }

    fn changelog_exists(&self, path: &Path) -> bool {
        (**self).changelog_exists(path)
    }
}
