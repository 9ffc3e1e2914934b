use chrono::{DateTime, Utc};

use shiplog_config::ReleaseConfig;
use shiplog_core::{ClosedIssue, OpenIssue, ReleaseRecord};
use shiplog_tracker::GhCli;

use crate::Result;
use crate::traits::IssueTracker;

pub struct GhIssueTracker {
    cli: GhCli,
}

impl GhIssueTracker {
    #[must_use]
    pub fn new(cli: GhCli) -> Self {
        Self { cli }
    }

    /// Builds a tracker for the repository named in `config`, or the
    /// repository of the working directory when none is configured.
    #[must_use]
    pub fn from_config(config: &ReleaseConfig, program: Option<&str>) -> Self {
        let mut cli = GhCli::new();
        if let Some(program) = program {
            cli = cli.with_program(program);
        }
        if let Some(repository) = config.repository() {
            cli = cli.with_repository(repository);
        }
        Self { cli }
    }

    #[must_use]
    pub fn cli(&self) -> &GhCli {
        &self.cli
    }
}

impl IssueTracker for GhIssueTracker {
    fn latest_release_tag(&self) -> Result<Option<String>> {
        Ok(self.cli.latest_release_tag()?)
    }

    fn release_created_at(&self, tag: &str) -> Result<DateTime<Utc>> {
        Ok(self.cli.release_created_at(tag)?)
    }

    fn closed_issues(&self, since: Option<DateTime<Utc>>) -> Result<Vec<ClosedIssue>> {
        Ok(self.cli.closed_issues(since)?)
    }

    fn open_issues_with_label(&self, label: &str) -> Result<Vec<OpenIssue>> {
        Ok(self.cli.open_issues_with_label(label)?)
    }

    fn open_issues_in_milestone(&self, milestone: &str) -> Result<Vec<OpenIssue>> {
        Ok(self.cli.open_issues_in_milestone(milestone)?)
    }

    fn close_issue(&self, number: u64) -> Result<()> {
        Ok(self.cli.close_issue(number)?)
    }

    fn create_release(&self, release: &ReleaseRecord) -> Result<String> {
        Ok(self.cli.create_release(release)?)
    }
}
