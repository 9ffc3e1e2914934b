use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use shiplog_changelog::ChangelogEntry;
use shiplog_core::ClosedIssue;

use crate::error::describe_chain;
use crate::operations::pipeline::{PipelineContext, PipelineWarning};
use crate::traits::IssueTracker;

/// Turns closed issues into changelog entries.
///
/// Tracker failures never abort aggregation: a missing release date widens
/// the query to all closed issues, and a failed issue listing yields no
/// entries. Both are recorded as warnings on the context.
pub struct ChangelogAggregator<'a, T> {
    tracker: &'a T,
    skip_label: &'a str,
}

impl<'a, T: IssueTracker> ChangelogAggregator<'a, T> {
    pub fn new(tracker: &'a T, skip_label: &'a str) -> Self {
        Self {
            tracker,
            skip_label,
        }
    }

    /// Lower bound for the closed-issue query: the creation time of the
    /// current release, if there is one and it can be looked up.
    pub fn since(
        &self,
        current_tag: Option<&str>,
        context: &mut PipelineContext,
    ) -> Option<DateTime<Utc>> {
        let tag = current_tag?;

        match self.tracker.release_created_at(tag) {
            Ok(created_at) => {
                debug!(%tag, %created_at, "bounding changelog by release date");
                Some(created_at)
            }
            Err(e) => {
                let reason = describe_chain(&e);
                warn!(%tag, %reason, "release date unavailable, using all closed issues");
                context.warn(PipelineWarning::ReleaseDateUnavailable {
                    tag: tag.to_string(),
                    reason,
                });
                None
            }
        }
    }

    pub fn aggregate(
        &self,
        since: Option<DateTime<Utc>>,
        context: &mut PipelineContext,
    ) -> Vec<ChangelogEntry> {
        match self.tracker.closed_issues(since) {
            Ok(issues) => {
                let entries = filter_entries(&issues, self.skip_label);
                debug!(
                    candidates = issues.len(),
                    included = entries.len(),
                    "aggregated closed issues"
                );
                entries
            }
            Err(e) => {
                let reason = describe_chain(&e);
                warn!(%reason, "closed issues unavailable, changelog will be empty");
                context.warn(PipelineWarning::ClosedIssuesUnavailable { reason });
                Vec::new()
            }
        }
    }
}

/// Keeps tracker order and drops every issue carrying `skip_label`.
#[must_use]
pub fn filter_entries(issues: &[ClosedIssue], skip_label: &str) -> Vec<ChangelogEntry> {
    issues
        .iter()
        .filter(|issue| !issue.has_label(skip_label))
        .map(ChangelogEntry::from_issue)
        .collect()
}
