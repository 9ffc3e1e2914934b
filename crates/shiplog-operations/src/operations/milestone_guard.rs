use tracing::warn;

use shiplog_core::OpenIssue;

use crate::error::describe_chain;
use crate::operations::pipeline::{PipelineContext, PipelineWarning};
use crate::traits::IssueTracker;

/// Reports open issues still assigned to the milestone named after the
/// release. Informational only; it never stops a release.
pub struct MilestoneGuard<'a, T> {
    tracker: &'a T,
}

impl<'a, T: IssueTracker> MilestoneGuard<'a, T> {
    pub fn new(tracker: &'a T) -> Self {
        Self { tracker }
    }

    pub fn check(&self, milestone: &str, context: &mut PipelineContext) -> Vec<OpenIssue> {
        match self.tracker.open_issues_in_milestone(milestone) {
            Ok(issues) => {
                for issue in &issues {
                    warn!(
                        %milestone,
                        number = issue.number,
                        title = %issue.title,
                        "issue still open in release milestone"
                    );
                }
                issues
            }
            Err(e) => {
                let reason = describe_chain(&e);
                warn!(%milestone, %reason, "milestone check failed");
                context.warn(PipelineWarning::MilestoneCheckFailed {
                    milestone: milestone.to_string(),
                    reason,
                });
                Vec::new()
            }
        }
    }
}
