use tracing::{info, warn};

use crate::error::describe_chain;
use crate::operations::pipeline::{PipelineContext, PipelineWarning};
use crate::traits::IssueTracker;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClosureFailure {
    pub number: u64,
    pub reason: String,
}

/// Outcome of closing every issue carrying the ready label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClosureReport {
    pub closed: Vec<u64>,
    pub failed: Vec<ClosureFailure>,
}

impl ClosureReport {
    #[must_use]
    pub fn failed_numbers(&self) -> Vec<u64> {
        self.failed.iter().map(|f| f.number).collect()
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

pub struct IssueCloser<'a, T> {
    tracker: &'a T,
}

impl<'a, T: IssueTracker> IssueCloser<'a, T> {
    pub fn new(tracker: &'a T) -> Self {
        Self { tracker }
    }

    /// Closes each open issue labelled `label`, one at a time.
    ///
    /// Never fails. A failed closure is recorded and the next issue is still
    /// attempted; a failed listing yields an empty report and a warning.
    pub fn close_all_tagged(&self, label: &str, context: &mut PipelineContext) -> ClosureReport {
        let issues = match self.tracker.open_issues_with_label(label) {
            Ok(issues) => issues,
            Err(e) => {
                let reason = describe_chain(&e);
                warn!(%label, %reason, "could not list issues ready for release");
                context.warn(PipelineWarning::ReadyIssuesUnavailable {
                    label: label.to_string(),
                    reason,
                });
                return ClosureReport::default();
            }
        };

        issues
            .iter()
            .fold(ClosureReport::default(), |mut report, issue| {
                match self.tracker.close_issue(issue.number) {
                    Ok(()) => {
                        info!(number = issue.number, "closed issue");
                        report.closed.push(issue.number);
                    }
                    Err(e) => {
                        let reason = describe_chain(&e);
                        warn!(number = issue.number, %reason, "failed to close issue");
                        report.failed.push(ClosureFailure {
                            number: issue.number,
                            reason,
                        });
                    }
                }
                report
            })
    }
}
