mod changelog_aggregation;
mod issue_closer;
mod milestone_guard;
mod pipeline;
mod release;
mod release_publisher;
mod version_resolver;

pub use changelog_aggregation::{ChangelogAggregator, filter_entries};
pub use issue_closer::{ClosureFailure, ClosureReport, IssueCloser};
pub use milestone_guard::MilestoneGuard;
pub use pipeline::{PipelineContext, PipelineStage, PipelineWarning};
pub use release::{
    DryRunReport, ReleaseInput, ReleaseOperation, ReleaseOutcome, ReleasePlan, ReleaseReport,
};
pub use release_publisher::{PublishedRelease, ReleasePublisher};
pub use version_resolver::{CurrentRelease, VersionResolver};
