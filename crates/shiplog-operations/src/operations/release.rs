use std::path::PathBuf;

use chrono::NaiveDate;
use semver::Version;
use tracing::{info, warn};

use shiplog_changelog::{VersionRelease, format_entries, format_version_release};
use shiplog_config::ReleaseConfig;
use shiplog_core::{BumpType, OpenIssue, PrereleaseSpec};

use super::changelog_aggregation::ChangelogAggregator;
use super::issue_closer::{ClosureReport, IssueCloser};
use super::milestone_guard::MilestoneGuard;
use super::pipeline::{PipelineContext, PipelineStage, PipelineWarning};
use super::release_publisher::{PublishedRelease, ReleasePublisher};
use super::version_resolver::{CurrentRelease, VersionResolver};
use crate::Result;
use crate::traits::{ChangelogWriteResult, ChangelogWriter, IssueTracker};

#[derive(Debug, Clone)]
pub struct ReleaseInput {
    pub bump: BumpType,
    pub prerelease: Option<PrereleaseSpec>,
    pub dry_run: bool,
    /// Date stamped on the changelog section.
    pub release_date: NaiveDate,
}

/// What a run would produce, computed before any mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleasePlan {
    pub current: CurrentRelease,
    pub next_version: Version,
    pub tag: String,
    pub release: VersionRelease,
    /// Rendered entries, also used as the release notes.
    pub notes: String,
}

impl ReleasePlan {
    /// The changelog section exactly as it will be written.
    #[must_use]
    pub fn section(&self) -> String {
        format_version_release(&self.release)
    }

    #[must_use]
    pub fn is_prerelease(&self) -> bool {
        shiplog_version::is_prerelease(&self.next_version)
    }
}

#[derive(Debug, Clone)]
pub struct DryRunReport {
    pub plan: ReleasePlan,
    pub changelog_path: PathBuf,
    /// Whether writing would create the changelog rather than update it.
    pub creates_changelog: bool,
    pub stages: Vec<PipelineStage>,
    pub warnings: Vec<PipelineWarning>,
}

#[derive(Debug, Clone)]
pub struct ReleaseReport {
    pub plan: ReleasePlan,
    pub changelog: ChangelogWriteResult,
    pub milestone_conflicts: Vec<OpenIssue>,
    pub release: PublishedRelease,
    pub closure: ClosureReport,
    pub stages: Vec<PipelineStage>,
    pub warnings: Vec<PipelineWarning>,
}

#[derive(Debug)]
pub enum ReleaseOutcome {
    DryRun(DryRunReport),
    Executed(ReleaseReport),
}

/// Runs the release pipeline:
/// resolve version, aggregate changes, then either report (dry run) or
/// write the changelog, check the milestone, publish, and close issues.
///
/// Stages run strictly in that order so a fatal error leaves the effects of
/// earlier stages intact and later stages untouched.
pub struct ReleaseOperation<T, C> {
    tracker: T,
    changelog_writer: C,
    config: ReleaseConfig,
}

impl<T, C> ReleaseOperation<T, C>
where
    T: IssueTracker,
    C: ChangelogWriter,
{
    pub fn new(tracker: T, changelog_writer: C, config: ReleaseConfig) -> Self {
        Self {
            tracker,
            changelog_writer,
            config,
        }
    }

    #[must_use]
    pub fn tracker(&self) -> &T {
        &self.tracker
    }

    /// # Errors
    ///
    /// Returns an error if the current release cannot be resolved, the next
    /// version cannot be computed, the changelog cannot be written, or the
    /// release cannot be created. Closed-issue lookups, the milestone check
    /// and issue closure only produce warnings.
    pub fn execute(&self, input: &ReleaseInput) -> Result<ReleaseOutcome> {
        self.execute_in(input, &mut PipelineContext::new())
    }

    /// Runs the pipeline recording into `context`, so stages and warnings
    /// remain available when the run fails. A failed run ends in
    /// `PipelineStage::Failed`.
    ///
    /// # Errors
    ///
    /// Same as [`ReleaseOperation::execute`].
    pub fn execute_in(
        &self,
        input: &ReleaseInput,
        context: &mut PipelineContext,
    ) -> Result<ReleaseOutcome> {
        let result = self.run(input, context);
        if let Err(err) = &result {
            warn!(stage = ?context.current_stage(), error = %err, "release pipeline failed");
            context.enter(PipelineStage::Failed);
        }
        result
    }

    fn run(&self, input: &ReleaseInput, context: &mut PipelineContext) -> Result<ReleaseOutcome> {
        let plan = self.plan(input, context)?;

        if input.dry_run {
            context.enter(PipelineStage::DryRunReport);
            context.enter(PipelineStage::Done);
            let changelog_path = self.config.changelog_path().to_path_buf();
            return Ok(ReleaseOutcome::DryRun(DryRunReport {
                plan,
                creates_changelog: !self.changelog_writer.changelog_exists(&changelog_path),
                changelog_path,
                stages: context.stages().to_vec(),
                warnings: context.warnings().to_vec(),
            }));
        }

        context.enter(PipelineStage::WritingChangelog);
        let changelog = self
            .changelog_writer
            .write_release(self.config.changelog_path(), &plan.release)?;
        info!(
            path = %changelog.path.display(),
            created = changelog.created,
            "changelog updated"
        );

        context.enter(PipelineStage::GuardingMilestone);
        let milestone_conflicts = MilestoneGuard::new(&self.tracker).check(&plan.tag, context);

        context.enter(PipelineStage::Publishing);
        let release = ReleasePublisher::new(&self.tracker, self.config.draft()).publish(
            &plan.tag,
            &self.config.release_title(&plan.tag),
            &plan.notes,
            plan.is_prerelease(),
        )?;

        context.enter(PipelineStage::ClosingIssues);
        let closure =
            IssueCloser::new(&self.tracker).close_all_tagged(self.config.ready_label(), context);
        if !closure.is_clean() {
            warn!(failed = ?closure.failed_numbers(), "some ready issues were not closed");
        }

        context.enter(PipelineStage::Done);

        Ok(ReleaseOutcome::Executed(ReleaseReport {
            plan,
            changelog,
            milestone_conflicts,
            release,
            closure,
            stages: context.stages().to_vec(),
            warnings: context.warnings().to_vec(),
        }))
    }

    fn plan(&self, input: &ReleaseInput, context: &mut PipelineContext) -> Result<ReleasePlan> {
        context.enter(PipelineStage::ResolvingVersion);
        let current = VersionResolver::new(&self.tracker).resolve_current()?;
        let next_version = VersionResolver::<T>::compute_next(
            &current.version,
            input.bump,
            input.prerelease.as_ref(),
        )?;
        let tag = shiplog_version::format_tag(&next_version);
        info!(current = %current.version, next = %next_version, bump = %input.bump, "computed next version");

        context.enter(PipelineStage::AggregatingChanges);
        let aggregator = ChangelogAggregator::new(&self.tracker, self.config.skip_label());
        let since = aggregator.since(current.tag.as_deref(), context);
        let entries = aggregator.aggregate(since, context);

        let notes = format_entries(&entries);
        let release = VersionRelease::new(tag.clone(), input.release_date, entries);

        Ok(ReleasePlan {
            current,
            next_version,
            tag,
            release,
            notes,
        })
    }
}
