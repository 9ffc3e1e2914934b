use std::fmt;

use tracing::debug;

/// Stages of one pipeline run, in execution order.
///
/// `Done` and `Failed` are terminal. A fatal error appends `Failed` after the
/// stage that raised it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    ResolvingVersion,
    AggregatingChanges,
    DryRunReport,
    WritingChangelog,
    GuardingMilestone,
    Publishing,
    ClosingIssues,
    Done,
    Failed,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::ResolvingVersion => "resolving version",
            Self::AggregatingChanges => "aggregating changes",
            Self::DryRunReport => "dry-run report",
            Self::WritingChangelog => "writing changelog",
            Self::GuardingMilestone => "guarding milestone",
            Self::Publishing => "publishing",
            Self::ClosingIssues => "closing issues",
            Self::Done => "done",
            Self::Failed => "failed",
        };
        write!(f, "{s}")
    }
}

/// A recoverable condition the run continued past.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineWarning {
    ReleaseDateUnavailable { tag: String, reason: String },
    ClosedIssuesUnavailable { reason: String },
    MilestoneCheckFailed { milestone: String, reason: String },
    ReadyIssuesUnavailable { label: String, reason: String },
}

impl fmt::Display for PipelineWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReleaseDateUnavailable { tag, reason } => write!(
                f,
                "could not determine when '{tag}' was released, considering all closed issues ({reason})"
            ),
            Self::ClosedIssuesUnavailable { reason } => write!(
                f,
                "could not list closed issues, changelog will be empty ({reason})"
            ),
            Self::MilestoneCheckFailed { milestone, reason } => write!(
                f,
                "could not check open issues in milestone '{milestone}' ({reason})"
            ),
            Self::ReadyIssuesUnavailable { label, reason } => write!(
                f,
                "could not list open issues labelled '{label}', none were closed ({reason})"
            ),
        }
    }
}

/// State threaded through the stages of one run.
#[derive(Debug, Default)]
pub struct PipelineContext {
    stages: Vec<PipelineStage>,
    warnings: Vec<PipelineWarning>,
}

impl PipelineContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enter(&mut self, stage: PipelineStage) {
        debug!(%stage, "entering pipeline stage");
        self.stages.push(stage);
    }

    pub fn warn(&mut self, warning: PipelineWarning) {
        self.warnings.push(warning);
    }

    #[must_use]
    pub fn current_stage(&self) -> Option<PipelineStage> {
        self.stages.last().copied()
    }

    #[must_use]
    pub fn stages(&self) -> &[PipelineStage] {
        &self.stages
    }

    #[must_use]
    pub fn warnings(&self) -> &[PipelineWarning] {
        &self.warnings
    }
}
