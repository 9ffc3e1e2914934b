use std::path::Path;

use chrono::Local;
use shiplog_config::load_config;
use shiplog_core::{BumpType, PrereleaseKind, PrereleaseSpec};
use shiplog_operations::operations::{
    DryRunReport, PipelineContext, PipelineWarning, ReleaseInput, ReleaseOperation,
    ReleaseOutcome, ReleasePlan, ReleaseReport,
};
use shiplog_operations::providers::{FileSystemChangelogWriter, GhIssueTracker};
use tracing::debug;

use crate::Cli;
use crate::error::{CliError, Result};

/// Overrides the `gh` executable, mainly for tests.
const GH_PROGRAM_ENV: &str = "SHIPLOG_GH";

pub(crate) fn run(cli: &Cli, start_path: &Path) -> Result<()> {
    let input = ReleaseInput {
        bump: bump_type(cli),
        prerelease: prerelease(cli)?,
        dry_run: cli.dry_run,
        release_date: Local::now().date_naive(),
    };

    let config = load_config(start_path)?;
    if let Some(source) = config.source() {
        debug!(path = %source.display(), "loaded configuration");
    }

    let program = std::env::var(GH_PROGRAM_ENV).ok();
    let tracker = GhIssueTracker::from_config(&config, program.as_deref());
    let operation = ReleaseOperation::new(tracker, FileSystemChangelogWriter::new(), config);

    let mut context = PipelineContext::new();
    match operation.execute_in(&input, &mut context) {
        Ok(outcome) => {
            print_outcome(&outcome);
            Ok(())
        }
        Err(err) => {
            print_warnings(context.warnings());
            Err(err.into())
        }
    }
}

fn bump_type(cli: &Cli) -> BumpType {
    if cli.major {
        BumpType::Major
    } else if cli.minor {
        BumpType::Minor
    } else {
        BumpType::Patch
    }
}

fn prerelease(cli: &Cli) -> Result<Option<PrereleaseSpec>> {
    let requested = match (&cli.alpha, &cli.beta) {
        (Some(tag), _) => Some((PrereleaseKind::Alpha, tag)),
        (None, Some(tag)) => Some((PrereleaseKind::Beta, tag)),
        (None, None) => None,
    };

    requested
        .map(|(kind, tag)| PrereleaseSpec::new(kind, tag))
        .transpose()
        .map_err(CliError::from)
}

fn print_outcome(outcome: &ReleaseOutcome) {
    match outcome {
        ReleaseOutcome::DryRun(report) => print_dry_run(report),
        ReleaseOutcome::Executed(report) => print_release(report),
    }
}

fn print_dry_run(report: &DryRunReport) {
    println!("Dry run - no changes will be made.\n");
    print_versions(&report.plan);

    let action = if report.creates_changelog {
        "would be created"
    } else {
        "would be updated"
    };
    println!("Changelog: {} ({action})\n", report.changelog_path.display());
    print!("{}", report.plan.section());

    print_warnings(&report.warnings);
}

fn print_release(report: &ReleaseReport) {
    print_versions(&report.plan);

    let action = if report.changelog.created {
        "Created"
    } else {
        "Updated"
    };
    println!("{action} changelog: {}", report.changelog.path.display());

    for issue in &report.milestone_conflicts {
        eprintln!(
            "warning: #{} ({}) is still open in milestone {}",
            issue.number, issue.title, report.plan.tag
        );
    }

    let kind = match (report.release.record.draft, report.release.record.prerelease) {
        (true, true) => " (draft, pre-release)",
        (true, false) => " (draft)",
        (false, true) => " (pre-release)",
        (false, false) => "",
    };
    println!("Created release {}{kind}: {}", report.plan.tag, report.release.url);

    println!("Closed {} issue(s)", report.closure.closed.len());
    for failure in &report.closure.failed {
        eprintln!("warning: failed to close #{}: {}", failure.number, failure.reason);
    }

    print_warnings(&report.warnings);
    println!("\nRelease complete.");
}

fn print_versions(plan: &ReleasePlan) {
    match &plan.current.tag {
        Some(tag) => println!("Current version: {tag}"),
        None => println!(
            "Current version: {} (no previous release)",
            shiplog_version::format_tag(&plan.current.version)
        ),
    }
    println!("Next version: {}", plan.tag);
}

fn print_warnings(warnings: &[PipelineWarning]) {
    for warning in warnings {
        eprintln!("warning: {warning}");
    }
}
