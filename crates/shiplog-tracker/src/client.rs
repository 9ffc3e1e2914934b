use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::de::DeserializeOwned;
use tracing::debug;

use shiplog_core::{ClosedIssue, OpenIssue, ReleaseRecord};

use crate::Result;
use crate::error::{TrackerError, describe_status};
use crate::wire::{IssueItem, ReleaseListItem, ReleaseView};

pub const DEFAULT_PROGRAM: &str = "gh";

/// Upper bound passed to `gh issue list --limit`.
pub const ISSUE_LIST_LIMIT: u32 = 1000;

/// Issue and release access through the GitHub CLI.
///
/// Each method runs exactly one `gh` process and waits for it. Nothing is
/// retried.
#[derive(Debug, Clone)]
pub struct GhCli {
    program: PathBuf,
    repository: Option<String>,
}

impl Default for GhCli {
    fn default() -> Self {
        Self::new()
    }
}

impl GhCli {
    #[must_use]
    pub fn new() -> Self {
        Self {
            program: PathBuf::from(DEFAULT_PROGRAM),
            repository: None,
        }
    }

    #[must_use]
    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    /// Targets `owner/name` instead of the repository of the working directory.
    #[must_use]
    pub fn with_repository(mut self, repository: impl Into<String>) -> Self {
        self.repository = Some(repository.into());
        self
    }

    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }

    #[must_use]
    pub fn repository(&self) -> Option<&str> {
        self.repository.as_deref()
    }

    /// Tag of the newest non-draft release, or `None` if nothing was released yet.
    ///
    /// # Errors
    ///
    /// Returns an error if `gh` fails or its output cannot be decoded.
    pub fn latest_release_tag(&self) -> Result<Option<String>> {
        let items: Vec<ReleaseListItem> = self.run_json(&latest_release_args())?;
        Ok(items.into_iter().next().map(|item| item.tag_name))
    }

    /// # Errors
    ///
    /// Returns an error if the release does not exist, `gh` fails, or the
    /// timestamp is not RFC 3339.
    pub fn release_created_at(&self, tag: &str) -> Result<DateTime<Utc>> {
        let view: ReleaseView = self.run_json(&release_view_args(tag))?;
        DateTime::parse_from_rfc3339(&view.created_at)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|source| TrackerError::InvalidTimestamp {
                tag: tag.to_string(),
                value: view.created_at,
                source,
            })
    }

    /// # Errors
    ///
    /// Returns an error if `gh` fails or its output cannot be decoded.
    pub fn closed_issues(&self, since: Option<DateTime<Utc>>) -> Result<Vec<ClosedIssue>> {
        let items: Vec<IssueItem> = self.run_json(&closed_issue_args(since))?;
        Ok(items.into_iter().map(ClosedIssue::from).collect())
    }

    /// # Errors
    ///
    /// Returns an error if `gh` fails or its output cannot be decoded.
    pub fn open_issues_with_label(&self, label: &str) -> Result<Vec<OpenIssue>> {
        let items: Vec<IssueItem> = self.run_json(&open_issue_args("--label", label))?;
        Ok(items.into_iter().map(OpenIssue::from).collect())
    }

    /// Open issues assigned to the milestone titled `milestone`.
    ///
    /// Goes through the search qualifier rather than `--milestone`, so a
    /// milestone that does not exist yields an empty list instead of an error.
    ///
    /// # Errors
    ///
    /// Returns an error if `gh` fails or its output cannot be decoded.
    pub fn open_issues_in_milestone(&self, milestone: &str) -> Result<Vec<OpenIssue>> {
        let items: Vec<IssueItem> =
            self.run_json(&open_issue_args("--search", &milestone_query(milestone)))?;
        Ok(items.into_iter().map(OpenIssue::from).collect())
    }

    /// # Errors
    ///
    /// Returns an error if `gh` exits unsuccessfully.
    pub fn close_issue(&self, number: u64) -> Result<()> {
        self.run(&["issue".into(), "close".into(), number.to_string().into()])?;
        Ok(())
    }

    /// Creates the release and returns the URL printed by `gh`.
    ///
    /// # Errors
    ///
    /// Returns an error if `gh` exits unsuccessfully or prints no URL.
    pub fn create_release(&self, release: &ReleaseRecord) -> Result<String> {
        let args = create_release_args(release);
        let stdout = self.run(&args)?;

        stdout
            .lines()
            .map(str::trim)
            .rfind(|line| !line.is_empty())
            .map(ToString::to_string)
            .ok_or_else(|| TrackerError::MissingReleaseUrl {
                command: self.describe(&args),
            })
    }

    fn run_json<T: DeserializeOwned>(&self, args: &[OsString]) -> Result<T> {
        let stdout = self.run(args)?;
        serde_json::from_str(&stdout).map_err(|source| TrackerError::Decode {
            command: self.describe(args),
            source,
        })
    }

    fn run(&self, args: &[OsString]) -> Result<String> {
        let mut command = Command::new(&self.program);
        command.args(args);
        if let Some(repository) = &self.repository {
            command.arg("--repo").arg(repository);
        }

        let description = self.describe(args);
        debug!(command = %description, "running tracker command");

        let output = command.output().map_err(|source| TrackerError::Spawn {
            program: self.program.clone(),
            source,
        })?;

        if !output.status.success() {
            return Err(TrackerError::CommandFailed {
                command: description,
                status: describe_status(output.status.code()),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        String::from_utf8(output.stdout).map_err(|_| TrackerError::NonUtf8Output {
            command: description,
        })
    }

    fn describe(&self, args: &[OsString]) -> String {
        let mut parts = vec![self.program.to_string_lossy().into_owned()];
        parts.extend(args.iter().map(|a| a.to_string_lossy().into_owned()));
        parts.join(" ")
    }
}

fn latest_release_args() -> Vec<OsString> {
    ["release", "list", "--limit", "1", "--exclude-drafts", "--json", "tagName"]
        .map(OsString::from)
        .to_vec()
}

fn release_view_args(tag: &str) -> Vec<OsString> {
    ["release", "view", tag, "--json", "createdAt"]
        .map(OsString::from)
        .to_vec()
}

fn closed_issue_args(since: Option<DateTime<Utc>>) -> Vec<OsString> {
    let mut args: Vec<OsString> = [
        "issue",
        "list",
        "--state",
        "closed",
        "--limit",
        ISSUE_LIST_LIMIT.to_string().as_str(),
        "--json",
        "number,title,url,labels",
    ]
    .map(OsString::from)
    .to_vec();

    if let Some(since) = since {
        args.push("--search".into());
        args.push(format!("closed:>={}", since.to_rfc3339_opts(SecondsFormat::Secs, true)).into());
    }

    args
}

fn milestone_query(milestone: &str) -> String {
    format!("milestone:\"{}\"", milestone.replace('"', ""))
}

fn open_issue_args(filter_flag: &str, value: &str) -> Vec<OsString> {
    [
        "issue",
        "list",
        "--state",
        "open",
        filter_flag,
        value,
        "--limit",
        ISSUE_LIST_LIMIT.to_string().as_str(),
        "--json",
        "number,title",
    ]
    .map(OsString::from)
    .to_vec()
}

fn create_release_args(release: &ReleaseRecord) -> Vec<OsString> {
    let mut args: Vec<OsString> = [
        "release",
        "create",
        release.tag.as_str(),
        "--title",
        release.title.as_str(),
        "--notes",
        release.notes.as_str(),
    ]
    .map(OsString::from)
    .to_vec();

    if release.draft {
        args.push("--draft".into());
    }
    if release.prerelease {
        args.push("--prerelease".into());
    }

    args
}
