#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use tempfile::TempDir;

const CLOSED_ISSUES: &str = r#"[{"number":42,"title":"Fix crash","url":"https://x/42","labels":[]},{"number":43,"title":"Bump CI image","url":"https://x/43","labels":[{"name":"skip-changelog"}]}]"#;
const READY_ISSUES: &str = r#"[{"number":42,"title":"Fix crash"},{"number":50,"title":"Flaky"}]"#;
const MILESTONE_REPLY: &str = r#"echo '[{"number":60,"title":"Unfinished"}]'"#;

/// A stand-in for `gh` that logs its arguments and answers from fixed JSON.
struct FakeGh {
    dir: TempDir,
}

impl FakeGh {
    fn new(latest_releases: &str, release_create: &str) -> Self {
        Self::with_milestone(latest_releases, release_create, MILESTONE_REPLY)
    }

    /// `gh` answers a search for an unknown milestone with an empty list and
    /// rejects `--milestone` with an unknown title.
    fn with_milestone(
        latest_releases: &str,
        release_create: &str,
        milestone_reply: &str,
    ) -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let log = dir.path().join("calls.log");
        let script = format!(
            r#"#!/bin/sh
echo "$*" >> '{log}'
case "$1 $2" in
  "release list") echo '{latest_releases}' ;;
  "release view") echo '{{"createdAt":"2025-01-15T10:30:00Z"}}' ;;
  "release create") {release_create} ;;
  "issue list")
    case "$*" in
      *"--state closed"*) echo '{CLOSED_ISSUES}' ;;
      *--milestone*) echo "no milestone found with title" >&2; exit 1 ;;
      *milestone:*) {milestone_reply} ;;
      *) echo '{READY_ISSUES}' ;;
    esac ;;
  "issue close")
    if [ "$3" = "50" ]; then echo "issue is locked" >&2; exit 1; fi ;;
  *) echo "unexpected: $*" >&2; exit 1 ;;
esac
"#,
            log = log.display(),
        );

        let path = dir.path().join("gh");
        fs::write(&path, script).expect("write fake gh");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).expect("make executable");

        Self { dir }
    }

    fn published() -> Self {
        Self::new(
            r#"[{"tagName":"v1.2.3"}]"#,
            r#"echo "https://github.com/acme/widgets/releases/tag/$3""#,
        )
    }

    fn unreleased() -> Self {
        Self::new(
            "[]",
            r#"echo "https://github.com/acme/widgets/releases/tag/$3""#,
        )
    }

    fn program(&self) -> PathBuf {
        self.dir.path().join("gh")
    }

    fn calls(&self) -> String {
        fs::read_to_string(self.dir.path().join("calls.log")).unwrap_or_default()
    }
}

macro_rules! shiplog {
    () => {
        assert_cmd::cargo::cargo_bin_cmd!("shiplog")
    };
}

fn shiplog_in(project: &Path, gh: &FakeGh) -> assert_cmd::Command {
    let mut cmd = shiplog!();
    cmd.env("SHIPLOG_GH", gh.program())
        .env_remove("ENABLE_LOGGING")
        .arg("-C")
        .arg(project);
    cmd
}

#[test]
fn help_exits_successfully() {
    shiplog!()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("--dry-run"))
        .stdout(contains("--alpha <TAG>"));
}

#[test]
fn version_exits_successfully() {
    shiplog!()
        .arg("-V")
        .assert()
        .success()
        .stdout(contains("shiplog"));
}

#[test]
fn unknown_flag_prints_usage_and_exits_one() {
    shiplog!()
        .arg("--frobnicate")
        .assert()
        .code(1)
        .stderr(contains("Usage:"));
}

#[test]
fn conflicting_bumps_exit_one() {
    shiplog!().args(["-M", "-m"]).assert().code(1);
}

#[test]
fn missing_prerelease_value_exits_one() {
    shiplog!().arg("--beta").assert().code(1);
}

#[test]
fn invalid_prerelease_tag_fails_before_any_tracker_call() {
    let project = TempDir::new().expect("create temp dir");
    let gh = FakeGh::published();

    shiplog_in(project.path(), &gh)
        .args(["-a", "01"])
        .assert()
        .code(1)
        .stderr(contains("error: invalid pre-release tag"))
        .stderr(contains("caused by:"));

    assert!(gh.calls().is_empty());
}

#[test]
fn dry_run_prints_plan_without_side_effects() {
    let project = TempDir::new().expect("create temp dir");
    let gh = FakeGh::published();

    shiplog_in(project.path(), &gh)
        .args(["--minor", "--dry-run"])
        .assert()
        .success()
        .stdout(contains("Dry run - no changes will be made."))
        .stdout(contains("Current version: v1.2.3"))
        .stdout(contains("Next version: v1.3.0"))
        .stdout(contains("## v1.3.0 ("))
        .stdout(contains("- Fix crash (#42) [Link](https://x/42)"))
        .stdout(contains("Bump CI image").not());

    assert!(!project.path().join("CHANGELOG.md").exists());
    let calls = gh.calls();
    assert!(calls.contains("--search closed:>=2025-01-15T10:30:00Z"));
    assert!(!calls.contains("release create"));
    assert!(!calls.contains("issue close"));
}

#[test]
fn first_release_writes_changelog_publishes_draft_and_closes_issues() {
    let project = TempDir::new().expect("create temp dir");
    let gh = FakeGh::unreleased();

    shiplog_in(project.path(), &gh)
        .assert()
        .success()
        .stdout(contains("Current version: v0.0.0 (no previous release)"))
        .stdout(contains("Next version: v0.0.1"))
        .stdout(contains("Created changelog:"))
        .stdout(contains(
            "Created release v0.0.1 (draft): https://github.com/acme/widgets/releases/tag/v0.0.1",
        ))
        .stdout(contains("Closed 1 issue(s)"))
        .stdout(contains("Release complete."))
        .stderr(contains("warning: failed to close #50"))
        .stderr(contains("warning: #60 (Unfinished) is still open in milestone v0.0.1"));

    let changelog =
        fs::read_to_string(project.path().join("CHANGELOG.md")).expect("changelog written");
    assert!(changelog.starts_with("# Changelog\n\n## v0.0.1 ("));
    assert!(changelog.ends_with(")\n- Fix crash (#42) [Link](https://x/42)\n"));

    let calls = gh.calls();
    assert!(calls.contains("release create v0.0.1 --title Release v0.0.1"));
    assert!(calls.contains("--draft"));
    assert!(!calls.contains("--prerelease"));
    assert!(!calls.contains("release view"));
}

#[test]
fn release_without_matching_milestone_prints_no_warning() {
    let project = TempDir::new().expect("create temp dir");
    let gh = FakeGh::with_milestone(
        r#"[{"tagName":"v1.2.3"}]"#,
        r#"echo "https://github.com/acme/widgets/releases/tag/$3""#,
        "echo '[]'",
    );

    shiplog_in(project.path(), &gh)
        .assert()
        .success()
        .stdout(contains("Release complete."))
        .stderr(contains("milestone").not());

    assert!(gh.calls().contains(r#"--search milestone:"v1.2.4""#));
}

#[test]
fn config_file_controls_labels_and_repository() {
    let project = TempDir::new().expect("create temp dir");
    fs::write(
        project.path().join("release.toml"),
        "[release]\nchangelog = \"HISTORY.md\"\nready-label = \"shipit\"\ndraft = false\nrepository = \"acme/widgets\"\n",
    )
    .expect("write config");
    let gh = FakeGh::published();

    shiplog_in(project.path(), &gh)
        .args(["-M", "-b", "1"])
        .assert()
        .success()
        .stdout(contains("Created release v2.0.0-beta.1 (pre-release)"));

    assert!(project.path().join("HISTORY.md").exists());
    let calls = gh.calls();
    assert!(calls.contains("--label shipit"));
    assert!(calls.contains("--repo acme/widgets"));
    assert!(calls.contains("--prerelease"));
    assert!(!calls.contains("--draft"));
}

#[test]
fn rejected_release_exits_one_and_skips_issue_closure() {
    let project = TempDir::new().expect("create temp dir");
    let gh = FakeGh::new(
        r#"[{"tagName":"v1.2.3"}]"#,
        r#"echo "a release with the same tag name already exists" >&2; exit 1"#,
    );

    shiplog_in(project.path(), &gh)
        .assert()
        .code(1)
        .stderr(contains("error: release failed"))
        .stderr(contains("caused by: failed to create release 'v1.2.4'"))
        .stderr(contains("already exists"));

    assert!(project.path().join("CHANGELOG.md").exists());
    assert!(!gh.calls().contains("issue close"));
}

#[test]
fn warnings_are_printed_before_a_fatal_error() {
    let project = TempDir::new().expect("create temp dir");
    let gh = FakeGh::with_milestone(
        r#"[{"tagName":"v1.2.3"}]"#,
        r#"echo "a release with the same tag name already exists" >&2; exit 1"#,
        r#"echo "HTTP 502: Bad Gateway" >&2; exit 1"#,
    );

    let output = shiplog_in(project.path(), &gh)
        .assert()
        .code(1)
        .get_output()
        .clone();
    let stderr = String::from_utf8_lossy(&output.stderr);

    let warning = stderr
        .find("warning: could not check open issues in milestone 'v1.2.4'")
        .expect("milestone warning printed");
    let error = stderr.find("error: release failed").expect("error printed");
    assert!(warning < error, "{stderr}");
}

#[test]
fn malformed_latest_tag_exits_one_without_writing() {
    let project = TempDir::new().expect("create temp dir");
    let gh = FakeGh::new(
        r#"[{"tagName":"nightly"}]"#,
        r#"echo "https://github.com/acme/widgets/releases/tag/$3""#,
    );

    shiplog_in(project.path(), &gh)
        .assert()
        .code(1)
        .stderr(contains("caused by: current release tag 'nightly' is not a usable version"));

    assert!(!project.path().join("CHANGELOG.md").exists());
    assert!(!gh.calls().contains("release create"));
}
