use semver::Version;
use tracing::{debug, info};

use shiplog_core::{BumpType, PrereleaseSpec};

use crate::Result;
use crate::error::OperationError;
use crate::traits::IssueTracker;

/// The release the next version is computed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentRelease {
    /// Tag as published on the tracker; `None` before the first release.
    pub tag: Option<String>,
    pub version: Version,
}

pub struct VersionResolver<'a, T> {
    tracker: &'a T,
}

impl<'a, T: IssueTracker> VersionResolver<'a, T> {
    pub fn new(tracker: &'a T) -> Self {
        Self { tracker }
    }

    /// # Errors
    ///
    /// Returns `OperationError::LatestReleaseLookup` if the tracker cannot be
    /// queried and `OperationError::Configuration` if the latest tag is not a
    /// semantic version.
    pub fn resolve_current(&self) -> Result<CurrentRelease> {
        let tag = self
            .tracker
            .latest_release_tag()
            .map_err(|e| OperationError::LatestReleaseLookup(Box::new(e)))?;

        let version = shiplog_version::resolve_current(tag.as_deref()).map_err(|source| {
            OperationError::Configuration {
                tag: tag.clone().unwrap_or_default(),
                source,
            }
        })?;

        match &tag {
            Some(tag) => debug!(%tag, %version, "resolved current release"),
            None => info!("no previous release found, starting from {version}"),
        }

        Ok(CurrentRelease { tag, version })
    }

    /// # Errors
    ///
    /// Returns `OperationError::NextVersion` if the bump overflows.
    pub fn compute_next(
        current: &Version,
        bump_type: BumpType,
        prerelease: Option<&PrereleaseSpec>,
    ) -> Result<Version> {
        shiplog_version::compute_next(current, bump_type, prerelease).map_err(|source| {
            OperationError::NextVersion {
                current: current.clone(),
                source,
            }
        })
    }
}
