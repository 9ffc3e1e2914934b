mod error;
mod tag;

pub use error::VersionError;
pub use tag::{format_tag, parse_tag};

use semver::{BuildMetadata, Prerelease, Version};
use shiplog_core::{BumpType, PrereleaseSpec};

pub type Result<T> = std::result::Result<T, VersionError>;

/// Version assumed when the tracker has no published release yet.
#[must_use]
pub fn initial_version() -> Version {
    Version::new(0, 0, 0)
}

/// Turns the latest published tag into the current version.
///
/// A missing tag is the normal first-release case and yields `0.0.0`.
///
/// # Errors
///
/// Returns `VersionError::MalformedTag` if the tag is present but not a
/// `MAJOR.MINOR.PATCH(-suffix)?` version.
pub fn resolve_current(latest_tag: Option<&str>) -> Result<Version> {
    latest_tag.map_or_else(|| Ok(initial_version()), parse_tag)
}

/// # Errors
///
/// Returns `VersionError::Overflow` if the bumped component is already
/// `u64::MAX`.
pub fn bump_version(version: &Version, bump_type: BumpType) -> Result<Version> {
    let overflow = || VersionError::Overflow {
        version: version.clone(),
        bump: bump_type,
    };

    let mut new_version = version.clone();
    new_version.pre = Prerelease::EMPTY;
    new_version.build = BuildMetadata::EMPTY;

    match bump_type {
        BumpType::Major => {
            new_version.major = version.major.checked_add(1).ok_or_else(overflow)?;
            new_version.minor = 0;
            new_version.patch = 0;
        }
        BumpType::Minor => {
            new_version.minor = version.minor.checked_add(1).ok_or_else(overflow)?;
            new_version.patch = 0;
        }
        BumpType::Patch => {
            new_version.patch = version.patch.checked_add(1).ok_or_else(overflow)?;
        }
    }

    Ok(new_version)
}

/// Computes the next release version. The pre-release suffix is attached
/// after the bump and never feeds into the arithmetic.
///
/// # Errors
///
/// Returns `VersionError::Overflow` if the bump cannot be applied.
pub fn compute_next(
    current: &Version,
    bump_type: BumpType,
    prerelease: Option<&PrereleaseSpec>,
) -> Result<Version> {
    let mut next = bump_version(current, bump_type)?;
    if let Some(spec) = prerelease {
        next.pre = spec.identifier().clone();
    }
    Ok(next)
}

#[must_use]
pub fn is_prerelease(version: &Version) -> bool {
    !version.pre.is_empty()
}
