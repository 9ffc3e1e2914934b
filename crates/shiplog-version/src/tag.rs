use semver::{Prerelease, Version};

use crate::Result;
use crate::error::VersionError;

/// Parses a release tag of the form `[v]MAJOR.MINOR.PATCH[-suffix]`.
///
/// Any non-empty suffix is accepted. It is kept as the pre-release when it is a
/// valid semver pre-release and dropped otherwise, since bumping discards it.
///
/// # Errors
///
/// Returns `VersionError::MalformedTag` when the numeric core does not have
/// exactly three non-negative integer components or the suffix is empty.
pub fn parse_tag(tag: &str) -> Result<Version> {
    let malformed = |reason| VersionError::MalformedTag {
        tag: tag.to_string(),
        reason,
    };

    let trimmed = tag.trim();
    let unprefixed = trimmed.strip_prefix('v').unwrap_or(trimmed);

    let (core, suffix) = match unprefixed.split_once('-') {
        Some((core, suffix)) => (core, Some(suffix)),
        None => (unprefixed, None),
    };

    let components: Vec<&str> = core.split('.').collect();
    let [major, minor, patch] = components.as_slice() else {
        return Err(malformed("expected MAJOR.MINOR.PATCH"));
    };

    let mut version = Version::new(
        parse_component(major).ok_or_else(|| malformed("major is not a number"))?,
        parse_component(minor).ok_or_else(|| malformed("minor is not a number"))?,
        parse_component(patch).ok_or_else(|| malformed("patch is not a number"))?,
    );

    if let Some(suffix) = suffix {
        if suffix.is_empty() {
            return Err(malformed("empty suffix after '-'"));
        }
        version.pre = Prerelease::new(suffix).unwrap_or(Prerelease::EMPTY);
    }

    Ok(version)
}

fn parse_component(s: &str) -> Option<u64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

#[must_use]
pub fn format_tag(version: &Version) -> String {
    format!("v{version}")
}
