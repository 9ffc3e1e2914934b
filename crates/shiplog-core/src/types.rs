use std::fmt;

use semver::Prerelease;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ShiplogError};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum BumpType {
    #[default]
    Patch,
    Minor,
    Major,
}

impl fmt::Display for BumpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Patch => "patch",
            Self::Minor => "minor",
            Self::Major => "major",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrereleaseKind {
    Alpha,
    Beta,
}

impl fmt::Display for PrereleaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Alpha => "alpha",
            Self::Beta => "beta",
        };
        write!(f, "{s}")
    }
}

/// A requested pre-release suffix such as `alpha.1` or `beta.rc`.
///
/// Construction validates that the composed identifier is a legal semver
/// pre-release, so later version arithmetic cannot fail on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrereleaseSpec {
    kind: PrereleaseKind,
    tag: String,
    identifier: Prerelease,
}

impl PrereleaseSpec {
    /// # Errors
    ///
    /// Returns `ShiplogError::EmptyPrereleaseTag` if `tag` is blank, or
    /// `ShiplogError::InvalidPrerelease` if `{kind}.{tag}` is not a valid
    /// semver pre-release identifier.
    pub fn new(kind: PrereleaseKind, tag: &str) -> Result<Self> {
        let tag = tag.trim();
        if tag.is_empty() {
            return Err(ShiplogError::EmptyPrereleaseTag);
        }

        let composed = format!("{kind}.{tag}");
        let identifier =
            Prerelease::new(&composed).map_err(|source| ShiplogError::InvalidPrerelease {
                identifier: composed,
                source,
            })?;

        Ok(Self {
            kind,
            tag: tag.to_string(),
            identifier,
        })
    }

    #[must_use]
    pub fn kind(&self) -> PrereleaseKind {
        self.kind
    }

    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    #[must_use]
    pub fn identifier(&self) -> &Prerelease {
        &self.identifier
    }
}

impl fmt::Display for PrereleaseSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.identifier)
    }
}
