use std::path::{Path, PathBuf};

use shiplog_changelog::VersionRelease;

use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangelogWriteResult {
    pub path: PathBuf,
    pub created: bool,
}

pub trait ChangelogWriter: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the changelog cannot be read or written.
    fn write_release(
        &self,
        changelog_path: &Path,
        release: &VersionRelease,
    ) -> Result<ChangelogWriteResult>;

    fn changelog_exists(&self, path: &Path) -> bool;
}
