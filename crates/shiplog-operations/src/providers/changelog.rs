use std::path::Path;

use shiplog_changelog::{Changelog, VersionRelease};

use crate::Result;
use crate::traits::{ChangelogWriteResult, ChangelogWriter};

pub struct FileSystemChangelogWriter;

impl FileSystemChangelogWriter {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileSystemChangelogWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangelogWriter for FileSystemChangelogWriter {
    fn write_release(
        &self,
        changelog_path: &Path,
        release: &VersionRelease,
    ) -> Result<ChangelogWriteResult> {
        let created = !changelog_path.exists();

        let mut changelog = if created {
            Changelog::new()
        } else {
            Changelog::from_file(changelog_path)?
        };

        changelog.add_release(release);
        changelog.write_to_file(changelog_path)?;

        Ok(ChangelogWriteResult {
            path: changelog_path.to_path_buf(),
            created,
        })
    }

    fn changelog_exists(&self, path: &Path) -> bool {
        path.exists()
    }
}
