use tracing::info;

use shiplog_core::ReleaseRecord;

use crate::Result;
use crate::error::OperationError;
use crate::traits::IssueTracker;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedRelease {
    pub url: String,
    pub record: ReleaseRecord,
}

pub struct ReleasePublisher<'a, T> {
    tracker: &'a T,
    draft: bool,
}

impl<'a, T: IssueTracker> ReleasePublisher<'a, T> {
    pub fn new(tracker: &'a T, draft: bool) -> Self {
        Self { tracker, draft }
    }

    /// # Errors
    ///
    /// Returns `OperationError::ReleaseCreation` if the tracker rejects the
    /// release. Nothing after this step may run in that case.
    pub fn publish(
        &self,
        tag: &str,
        title: &str,
        notes: &str,
        prerelease: bool,
    ) -> Result<PublishedRelease> {
        let record = ReleaseRecord {
            tag: tag.to_string(),
            title: title.to_string(),
            notes: notes.to_string(),
            draft: self.draft,
            prerelease,
        };

        let url = self
            .tracker
            .create_release(&record)
            .map_err(|source| OperationError::ReleaseCreation {
                tag: tag.to_string(),
                source: Box::new(source),
            })?;

        info!(%tag, %url, draft = record.draft, prerelease, "release created");

        Ok(PublishedRelease { url, record })
    }
}
