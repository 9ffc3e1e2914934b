mod changelog_writer;
mod issue_tracker;

pub use changelog_writer::{ChangelogWriteResult, ChangelogWriter};
pub use issue_tracker::IssueTracker;
