mod changelog;
mod gh;

pub use changelog::FileSystemChangelogWriter;
pub use gh::GhIssueTracker;
