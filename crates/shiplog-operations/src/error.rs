use thiserror::Error;

#[derive(Debug, Error)]
pub enum OperationError {
    #[error(transparent)]
    Tracker(#[from] shiplog_tracker::TrackerError),

    #[error(transparent)]
    Changelog(#[from] shiplog_changelog::ChangelogError),

    #[error("current release tag '{tag}' is not a usable version")]
    Configuration {
        tag: String,
        #[source]
        source: shiplog_version::VersionError,
    },

    #[error("cannot compute the version after {current}")]
    NextVersion {
        current: semver::Version,
        #[source]
        source: shiplog_version::VersionError,
    },

    #[error("failed to look up the latest release")]
    LatestReleaseLookup(#[source] Box<OperationError>),

    #[error("failed to create release '{tag}'")]
    ReleaseCreation {
        tag: String,
        #[source]
        source: Box<OperationError>,
    },
}

pub type Result<T> = std::result::Result<T, OperationError>;

/// Flattens an error and its sources into one line for warnings.
pub(crate) fn describe_chain(error: &dyn std::error::Error) -> String {
    let mut parts = vec![error.to_string()];
    let mut source = error.source();
    while let Some(cause) = source {
        parts.push(cause.to_string());
        source = cause.source();
    }
    parts.join(": ")
}
