use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShiplogError {
    #[error("pre-release tag cannot be empty")]
    EmptyPrereleaseTag,

    #[error("invalid pre-release identifier '{identifier}'")]
    InvalidPrerelease {
        identifier: String,
        #[source]
        source: semver::Error,
    },
}

pub type Result<T> = std::result::Result<T, ShiplogError>;
