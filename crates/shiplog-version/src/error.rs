use thiserror::Error;

#[derive(Debug, Error)]
pub enum VersionError {
    #[error("release tag '{tag}' is not a semantic version: {reason}")]
    MalformedTag { tag: String, reason: &'static str },

    #[error("cannot apply a {bump} bump to {version}: component would overflow")]
    Overflow {
        version: semver::Version,
        bump: shiplog_core::BumpType,
    },
}
