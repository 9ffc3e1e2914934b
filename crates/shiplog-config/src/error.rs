use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at '{path}'")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config at '{path}'")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("config at '{path}' sets '{field}' to an empty value")]
    EmptyValue { path: PathBuf, field: &'static str },

    #[error("repository '{value}' in '{path}' must be in owner/name form")]
    InvalidRepository { path: PathBuf, value: String },
}
