use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("failed to run '{program}'")]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("'{command}' exited with {status}: {}", .stderr.trim())]
    CommandFailed {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("'{command}' produced output that is not valid UTF-8")]
    NonUtf8Output { command: String },

    #[error("failed to decode output of '{command}'")]
    Decode {
        command: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid timestamp '{value}' for release '{tag}'")]
    InvalidTimestamp {
        tag: String,
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("'{command}' returned no release URL")]
    MissingReleaseUrl { command: String },
}

pub(crate) fn describe_status(code: Option<i32>) -> String {
    code.map_or_else(|| "a signal".to_string(), |c| format!("status {c}"))
}
