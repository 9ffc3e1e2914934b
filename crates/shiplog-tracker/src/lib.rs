mod client;
mod error;
mod wire;

pub use client::{DEFAULT_PROGRAM, GhCli, ISSUE_LIST_LIMIT};
pub use error::TrackerError;

pub type Result<T> = std::result::Result<T, TrackerError>;
