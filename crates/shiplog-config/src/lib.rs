mod config;
mod error;
mod file;

pub use config::{ReleaseConfig, TITLE_TAG_PLACEHOLDER, load_config};
pub use error::ConfigError;
pub use file::{CONFIG_FILE_NAME, find_config_file};

pub const DEFAULT_CHANGELOG: &str = "CHANGELOG.md";
pub const DEFAULT_READY_LABEL: &str = "ready-for-release";
pub const DEFAULT_SKIP_LABEL: &str = "skip-changelog";
pub const DEFAULT_TITLE_TEMPLATE: &str = "Release {tag}";

pub type Result<T> = std::result::Result<T, ConfigError>;
