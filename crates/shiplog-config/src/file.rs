use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::Result;
use crate::error::ConfigError;

pub const CONFIG_FILE_NAME: &str = "release.toml";

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub(crate) struct ConfigFile {
    #[serde(default)]
    pub(crate) release: Option<ReleaseSection>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub(crate) struct ReleaseSection {
    pub(crate) changelog: Option<String>,
    pub(crate) ready_label: Option<String>,
    pub(crate) skip_label: Option<String>,
    pub(crate) draft: Option<bool>,
    pub(crate) repository: Option<String>,
    pub(crate) title_template: Option<String>,
}

/// Walks up from `start` and returns the first `release.toml` found.
#[must_use]
pub fn find_config_file(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find(|candidate| candidate.is_file())
}

pub(crate) fn read_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
