use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::file::{ReleaseSection, find_config_file, read_config_file};
use crate::{
    DEFAULT_CHANGELOG, DEFAULT_READY_LABEL, DEFAULT_SKIP_LABEL, DEFAULT_TITLE_TEMPLATE, Result,
};

pub const TITLE_TAG_PLACEHOLDER: &str = "{tag}";

#[derive(Debug, Clone)]
pub struct ReleaseConfig {
    root: PathBuf,
    source: Option<PathBuf>,
    changelog_path: PathBuf,
    ready_label: String,
    skip_label: String,
    draft: bool,
    repository: Option<String>,
    title_template: String,
}

impl ReleaseConfig {
    /// Defaults rooted at `root`, used when no `release.toml` exists.
    #[must_use]
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            changelog_path: root.join(DEFAULT_CHANGELOG),
            root,
            source: None,
            ready_label: DEFAULT_READY_LABEL.to_string(),
            skip_label: DEFAULT_SKIP_LABEL.to_string(),
            draft: true,
            repository: None,
            title_template: DEFAULT_TITLE_TEMPLATE.to_string(),
        }
    }

    /// The `release.toml` this config was read from, if any.
    #[must_use]
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    #[must_use]
    pub fn changelog_path(&self) -> &Path {
        &self.changelog_path
    }

    #[must_use]
    pub fn ready_label(&self) -> &str {
        &self.ready_label
    }

    #[must_use]
    pub fn skip_label(&self) -> &str {
        &self.skip_label
    }

    #[must_use]
    pub fn draft(&self) -> bool {
        self.draft
    }

    #[must_use]
    pub fn repository(&self) -> Option<&str> {
        self.repository.as_deref()
    }

    #[must_use]
    pub fn release_title(&self, tag: &str) -> String {
        self.title_template.replace(TITLE_TAG_PLACEHOLDER, tag)
    }

    #[cfg(any(test, feature = "testing"))]
    #[must_use]
    pub fn with_draft(mut self, draft: bool) -> Self {
        self.draft = draft;
        self
    }

    fn apply(mut self, path: &Path, section: ReleaseSection) -> Result<Self> {
        if let Some(changelog) = section.changelog {
            self.changelog_path = self.root.join(non_empty(path, "changelog", changelog)?);
        }
        if let Some(label) = section.ready_label {
            self.ready_label = non_empty(path, "ready-label", label)?;
        }
        if let Some(label) = section.skip_label {
            self.skip_label = non_empty(path, "skip-label", label)?;
        }
        if let Some(draft) = section.draft {
            self.draft = draft;
        }
        if let Some(repository) = section.repository {
            self.repository = Some(validate_repository(path, repository)?);
        }
        if let Some(template) = section.title_template {
            self.title_template = non_empty(path, "title-template", template)?;
        }
        self.source = Some(path.to_path_buf());
        Ok(self)
    }
}

fn non_empty(path: &Path, field: &'static str, value: String) -> Result<String> {
    if value.trim().is_empty() {
        return Err(ConfigError::EmptyValue {
            path: path.to_path_buf(),
            field,
        });
    }
    Ok(value)
}

fn validate_repository(path: &Path, value: String) -> Result<String> {
    let valid = value
        .split_once('/')
        .is_some_and(|(owner, name)| !owner.is_empty() && !name.is_empty() && !name.contains('/'));

    if !valid {
        return Err(ConfigError::InvalidRepository {
            path: path.to_path_buf(),
            value,
        });
    }
    Ok(value)
}

/// Loads settings from the nearest `release.toml` above `start`.
///
/// Without a config file the defaults apply and `start` is the root.
///
/// # Errors
///
/// Returns an error if a config file exists but cannot be read, is not valid
/// TOML, contains unknown keys, or has invalid values.
pub fn load_config(start: &Path) -> Result<ReleaseConfig> {
    let Some(path) = find_config_file(start) else {
        return Ok(ReleaseConfig::with_root(start));
    };

    let root = path.parent().map_or_else(|| start.to_path_buf(), Path::to_path_buf);
    let file = read_config_file(&path)?;
    let config = ReleaseConfig::with_root(root);

    match file.release {
        Some(section) => config.apply(&path, section),
        None => Ok(ReleaseConfig {
            source: Some(path),
            ..config
        }),
    }
}
