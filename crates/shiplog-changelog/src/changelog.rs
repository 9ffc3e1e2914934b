use std::path::Path;

use crate::entry::VersionRelease;
use crate::error::ChangelogError;
use crate::format::{CHANGELOG_HEADER, format_version_release, new_changelog};

const HEADER_TITLE: &str = "# Changelog";
const SECTION_MARKER: &str = "\n## ";

/// A changelog document kept newest-first.
///
/// Everything before the first `## ` heading is treated as the header and is
/// preserved verbatim. New sections are spliced in directly after it.
#[derive(Debug, Clone)]
pub struct Changelog {
    content: String,
}

impl Default for Changelog {
    fn default() -> Self {
        Self::new()
    }
}

impl Changelog {
    #[must_use]
    pub fn new() -> Self {
        Self {
            content: new_changelog(),
        }
    }

    #[must_use]
    pub fn from_content(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    /// # Errors
    ///
    /// Returns `ChangelogError::Read` if the file cannot be read.
    pub fn from_file(path: &Path) -> Result<Self, ChangelogError> {
        let content = std::fs::read_to_string(path).map_err(|source| ChangelogError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self { content })
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    #[must_use]
    pub fn has_header(&self) -> bool {
        self.content
            .lines()
            .next()
            .is_some_and(|line| line.trim_end() == HEADER_TITLE)
    }

    fn line_ending(&self) -> &'static str {
        if self.content.contains("\r\n") {
            "\r\n"
        } else {
            "\n"
        }
    }

    pub fn add_release(&mut self, release: &VersionRelease) {
        let newline = self.line_ending();
        let mut formatted = format_version_release(release);
        if newline != "\n" {
            formatted = formatted.replace('\n', newline);
        }

        let default_header = CHANGELOG_HEADER.replace('\n', newline);
        let (header, rest) = if self.has_header() {
            let split = self.find_insertion_point();
            (&self.content[..split], &self.content[split..])
        } else {
            (default_header.as_str(), self.content.as_str())
        };

        let mut new_content = String::with_capacity(self.content.len() + formatted.len() + 16);

        new_content.push_str(header);
        if !new_content.ends_with(&newline.repeat(2)) {
            if !new_content.ends_with(newline) {
                new_content.push_str(newline);
            }
            new_content.push_str(newline);
        }
        new_content.push_str(&formatted);

        if !rest.is_empty() {
            new_content.push_str(newline);
            new_content.push_str(rest);
        }

        self.content = new_content;
    }

    /// # Errors
    ///
    /// Returns `ChangelogError::Write` if the file cannot be written.
    pub fn write_to_file(&self, path: &Path) -> Result<(), ChangelogError> {
        std::fs::write(path, &self.content).map_err(|source| ChangelogError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    fn find_insertion_point(&self) -> usize {
        self.content
            .find(SECTION_MARKER)
            .map_or(self.content.len(), |pos| pos + 1)
    }
}
