//! JSON shapes emitted by `gh ... --json`.

use serde::Deserialize;

use shiplog_core::{ClosedIssue, OpenIssue};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ReleaseListItem {
    pub tag_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ReleaseView {
    pub created_at: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LabelItem {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct IssueItem {
    pub number: u64,
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub labels: Vec<LabelItem>,
}

impl From<IssueItem> for ClosedIssue {
    fn from(item: IssueItem) -> Self {
        Self {
            number: item.number,
            title: item.title,
            url: item.url,
            labels: item.labels.into_iter().map(|l| l.name).collect(),
        }
    }
}

impl From<IssueItem> for OpenIssue {
    fn from(item: IssueItem) -> Self {
        Self {
            number: item.number,
            title: item.title,
        }
    }
}
