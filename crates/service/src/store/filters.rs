//! Admin list filters.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PublishStatus {
    #[default]
    All,
    Published,
    Draft,
}

impl PublishStatus {
    pub fn admits(self, is_published: bool) -> bool {
        match self {
            Self::All => true,
            Self::Published => is_published,
            Self::Draft => !is_published,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
    #[default]
    All,
    Approved,
    Pending,
}

impl ApprovalStatus {
    pub fn admits(self, is_approved: bool) -> bool {
        match self {
            Self::All => true,
            Self::Approved => is_approved,
            Self::Pending => !is_approved,
        }
    }
}

/// Lowercased search text, or `None` when blank.
pub(crate) fn normalized_query(query: Option<&str>) -> Option<String> {
    query.map(|q| q.trim().to_lowercase()).filter(|q| !q.is_empty())
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PostFilter {
    /// Matched case-insensitively against title and content.
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub status: PublishStatus,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CommentFilter {
    /// Matched case-insensitively against the comment, its author's name
    /// and the post title.
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub status: ApprovalStatus,
}
