use serde::{Deserialize, Serialize};

/// GitHub Pull request action.
#[derive(Debug, Deserialize, Serialize, Default, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GhPullRequestAction {
    /// Assigned.
    Assigned,
    /// Closed.
    Closed,
    /// Converted to draft.
    ConvertedToDraft,
    /// Edited.
    Edited,
    /// Labeled.
    Labeled,
    /// Opened.
    #[default]
    Opened,
    /// Reopened.
    Reopened,
    /// Ready for review.
    ReadyForReview,
    /// Synchronize.
    Synchronize,
    /// Unlabeled.
    Unlabeled,
    /// Any other action.
    #[serde(other)]
    Other,
}

impl GhPullRequestAction {
    /// Convert action to static str.
    pub fn to_str(&self) -> &'static str {
        match self {
            Self::Assigned => "assigned",
            Self::Closed => "closed",
            Self::ConvertedToDraft => "converted_to_draft",
            Self::Edited => "edited",
            Self::Labeled => "labeled",
            Self::Opened => "opened",
            Self::Reopened => "reopened",
            Self::ReadyForReview => "ready_for_review",
            Self::Synchronize => "synchronize",
            Self::Unlabeled => "unlabeled",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for GhPullRequestAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.to_str())
    }
}
