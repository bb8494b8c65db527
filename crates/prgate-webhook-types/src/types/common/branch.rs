use serde::{Deserialize, Serialize};

use super::{GhRepository, GhUser};

/// GitHub Branch.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct GhBranch {
    /// Label.
    pub label: Option<String>,
    #[serde(rename = "ref")]
    /// Reference.
    pub reference: String,
    /// SHA.
    pub sha: String,
    /// Creator.
    pub user: Option<GhUser>,
    /// Repository holding the branch.
    pub repo: Option<GhRepository>,
}

impl GhBranch {
    /// Clone URL of the repository holding the branch, if known.
    pub fn clone_url(&self) -> Option<&str> {
        self.repo
            .as_ref()
            .map(|r| r.clone_url.as_str())
            .filter(|url| !url.is_empty())
    }
}
