use serde::{Deserialize, Serialize};

use super::{GhPullRequest, GhPullRequestAction};
use crate::types::common::{GhRepository, GhUser};

/// GitHub Pull request event.
#[derive(Debug, Deserialize, Serialize, Default, Clone, Eq, PartialEq)]
#[serde(default)]
pub struct GhPullRequestEvent {
    /// Action.
    pub action: GhPullRequestAction,
    /// Number.
    pub number: u64,
    /// Pull request.
    pub pull_request: GhPullRequest,
    /// Repository.
    pub repository: GhRepository,
    /// Sender.
    pub sender: GhUser,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::types::GhBranch;

    #[test]
    fn parse_minimal_payload() {
        let event: GhPullRequestEvent = serde_json::from_str(
            r#"{
                "action": "synchronize",
                "number": 42,
                "pull_request": {
                    "number": 42,
                    "head": { "ref": "pr-42", "sha": "abc" },
                    "base": {
                        "ref": "main",
                        "repo": { "clone_url": "https://example.test/org/repo.git" }
                    }
                }
            }"#,
        )
        .unwrap();

        assert_eq!(event.action, GhPullRequestAction::Synchronize);
        assert_eq!(event.pull_request.number, 42);
        assert_eq!(event.pull_request.head.reference, "pr-42");
        assert_eq!(event.pull_request.base.reference, "main");
        assert_eq!(
            event.pull_request.base.clone_url(),
            Some("https://example.test/org/repo.git")
        );
    }

    #[test]
    fn unknown_action_does_not_fail() {
        let event: GhPullRequestEvent =
            serde_json::from_str(r#"{"action": "auto_merge_enabled"}"#).unwrap();

        assert_eq!(event.action, GhPullRequestAction::Other);
        assert_eq!(event.pull_request.number, 0);
        assert_eq!(event.pull_request.base, GhBranch::default());
    }
}
