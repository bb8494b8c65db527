//! Pull request reference resolution.

use prgate_webhook_types::types::GhPullRequestEvent;

use crate::{PipelineError, Result};

/// Ref-spec keeping every local branch in sync with the remote ones.
pub const SYNC_ALL_BRANCHES_REFSPEC: &str = "refs/heads/*:refs/heads/*";

const TRANSPORT_SCHEMES: &[&str] = &["https", "http", "ssh", "git", "file"];

/// Ref-specs to fetch for a pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefSpec {
    pull_request: String,
    local_branch: String,
}

impl RefSpec {
    /// Build the synthetic `refs/pull/<number>/head:<local>` mapping.
    pub fn for_pull_request(number: u64, local_branch: &str) -> Self {
        Self {
            pull_request: format!("refs/pull/{number}/head:{local_branch}"),
            local_branch: local_branch.to_string(),
        }
    }

    /// The pull request head mapping.
    pub fn pull_request(&self) -> &str {
        &self.pull_request
    }

    /// Every ref-spec to request, in one fetch.
    ///
    /// The remote branch sharing the local branch name is excluded from the
    /// sync, so that the local branch only receives the pull request head.
    pub fn fetch_list(&self) -> Vec<String> {
        vec![
            SYNC_ALL_BRANCHES_REFSPEC.to_string(),
            format!("^refs/heads/{}", self.local_branch),
            self.pull_request.clone(),
        ]
    }
}

/// Everything the pipeline needs to know about a pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestReferences {
    /// Pull request number.
    pub number: u64,
    /// Clone URL of the base repository.
    pub clone_url: String,
    /// Base branch name.
    pub base_branch: String,
    /// Head branch name, as sent by the platform.
    pub head_branch: String,
    /// Local branch receiving the pull request head.
    pub local_branch: String,
    /// Ref-specs to fetch.
    pub refspec: RefSpec,
}

impl PullRequestReferences {
    /// Full reference of the base branch.
    pub fn base_ref(&self) -> String {
        format!("refs/heads/{}", self.base_branch)
    }
}

/// Derive the clone URL, pull request number and ref-specs from an event.
///
/// The head branch is used verbatim as local branch name unless
/// `namespace_local_branch` is set, in which case it becomes
/// `pr-<number>/<head>` so it cannot overwrite an existing branch.
pub fn resolve_references(
    event: &GhPullRequestEvent,
    namespace_local_branch: bool,
) -> Result<PullRequestReferences> {
    let pull_request = &event.pull_request;

    let number = pull_request.number;
    if number == 0 {
        return Err(PipelineError::malformed("missing pull request number"));
    }

    let clone_url = pull_request
        .base
        .clone_url()
        .ok_or_else(|| PipelineError::malformed("missing base repository clone URL"))?;
    if !is_transport_url(clone_url) {
        return Err(PipelineError::malformed(format!(
            "invalid clone URL: {clone_url}"
        )));
    }

    let head_branch = pull_request.head.reference.as_str();
    if head_branch.is_empty() {
        return Err(PipelineError::malformed("missing head branch name"));
    }

    let base_branch = pull_request.base.reference.as_str();
    if base_branch.is_empty() {
        return Err(PipelineError::malformed("missing base branch name"));
    }

    let local_branch = if namespace_local_branch {
        format!("pr-{number}/{head_branch}")
    } else {
        head_branch.to_string()
    };

    Ok(PullRequestReferences {
        number,
        clone_url: clone_url.to_string(),
        base_branch: base_branch.to_string(),
        head_branch: head_branch.to_string(),
        refspec: RefSpec::for_pull_request(number, &local_branch),
        local_branch,
    })
}

/// `scheme://...`, scp-like `user@host:path`, or an absolute local path.
fn is_transport_url(url: &str) -> bool {
    if url.chars().any(char::is_whitespace) {
        return false;
    }

    if let Some((scheme, rest)) = url.split_once("://") {
        return TRANSPORT_SCHEMES.contains(&scheme) && !rest.is_empty();
    }

    if url.starts_with('/') {
        return true;
    }

    match url.split_once(':') {
        Some((host, path)) => host.contains('@') && !host.contains('/') && !path.is_empty(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use prgate_webhook_types::types::{GhBranch, GhPullRequest, GhRepository};

    use super::*;

    fn event(number: u64, clone_url: &str, base: &str, head: &str) -> GhPullRequestEvent {
        GhPullRequestEvent {
            number,
            pull_request: GhPullRequest {
                number,
                base: GhBranch {
                    reference: base.into(),
                    repo: Some(GhRepository {
                        clone_url: clone_url.into(),
                        ..Default::default()
                    }),
                    ..Default::default()
                },
                head: GhBranch {
                    reference: head.into(),
                    ..Default::default()
                },
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn resolve_scenario() {
        let refs = resolve_references(
            &event(42, "https://example.test/org/repo.git", "main", "pr-42"),
            false,
        )
        .unwrap();

        assert_eq!(
            refs,
            PullRequestReferences {
                number: 42,
                clone_url: "https://example.test/org/repo.git".into(),
                base_branch: "main".into(),
                head_branch: "pr-42".into(),
                local_branch: "pr-42".into(),
                refspec: RefSpec::for_pull_request(42, "pr-42"),
            }
        );
        assert_eq!(refs.refspec.pull_request(), "refs/pull/42/head:pr-42");
        assert_eq!(
            refs.refspec.fetch_list(),
            vec![
                "refs/heads/*:refs/heads/*",
                "^refs/heads/pr-42",
                "refs/pull/42/head:pr-42"
            ]
        );
        assert_eq!(refs.base_ref(), "refs/heads/main");
    }

    #[test]
    fn refspec_follows_number_and_head_branch() {
        for (number, head) in [(1, "fix"), (907, "feature/nested-name"), (u64::MAX, "x")] {
            let refs = resolve_references(
                &event(number, "git@example.test:org/repo.git", "develop", head),
                false,
            )
            .unwrap();

            assert_eq!(
                refs.refspec.pull_request(),
                format!("refs/pull/{number}/head:{head}")
            );
            assert_eq!(refs.local_branch, head);
        }
    }

    #[test]
    fn namespaced_local_branch() {
        let refs = resolve_references(
            &event(42, "https://example.test/org/repo.git", "main", "main"),
            true,
        )
        .unwrap();

        assert_eq!(refs.local_branch, "pr-42/main");
        assert_eq!(refs.refspec.pull_request(), "refs/pull/42/head:pr-42/main");
        assert_eq!(refs.refspec.fetch_list()[1], "^refs/heads/pr-42/main");
        assert_eq!(refs.head_branch, "main");
    }

    #[test]
    fn missing_number_is_malformed() {
        let err = resolve_references(
            &event(0, "https://example.test/org/repo.git", "main", "pr"),
            false,
        )
        .unwrap_err();
        assert!(matches!(err, PipelineError::MalformedEvent { .. }));
    }

    #[test]
    fn missing_clone_url_is_malformed() {
        let err = resolve_references(&event(3, "", "main", "pr"), false).unwrap_err();
        assert!(matches!(err, PipelineError::MalformedEvent { .. }));

        let mut no_repo = event(3, "https://example.test/org/repo.git", "main", "pr");
        no_repo.pull_request.base.repo = None;
        assert!(matches!(
            resolve_references(&no_repo, false),
            Err(PipelineError::MalformedEvent { .. })
        ));
    }

    #[test]
    fn missing_branches_are_malformed() {
        assert!(resolve_references(
            &event(3, "https://example.test/org/repo.git", "main", ""),
            false
        )
        .is_err());
        assert!(resolve_references(
            &event(3, "https://example.test/org/repo.git", "", "pr"),
            false
        )
        .is_err());
    }

    #[test]
    fn transport_urls() {
        assert!(is_transport_url("https://example.test/org/repo.git"));
        assert!(is_transport_url("ssh://git@example.test/org/repo.git"));
        assert!(is_transport_url("git@example.test:org/repo.git"));
        assert!(is_transport_url("/srv/git/repo.git"));

        assert!(!is_transport_url("example.test/org/repo.git"));
        assert!(!is_transport_url("ftp://example.test/repo.git"));
        assert!(!is_transport_url("https://"));
        assert!(!is_transport_url("https://example.test/org repo.git"));
    }
}
