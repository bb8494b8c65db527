//! Git interfaces.

use std::path::Path;

use async_trait::async_trait;

use crate::Result;

/// Version-control capability used to materialize a repository.
///
/// A repository is addressed by the path of its working tree.
#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait GitService: Send + Sync {
    /// Clones a remote repository with its full history and every branch.
    async fn clone_repository(&self, url: &str, destination: &Path) -> Result<()>;
    /// Fetches every ref-spec from the origin remote in a single operation.
    async fn fetch(&self, repository: &Path, refspecs: &[String]) -> Result<()>;
    /// Checks out a local branch into the working tree.
    async fn checkout(&self, repository: &Path, branch: &str) -> Result<()>;
    /// Health check
    async fn health_check(&self) -> Result<()>;
}
