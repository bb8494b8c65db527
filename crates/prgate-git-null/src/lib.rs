use std::path::Path;

use async_trait::async_trait;
use prgate_git_interface::{GitError, GitService};

/// Git service which does nothing.
#[derive(Clone, Default)]
pub struct NullGitService {
    _private: (),
}

impl NullGitService {
    /// Creates a null git service.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

#[async_trait]
impl GitService for NullGitService {
    #[tracing::instrument(skip(self))]
    async fn clone_repository(&self, url: &str, destination: &Path) -> Result<(), GitError> {
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn fetch(&self, repository: &Path, refspecs: &[String]) -> Result<(), GitError> {
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn checkout(&self, repository: &Path, branch: &str) -> Result<(), GitError> {
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn health_check(&self) -> Result<(), GitError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn every_operation_succeeds() {
        let service = NullGitService::new();
        let repo = Path::new("/nonexistent/repo");

        service
            .clone_repository("https://example.test/org/repo.git", repo)
            .await
            .unwrap();
        service
            .fetch(repo, &["refs/heads/*:refs/heads/*".into()])
            .await
            .unwrap();
        service.checkout(repo, "main").await.unwrap();
        service.health_check().await.unwrap();
    }
}
