use thiserror::Error;

/// Git error.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum GitError {
    /// Git command exited with a failure status.
    #[error("git command failed: {command}\nstderr: {stderr}")]
    CommandFailed { command: String, stderr: String },

    /// Git command could not be started.
    #[error("could not run git command {command}: {source}")]
    CommandSpawn {
        command: String,
        source: std::io::Error,
    },

    /// Implementation-specific error
    #[error(transparent)]
    ImplementationError {
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
}

/// Result alias for `GitError`.
pub type Result<T, E = GitError> = core::result::Result<T, E>;
