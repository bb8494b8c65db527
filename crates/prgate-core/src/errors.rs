//! Pipeline errors.

use std::path::PathBuf;

use prgate_git_interface::GitError;
use prgate_process_interface::ProcessError;
use thiserror::Error;

/// Pipeline stage, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Resolve,
    Workspace,
    Clone,
    Fetch,
    Checkout,
    Persist,
    Verify,
}

impl PipelineStage {
    /// Convert stage to static str.
    pub fn to_str(self) -> &'static str {
        match self {
            Self::Resolve => "resolve",
            Self::Workspace => "workspace",
            Self::Clone => "clone",
            Self::Fetch => "fetch",
            Self::Checkout => "checkout",
            Self::Persist => "persist",
            Self::Verify => "verify",
        }
    }
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.to_str())
    }
}

/// Pipeline error.
#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Workspace I/O failure on {}: {source}", path.display())]
    IoFailure {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed pull request event: {reason}")]
    MalformedEvent { reason: String },

    #[error("Could not clone {url}: {source}")]
    CloneFailure { url: String, source: GitError },

    #[error("Could not fetch {refspec}: {source}")]
    FetchFailure { refspec: String, source: GitError },

    #[error("Could not checkout branch {branch}: {source}")]
    CheckoutFailure { branch: String, source: GitError },

    #[error("Could not write event file {}: {source}", path.display())]
    WriteFailure {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Could not run verification process: {source}")]
    SpawnFailure { source: ProcessError },

    #[error("Verification process {}", describe_exit(code))]
    ProcessFailure { code: Option<i32> },

    #[error("Run cancelled at {stage} stage")]
    Cancelled { stage: PipelineStage },

    #[error("Run deadline exceeded at {stage} stage")]
    TimedOut { stage: PipelineStage },
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exited with code {code}"),
        None => "was terminated by a signal".into(),
    }
}

impl PipelineError {
    /// Stage at which the run stopped.
    pub fn stage(&self) -> PipelineStage {
        match self {
            Self::IoFailure { .. } => PipelineStage::Workspace,
            Self::MalformedEvent { .. } => PipelineStage::Resolve,
            Self::CloneFailure { .. } => PipelineStage::Clone,
            Self::FetchFailure { .. } => PipelineStage::Fetch,
            Self::CheckoutFailure { .. } => PipelineStage::Checkout,
            Self::WriteFailure { .. } => PipelineStage::Persist,
            Self::SpawnFailure { .. } | Self::ProcessFailure { .. } => PipelineStage::Verify,
            Self::Cancelled { stage } | Self::TimedOut { stage } => *stage,
        }
    }

    /// The verification process ran and rejected the pull request.
    pub fn is_verification_result(&self) -> bool {
        matches!(self, Self::ProcessFailure { .. })
    }

    pub(crate) fn malformed<T: Into<String>>(reason: T) -> Self {
        Self::MalformedEvent {
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for PipelineError {
    fn from(e: serde_json::Error) -> Self {
        Self::MalformedEvent {
            reason: e.to_string(),
        }
    }
}

/// Result alias for `PipelineError`.
pub type Result<T> = core::result::Result<T, PipelineError>;
