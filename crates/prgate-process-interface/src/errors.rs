use std::path::PathBuf;

use thiserror::Error;

/// Process error.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum ProcessError {
    /// The process could not be started.
    #[error("Could not start process {}: {source}", program.display())]
    Spawn {
        program: PathBuf,
        source: std::io::Error,
    },

    /// The process was started but its exit status could not be collected.
    #[error("Could not wait for process {}: {source}", program.display())]
    Wait {
        program: PathBuf,
        source: std::io::Error,
    },
}

/// Result alias for `ProcessError`.
pub type Result<T, E = ProcessError> = core::result::Result<T, E>;
