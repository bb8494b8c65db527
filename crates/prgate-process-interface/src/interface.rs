//! Process interfaces.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::Result;

/// Description of a child process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessSpec {
    /// Program to execute.
    pub program: PathBuf,
    /// Arguments.
    pub args: Vec<String>,
    /// Working directory.
    pub working_dir: PathBuf,
    /// Complete environment of the child, nothing else is inherited.
    pub env: Vec<(String, String)>,
}

impl ProcessSpec {
    /// Get an environment variable value.
    pub fn env_var(&self, name: &str) -> Option<&str> {
        self.env
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Exit status of a finished child process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessExit {
    /// Exit code, `None` when the process was terminated by a signal.
    pub code: Option<i32>,
}

impl ProcessExit {
    /// Successful exit.
    pub fn success() -> Self {
        Self { code: Some(0) }
    }

    /// Whether the process exited with code 0.
    pub fn is_success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Process capability: spawn a child, stream its output to ours and wait for it.
#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait ProcessService: Send + Sync {
    /// Runs a process to completion.
    async fn run(&self, spec: &ProcessSpec) -> Result<ProcessExit>;
}
