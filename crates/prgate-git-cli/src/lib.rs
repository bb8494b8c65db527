//! Git service backed by the `git` executable.

use std::{ffi::OsStr, path::Path, process::Stdio};

use async_trait::async_trait;
use prgate_git_interface::{GitError, GitService, Result};
use tokio::process::Command;
use tracing::debug;

/// Remote name used by clones.
const ORIGIN: &str = "origin";

/// Git service running `git` subprocesses.
#[derive(Clone)]
pub struct CliGitService {
    executable: String,
}

impl CliGitService {
    /// Creates a git service using the given executable.
    pub fn new<T: Into<String>>(executable: T) -> Self {
        Self {
            executable: executable.into(),
        }
    }

    fn command(&self, workdir: Option<&Path>) -> Command {
        let mut cmd = Command::new(&self.executable);
        if let Some(workdir) = workdir {
            cmd.current_dir(workdir);
        }

        // Never wait on a credential prompt
        cmd.env("GIT_TERMINAL_PROMPT", "0");
        cmd.stdin(Stdio::null());
        cmd.kill_on_drop(true);
        cmd
    }

    async fn run<I, S>(&self, workdir: Option<&Path>, args: I) -> Result<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let args: Vec<_> = args
            .into_iter()
            .map(|a| a.as_ref().to_os_string())
            .collect();
        let command = format!(
            "git {}",
            args.iter()
                .map(|a| a.to_string_lossy())
                .collect::<Vec<_>>()
                .join(" ")
        );

        debug!(command = %command, "Running git command");
        let output = self
            .command(workdir)
            .args(&args)
            .output()
            .await
            .map_err(|e| GitError::CommandSpawn {
                command: command.clone(),
                source: e,
            })?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            Err(GitError::CommandFailed { command, stderr })
        }
    }
}

impl Default for CliGitService {
    fn default() -> Self {
        Self::new("git")
    }
}

#[async_trait]
impl GitService for CliGitService {
    #[tracing::instrument(skip(self))]
    async fn clone_repository(&self, url: &str, destination: &Path) -> Result<()> {
        self.run(
            None,
            [
                OsStr::new("clone"),
                OsStr::new("--no-single-branch"),
                OsStr::new("--origin"),
                OsStr::new(ORIGIN),
                OsStr::new("--"),
                OsStr::new(url),
                destination.as_os_str(),
            ],
        )
        .await
        .map(|_| ())
    }

    #[tracing::instrument(skip(self))]
    async fn fetch(&self, repository: &Path, refspecs: &[String]) -> Result<()> {
        // Fetched ref-specs may rewrite any local branch, so none stays checked out
        self.run(Some(repository), ["checkout", "--quiet", "--detach"])
            .await?;

        // Local branches are disposable copies of the remote ones
        let mut args = vec!["fetch", "--force", ORIGIN];
        args.extend(refspecs.iter().map(String::as_str));

        self.run(Some(repository), args).await.map(|_| ())
    }

    #[tracing::instrument(skip(self))]
    async fn checkout(&self, repository: &Path, branch: &str) -> Result<()> {
        self.run(Some(repository), ["checkout", branch, "--"])
            .await
            .map(|_| ())
    }

    #[tracing::instrument(skip(self))]
    async fn health_check(&self) -> Result<()> {
        self.run(None, ["--version"]).await.map(|_| ())
    }
}
