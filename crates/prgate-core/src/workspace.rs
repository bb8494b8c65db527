//! Ephemeral per-run workspaces.
//!
//! Layout of a workspace:
//!
//! ```text
//! <temp_root>/<prefix><random>/
//!     github/event.json    persisted payload
//!     repo/                working tree
//! ```

use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use prgate_config::WorkspaceConfig;
use tokio::{fs::DirBuilder, io::AsyncWriteExt};
use tracing::{debug, warn};

use crate::{PipelineError, Result};

/// Event directory name.
pub const EVENT_DIR: &str = "github";
/// Event file name.
pub const EVENT_FILE: &str = "event.json";
/// Repository directory name.
pub const REPO_DIR: &str = "repo";

const MAX_NAME_ATTEMPTS: usize = 10_000;

/// Allocates workspaces under a single root directory.
#[derive(Debug, Clone)]
pub struct WorkspaceManager {
    temp_root: PathBuf,
    prefix: String,
}

impl WorkspaceManager {
    pub fn new<P: Into<PathBuf>, S: Into<String>>(temp_root: P, prefix: S) -> Self {
        Self {
            temp_root: temp_root.into(),
            prefix: prefix.into(),
        }
    }

    pub fn from_config(config: &WorkspaceConfig) -> Self {
        Self::new(config.temp_root.clone(), config.prefix.clone())
    }

    /// Create the root directory if it does not exist yet.
    pub async fn ensure_root(&self) -> Result<()> {
        let mut builder = DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        builder.mode(0o700);

        builder
            .create(&self.temp_root)
            .await
            .map_err(|e| PipelineError::IoFailure {
                path: self.temp_root.clone(),
                source: e,
            })
    }

    /// Allocate a fresh workspace with a unique name.
    #[tracing::instrument(skip(self), fields(temp_root = %self.temp_root.display()))]
    pub async fn acquire(&self) -> Result<Workspace> {
        let base = absolute(&self.temp_root)?;
        let root = self.create_unique_root(&base).await?;
        let workspace = Workspace::new(root);

        for dir in [workspace.event_dir(), workspace.repo_dir()] {
            if let Err(e) = private_dir_builder().create(&dir).await {
                // Dropping the workspace removes what was created so far
                return Err(PipelineError::IoFailure {
                    path: dir,
                    source: e,
                });
            }
        }

        debug!(workspace = %workspace.root().display(), "Workspace acquired");
        Ok(workspace)
    }

    async fn create_unique_root(&self, base: &Path) -> Result<PathBuf> {
        let mut last_error = None;

        for _ in 0..MAX_NAME_ATTEMPTS {
            let candidate = base.join(format!("{}{}", self.prefix, rand::random::<u64>()));
            match private_dir_builder().create(&candidate).await {
                Ok(()) => return Ok(candidate),
                Err(e) if e.kind() == ErrorKind::AlreadyExists => last_error = Some(e),
                Err(e) => {
                    return Err(PipelineError::IoFailure {
                        path: candidate,
                        source: e,
                    })
                }
            }
        }

        Err(PipelineError::IoFailure {
            path: base.to_path_buf(),
            source: last_error.unwrap_or_else(|| ErrorKind::AlreadyExists.into()),
        })
    }
}

/// A workspace owned by exactly one run.
///
/// The directory tree is removed by [`Workspace::release`], or on drop if the
/// run never got to release it.
#[derive(Debug)]
pub struct Workspace {
    root: PathBuf,
    released: bool,
}

impl Workspace {
    fn new(root: PathBuf) -> Self {
        Self {
            root,
            released: false,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn event_dir(&self) -> PathBuf {
        self.root.join(EVENT_DIR)
    }

    pub fn event_path(&self) -> PathBuf {
        self.event_dir().join(EVENT_FILE)
    }

    pub fn repo_dir(&self) -> PathBuf {
        self.root.join(REPO_DIR)
    }

    /// Remove the workspace tree. Failures are logged, never returned.
    pub async fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;

        match tokio::fs::remove_dir_all(&self.root).await {
            Ok(()) => debug!(workspace = %self.root.display(), "Workspace released"),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(workspace = %self.root.display(), "Workspace already removed")
            }
            Err(e) => warn!(
                workspace = %self.root.display(),
                error = %e,
                "Could not remove workspace"
            ),
        }
    }

    /// Write the raw event payload to the event file, owner read/write only.
    #[tracing::instrument(skip_all, fields(workspace = %self.root.display(), size = payload.len()))]
    pub async fn persist_event(&self, payload: &[u8]) -> Result<PathBuf> {
        let path = self.event_path();
        let write_failure = |e| PipelineError::WriteFailure {
            path: path.clone(),
            source: e,
        };

        let mut options = tokio::fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        options.mode(0o600);

        let mut file = options.open(&path).await.map_err(write_failure)?;
        file.write_all(payload).await.map_err(write_failure)?;
        file.flush().await.map_err(write_failure)?;

        debug!(path = %path.display(), "Event written to disk");
        Ok(path)
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        if self.released {
            return;
        }

        if let Err(e) = std::fs::remove_dir_all(&self.root) {
            if e.kind() != ErrorKind::NotFound {
                warn!(
                    workspace = %self.root.display(),
                    error = %e,
                    "Could not remove abandoned workspace"
                );
            }
        }
    }
}

fn private_dir_builder() -> DirBuilder {
    #[allow(unused_mut)]
    let mut builder = DirBuilder::new();
    #[cfg(unix)]
    builder.mode(0o700);
    builder
}

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }

    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .map_err(|e| PipelineError::IoFailure {
            path: path.to_path_buf(),
            source: e,
        })
}
