use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::{ProcessError, ProcessExit, ProcessService, ProcessSpec, Result};

/// Process service spawning children through tokio.
///
/// Children write directly to the parent's stdout and stderr, and are killed
/// when the returned future is dropped before completion.
#[derive(Clone, Default)]
pub struct TokioProcessService {
    _private: (),
}

impl TokioProcessService {
    /// Creates a tokio process service.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

#[async_trait]
impl ProcessService for TokioProcessService {
    #[tracing::instrument(skip_all, fields(program = %spec.program.display(), args = ?spec.args))]
    async fn run(&self, spec: &ProcessSpec) -> Result<ProcessExit> {
        let mut child = Command::new(&spec.program)
            .args(&spec.args)
            .current_dir(&spec.working_dir)
            .env_clear()
            .envs(spec.env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| ProcessError::Spawn {
                program: spec.program.clone(),
                source: e,
            })?;

        debug!(pid = ?child.id(), "Process started");

        let status = child.wait().await.map_err(|e| ProcessError::Wait {
            program: spec.program.clone(),
            source: e,
        })?;

        Ok(ProcessExit {
            code: status.code(),
        })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use std::path::PathBuf;

    use pretty_assertions::assert_eq;

    use super::*;

    fn shell(script: &str, working_dir: PathBuf, env: Vec<(String, String)>) -> ProcessSpec {
        ProcessSpec {
            program: "/bin/sh".into(),
            args: vec!["-c".into(), script.into()],
            working_dir,
            env,
        }
    }

    #[tokio::test]
    async fn exit_code_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let exit = TokioProcessService::new()
            .run(&shell("exit 3", dir.path().into(), vec![]))
            .await
            .unwrap();

        assert_eq!(exit, ProcessExit { code: Some(3) });
        assert!(!exit.is_success());
    }

    #[tokio::test]
    async fn environment_is_not_inherited() {
        std::env::set_var("PRGATE_PROCESS_TEST_LEAK", "1");
        let dir = tempfile::tempdir().unwrap();

        let exit = TokioProcessService::new()
            .run(&shell(
                r#"test -z "$PRGATE_PROCESS_TEST_LEAK" && test "$EXPECTED" = "yes" && test "$(pwd -P)" = "$DIR""#,
                dir.path().into(),
                vec![
                    ("EXPECTED".into(), "yes".into()),
                    (
                        "DIR".into(),
                        dir.path().canonicalize().unwrap().display().to_string(),
                    ),
                ],
            ))
            .await
            .unwrap();

        assert!(exit.is_success());
    }

    #[tokio::test]
    async fn missing_program_is_a_spawn_error() {
        let dir = tempfile::tempdir().unwrap();
        let spec = ProcessSpec {
            program: "/nonexistent/verifier".into(),
            working_dir: dir.path().into(),
            ..Default::default()
        };

        assert!(matches!(
            TokioProcessService::new().run(&spec).await,
            Err(ProcessError::Spawn { .. })
        ));
    }
}
