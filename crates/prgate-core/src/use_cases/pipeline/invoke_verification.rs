use std::path::PathBuf;

use async_trait::async_trait;
use prgate_config::VerifyConfig;
use prgate_process_interface::{ProcessExit, ProcessSpec};
use shaku::{Component, Interface};
use tracing::info;

use crate::{CoreContext, PipelineError, PipelineStage, Result, RunControl};

/// Environment variable carrying the platform credential.
pub const TOKEN_ENV_VAR: &str = "INPUT_TOKEN";
/// Environment variable carrying the event file path.
pub const EVENT_PATH_ENV_VAR: &str = "GITHUB_EVENT_PATH";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationRequest {
    pub working_dir: PathBuf,
    pub event_path: PathBuf,
    pub base_ref: String,
    pub credential: String,
}

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait InvokeVerificationInterface: Interface {
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        control: &RunControl,
        request: &VerificationRequest,
    ) -> Result<ProcessExit>;
}

#[derive(Component)]
#[shaku(interface = InvokeVerificationInterface)]
pub(crate) struct InvokeVerification;

#[async_trait]
impl InvokeVerificationInterface for InvokeVerification {
    #[tracing::instrument(skip_all, fields(base_ref = %request.base_ref))]
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        control: &RunControl,
        request: &VerificationRequest,
    ) -> Result<ProcessExit> {
        let spec = build_process_spec(&ctx.config.verify, request);
        info!(
            program = %spec.program.display(),
            args = ?spec.args,
            "Starting verification process"
        );

        let exit = control
            .guard(PipelineStage::Verify, async {
                ctx.process_service
                    .run(&spec)
                    .await
                    .map_err(|e| PipelineError::SpawnFailure { source: e })
            })
            .await?;

        if exit.is_success() {
            Ok(exit)
        } else {
            Err(PipelineError::ProcessFailure { code: exit.code })
        }
    }
}

/// The child only sees the credential and the event path.
fn build_process_spec(config: &VerifyConfig, request: &VerificationRequest) -> ProcessSpec {
    ProcessSpec {
        program: PathBuf::from(&config.executable),
        args: vec![
            config.command.clone(),
            format!("--reporter={}", config.reporter),
            format!("--commit-ref={}", request.base_ref),
        ],
        working_dir: request.working_dir.clone(),
        env: vec![
            (TOKEN_ENV_VAR.into(), request.credential.clone()),
            (
                EVENT_PATH_ENV_VAR.into(),
                request.event_path.to_string_lossy().into_owned(),
            ),
        ],
    }
}
