use std::path::PathBuf;

use async_trait::async_trait;
use prgate_webhook_types::types::{GhPullRequestAction, GhPullRequestEvent};
use shaku::{Component, HasComponent, Interface};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, field, info, warn, Span};

use super::{InvokeVerificationInterface, MaterializeRepositoryInterface, VerificationRequest};
use crate::{
    references::{resolve_references, PullRequestReferences},
    workspace::{Workspace, WorkspaceManager},
    CoreContext, PipelineStage, Result, RunControl,
};

/// One received pull request payload.
#[derive(Debug, Clone)]
pub struct PipelineRequest {
    /// Raw payload, persisted as-is.
    pub payload: Vec<u8>,
    /// Token cancelling this run.
    pub cancellation: CancellationToken,
}

impl PipelineRequest {
    pub fn new(payload: Vec<u8>) -> Self {
        Self {
            payload,
            cancellation: CancellationToken::new(),
        }
    }
}

/// Terminal outcome of a run which did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The verification process accepted the pull request.
    Verified,
    /// The pull request action does not trigger a run.
    Skipped { action: GhPullRequestAction },
}

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait ProcessPullRequestEventInterface: Interface {
    async fn run<'a>(&self, ctx: &CoreContext<'a>, request: PipelineRequest)
        -> Result<RunOutcome>;
}

/// Full run: resolve, acquire, materialize, persist, verify, then release.
#[derive(Component)]
#[shaku(interface = ProcessPullRequestEventInterface)]
pub(crate) struct ProcessPullRequestEvent;

#[async_trait]
impl ProcessPullRequestEventInterface for ProcessPullRequestEvent {
    #[tracing::instrument(
        skip_all,
        fields(
            pr_number = field::Empty,
            head = field::Empty,
            base = field::Empty,
            workspace = field::Empty
        )
    )]
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        request: PipelineRequest,
    ) -> Result<RunOutcome> {
        let control = RunControl::new(request.cancellation, ctx.config.pipeline.timeout());
        let result = self.process(ctx, &control, &request.payload).await;

        match &result {
            Ok(RunOutcome::Verified) => info!("Pull request verified"),
            Ok(RunOutcome::Skipped { action }) => {
                debug!(action = %action, "Pull request action ignored")
            }
            Err(e) if e.is_verification_result() => {
                warn!(stage = %e.stage(), error = %e, "Pull request rejected by verification")
            }
            Err(e) => error!(stage = %e.stage(), error = %e, "Pipeline run failed"),
        }

        result
    }
}

impl ProcessPullRequestEvent {
    async fn process<'a>(
        &self,
        ctx: &CoreContext<'a>,
        control: &RunControl,
        payload: &[u8],
    ) -> Result<RunOutcome> {
        let event: GhPullRequestEvent = serde_json::from_slice(payload)?;
        if !ctx.config.pipeline.accepts_action(event.action.to_str()) {
            return Ok(RunOutcome::Skipped {
                action: event.action,
            });
        }

        let references =
            resolve_references(&event, ctx.config.workspace.namespace_local_branch)?;
        let span = Span::current();
        span.record("pr_number", references.number);
        span.record("head", references.head_branch.as_str());
        span.record("base", references.base_branch.as_str());

        control.check(PipelineStage::Workspace)?;
        let mut workspace = WorkspaceManager::from_config(&ctx.config.workspace)
            .acquire()
            .await?;
        span.record("workspace", field::display(workspace.root().display()));

        let result = self
            .process_in_workspace(ctx, control, &workspace, &references, payload)
            .await;
        workspace.release().await;

        result.map(|_| RunOutcome::Verified)
    }

    async fn process_in_workspace<'a>(
        &self,
        ctx: &CoreContext<'a>,
        control: &RunControl,
        workspace: &Workspace,
        references: &PullRequestReferences,
        payload: &[u8],
    ) -> Result<()> {
        let materialize_repository: &dyn MaterializeRepositoryInterface =
            ctx.core_module.resolve_ref();
        materialize_repository
            .run(ctx, control, workspace, references)
            .await?;

        control.check(PipelineStage::Persist)?;
        let event_path: PathBuf = workspace.persist_event(payload).await?;

        let invoke_verification: &dyn InvokeVerificationInterface =
            ctx.core_module.resolve_ref();
        invoke_verification
            .run(
                ctx,
                control,
                &VerificationRequest {
                    working_dir: workspace.repo_dir(),
                    event_path,
                    base_ref: references.base_ref(),
                    credential: ctx.config.verify.token.clone(),
                },
            )
            .await?;

        Ok(())
    }
}
