use std::path::PathBuf;

use anyhow::Context;
use async_trait::async_trait;
use clap::Parser;
use prgate_core::{
    use_cases::pipeline::{PipelineRequest, ProcessPullRequestEventInterface, RunOutcome},
    workspace::WorkspaceManager,
};
use prgate_webhook_types::EventType;
use shaku::HasComponent;
use tracing::warn;

use super::{Command, CommandContext};
use crate::Result;

/// Run the pipeline once on a payload stored in a file
#[derive(Parser)]
pub(crate) struct ProcessEventCommand {
    /// Payload path
    path: PathBuf,
    /// Event type, as sent in the X-GitHub-Event header
    #[arg(long, default_value = "pull_request")]
    event_type: String,
}

#[async_trait]
impl Command for ProcessEventCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let event_type = EventType::try_from(self.event_type.as_str())?;
        let payload = tokio::fs::read(&self.path)
            .await
            .with_context(|| format!("Could not read payload from {}", self.path.display()))?;

        if event_type == EventType::Ping {
            let mut writer = ctx.writer.write().await;
            writeln!(writer, "Ping event, nothing to do.")?;
            return Ok(());
        }

        WorkspaceManager::from_config(&ctx.config.workspace)
            .ensure_root()
            .await?;

        let request = PipelineRequest::new(payload);
        let cancellation = request.cancellation.clone();
        let interrupt = tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupted, cancelling run");
                cancellation.cancel();
            }
        });

        let core_ctx = ctx.as_core_context();
        let process_pull_request_event: &dyn ProcessPullRequestEventInterface =
            core_ctx.core_module.resolve_ref();
        let result = process_pull_request_event.run(&core_ctx, request).await;
        interrupt.abort();

        let mut writer = ctx.writer.write().await;
        match result? {
            RunOutcome::Verified => writeln!(writer, "Pull request verified.")?,
            RunOutcome::Skipped { action } => {
                writeln!(writer, "Pull request action '{}' ignored.", action)?
            }
        }

        Ok(())
    }
}
