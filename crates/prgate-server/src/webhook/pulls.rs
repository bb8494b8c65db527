//! Pull webhook handlers.

use std::sync::Arc;

use actix_web::HttpResponse;
use prgate_core::use_cases::pipeline::{PipelineRequest, ProcessPullRequestEventInterface};
use shaku::HasComponent;
use tracing::{debug, warn};

use crate::{
    metrics::{record_run_outcome, PIPELINE_RUNS_STARTED},
    server::AppContext,
};

/// Acknowledge the payload now, process it in the background.
pub(crate) fn pull_request_event(ctx: Arc<AppContext>, payload: Vec<u8>) -> HttpResponse {
    let cancellation = ctx.cancellation.child_token();

    tokio::spawn(async move {
        let _permit = match ctx.acquire_run_permit().await {
            Some(permit) => permit,
            None => {
                warn!("Server shutting down, pull request event dropped");
                return;
            }
        };

        PIPELINE_RUNS_STARTED.inc();
        debug!(size = payload.len(), "Starting pipeline run");

        let core_ctx = ctx.as_core_context();
        let process_pull_request_event: &dyn ProcessPullRequestEventInterface =
            core_ctx.core_module.resolve_ref();
        let result = process_pull_request_event
            .run(
                &core_ctx,
                PipelineRequest {
                    payload,
                    cancellation,
                },
            )
            .await;

        record_run_outcome(&result);
    });

    HttpResponse::Accepted().body("Pull request.")
}
