//! Event-to-workspace pipeline.

#![warn(clippy::all)]
#![allow(clippy::new_without_default)]

mod context;
pub mod errors;
pub mod references;
pub mod run_control;
pub mod use_cases;
pub mod workspace;

pub use context::CoreContext;
pub use errors::{PipelineError, PipelineStage, Result};
pub use run_control::RunControl;
use shaku::module;
use use_cases::pipeline::{
    invoke_verification::InvokeVerification, materialize_repository::MaterializeRepository,
    process_pull_request_event::ProcessPullRequestEvent,
};

module! {
    pub CoreModule {
        components = [
            MaterializeRepository, InvokeVerification, ProcessPullRequestEvent
        ],
        providers = []
    }
}
