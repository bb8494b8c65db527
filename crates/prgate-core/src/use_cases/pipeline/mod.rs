pub(crate) mod invoke_verification;
pub(crate) mod materialize_repository;
pub(crate) mod process_pull_request_event;

pub use invoke_verification::{InvokeVerificationInterface, VerificationRequest};
pub use materialize_repository::MaterializeRepositoryInterface;
pub use process_pull_request_event::{
    PipelineRequest, ProcessPullRequestEventInterface, RunOutcome,
};

#[cfg(any(test, feature = "testkit"))]
pub use self::{
    invoke_verification::MockInvokeVerificationInterface,
    materialize_repository::MockMaterializeRepositoryInterface,
    process_pull_request_event::MockProcessPullRequestEventInterface,
};
