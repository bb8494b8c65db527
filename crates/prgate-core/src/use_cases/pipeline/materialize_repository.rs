use async_trait::async_trait;
use shaku::{Component, Interface};
use tracing::info;

use crate::{
    references::PullRequestReferences, workspace::Workspace, CoreContext, PipelineError,
    PipelineStage, Result, RunControl,
};

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait MaterializeRepositoryInterface: Interface {
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        control: &RunControl,
        workspace: &Workspace,
        references: &PullRequestReferences,
    ) -> Result<()>;
}

/// Clone, fetch the pull request head, then check it out in the workspace.
///
/// Each step only starts once the previous one succeeded.
#[derive(Component)]
#[shaku(interface = MaterializeRepositoryInterface)]
pub(crate) struct MaterializeRepository;

#[async_trait]
impl MaterializeRepositoryInterface for MaterializeRepository {
    #[tracing::instrument(
        skip_all,
        fields(
            clone_url = %references.clone_url,
            refspec = references.refspec.pull_request(),
            branch = %references.local_branch
        )
    )]
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        control: &RunControl,
        workspace: &Workspace,
        references: &PullRequestReferences,
    ) -> Result<()> {
        let repo_dir = workspace.repo_dir();

        info!(clone_url = %references.clone_url, "Cloning repository");
        control
            .guard(PipelineStage::Clone, async {
                ctx.git_service
                    .clone_repository(&references.clone_url, &repo_dir)
                    .await
                    .map_err(|e| PipelineError::CloneFailure {
                        url: references.clone_url.clone(),
                        source: e,
                    })
            })
            .await?;

        info!(refspec = references.refspec.pull_request(), "Fetching pull request head");
        control
            .guard(PipelineStage::Fetch, async {
                ctx.git_service
                    .fetch(&repo_dir, &references.refspec.fetch_list())
                    .await
                    .map_err(|e| PipelineError::FetchFailure {
                        refspec: references.refspec.pull_request().to_string(),
                        source: e,
                    })
            })
            .await?;

        info!(branch = %references.local_branch, "Checking out pull request branch");
        control
            .guard(PipelineStage::Checkout, async {
                ctx.git_service
                    .checkout(&repo_dir, &references.local_branch)
                    .await
                    .map_err(|e| PipelineError::CheckoutFailure {
                        branch: references.local_branch.clone(),
                        source: e,
                    })
            })
            .await
    }
}
