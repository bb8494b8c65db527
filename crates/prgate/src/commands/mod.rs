//! Commands.

use std::{io::Write, sync::Arc};

use async_trait::async_trait;
use clap::Subcommand;
use prgate_config::Config;
use prgate_core::{CoreContext, CoreModule};
use prgate_git_interface::GitService;
use prgate_process_interface::ProcessService;
use tokio::sync::RwLock;

use self::{
    check_config::CheckConfigCommand, process_event::ProcessEventCommand, server::ServerCommand,
};
use crate::Result;

mod check_config;
mod process_event;
mod server;

pub(crate) struct CommandContext {
    pub config: Config,
    pub core_module: CoreModule,
    pub git_service: Box<dyn GitService>,
    pub process_service: Box<dyn ProcessService>,
    pub writer: Arc<RwLock<dyn Write + Send + Sync>>,
}

impl CommandContext {
    pub fn as_core_context(&self) -> CoreContext {
        CoreContext {
            config: &self.config,
            core_module: &self.core_module,
            git_service: self.git_service.as_ref(),
            process_service: self.process_service.as_ref(),
        }
    }
}

#[async_trait]
pub(crate) trait Command {
    async fn execute(self, ctx: CommandContext) -> Result<()>;
}

/// Command
#[derive(Subcommand)]
pub(crate) enum SubCommand {
    Server(ServerCommand),
    ProcessEvent(ProcessEventCommand),
    CheckConfig(CheckConfigCommand),
}

#[async_trait]
impl Command for SubCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        match self {
            Self::Server(sub) => sub.execute(ctx).await,
            Self::ProcessEvent(sub) => sub.execute(ctx).await,
            Self::CheckConfig(sub) => sub.execute(ctx).await,
        }
    }
}
