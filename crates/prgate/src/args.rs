use std::sync::Arc;

use clap::Parser;
use prgate_config::{Config, GitDriver};
use prgate_core::CoreModule;
use prgate_git_cli::CliGitService;
use prgate_git_interface::GitService;
use prgate_git_null::NullGitService;
use prgate_process_interface::TokioProcessService;
use prgate_sentry::with_sentry_configuration;
use tokio::sync::RwLock;
use tracing::info;

use crate::{
    commands::{Command, CommandContext, SubCommand},
    Result,
};

#[derive(Parser)]
#[command(about = None, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    cmd: SubCommand,
}

pub struct CommandExecutor;

impl CommandExecutor {
    pub fn parse_args(config: Config, args: Args) -> Result<()> {
        let sync = |config: Config, args: Args| async move {
            let core_module = CoreModule::builder().build();

            let git_service: Box<dyn GitService> = match config.git.driver {
                GitDriver::Cli => {
                    info!(executable = %config.git.executable, "Using CliGitService git driver");
                    Box::new(CliGitService::new(config.git.executable.clone()))
                }
                GitDriver::Null => {
                    info!("Using NullGitService git driver");
                    Box::new(NullGitService::new())
                }
            };

            let ctx = CommandContext {
                config: config.clone(),
                core_module,
                git_service,
                process_service: Box::new(TokioProcessService::new()),
                writer: Arc::new(RwLock::new(std::io::stdout())),
            };

            with_sentry_configuration(&config.clone(), || async {
                Self::parse_args_async(args, ctx).await
            })
            .await
        };

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;

        actix_rt::System::with_tokio_rt(move || runtime).block_on(sync(config, args))
    }

    pub(crate) async fn parse_args_async(args: Args, ctx: CommandContext) -> Result<()> {
        args.cmd.execute(ctx).await
    }
}
