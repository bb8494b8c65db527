use std::sync::Arc;

use clap::Parser;
use prgate_config::Config;
use prgate_core::CoreModule;
use prgate_git_interface::MockGitService;
use prgate_process_interface::MockProcessService;
use tempfile::TempDir;
use tokio::sync::RwLock;

use crate::{
    args::{Args, CommandExecutor},
    commands::CommandContext,
    Result,
};

pub(crate) struct CommandContextTest {
    pub config: Config,
    pub core_module: CoreModule,
    pub git_service: MockGitService,
    pub process_service: MockProcessService,
    pub temp_root: TempDir,
}

impl CommandContextTest {
    pub fn new() -> Self {
        let temp_root = tempfile::tempdir().unwrap();
        let mut config = Config::from_env_no_version().unwrap();
        config.workspace.temp_root = temp_root.path().join("workspaces");
        config.verify.executable = "/usr/local/bin/verifier".into();
        config.verify.token = "secret-token".into();
        config.pipeline.actions = vec![];
        config.pipeline.timeout_seconds = 0;

        Self {
            config,
            core_module: CoreModule::builder().build(),
            git_service: MockGitService::new(),
            process_service: MockProcessService::new(),
            temp_root,
        }
    }
}

/// Run a command, returning what it wrote.
pub(crate) async fn test_command(ctx: CommandContextTest, command_args: &[&str]) -> Result<String> {
    let buf = Arc::new(RwLock::new(Vec::<u8>::new()));

    let command_args = {
        let mut tmp_args = vec!["prgate"];
        tmp_args.extend(command_args);
        tmp_args
    };

    let args = Args::try_parse_from(command_args)?;

    let CommandContextTest {
        config,
        core_module,
        git_service,
        process_service,
        temp_root,
    } = ctx;
    let command_ctx = CommandContext {
        config,
        core_module,
        git_service: Box::new(git_service),
        process_service: Box::new(process_service),
        writer: buf.clone(),
    };
    CommandExecutor::parse_args_async(args, command_ctx).await?;
    drop(temp_root);

    let vec = buf.read().await.to_vec();
    Ok(String::from_utf8(vec)?)
}
