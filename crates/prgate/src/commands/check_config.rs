use async_trait::async_trait;
use clap::Parser;
use prgate_config::Config;

use super::{Command, CommandContext};
use crate::Result;

const REDACTED: &str = "<redacted>";

/// Validate configuration and show effective values
#[derive(Parser)]
pub(crate) struct CheckConfigCommand;

#[async_trait]
impl Command for CheckConfigCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let mut writer = ctx.writer.write().await;
        writeln!(writer, "Configuration is valid.")?;

        for (name, value) in describe_config(&ctx.config) {
            writeln!(writer, "  {name} = {value}")?;
        }

        Ok(())
    }
}

fn describe_config(config: &Config) -> Vec<(&'static str, String)> {
    let secret = |value: &str| {
        if value.is_empty() {
            String::new()
        } else {
            REDACTED.to_string()
        }
    };

    vec![
        ("PRGATE_SERVER_BIND_IP", config.server.bind_ip.clone()),
        ("PRGATE_SERVER_BIND_PORT", config.server.bind_port.to_string()),
        (
            "PRGATE_SERVER_WORKERS_COUNT",
            config
                .server
                .workers_count
                .map(|c| c.to_string())
                .unwrap_or_default(),
        ),
        ("PRGATE_SERVER_WEBHOOK_PATH", config.server.webhook_path.clone()),
        ("PRGATE_GIT_DRIVER", config.git.driver.to_string()),
        ("PRGATE_GIT_EXECUTABLE", config.git.executable.clone()),
        (
            "PRGATE_WORKSPACE_TEMP_ROOT",
            config.workspace.temp_root.display().to_string(),
        ),
        ("PRGATE_WORKSPACE_PREFIX", config.workspace.prefix.clone()),
        (
            "PRGATE_WORKSPACE_NAMESPACE_LOCAL_BRANCH",
            config.workspace.namespace_local_branch.to_string(),
        ),
        ("PRGATE_VERIFY_EXECUTABLE", config.verify.executable.clone()),
        ("PRGATE_VERIFY_COMMAND", config.verify.command.clone()),
        ("PRGATE_VERIFY_REPORTER", config.verify.reporter.clone()),
        ("PRGATE_VERIFY_TOKEN", secret(&config.verify.token)),
        (
            "PRGATE_PIPELINE_MAX_CONCURRENT_RUNS",
            config.pipeline.max_concurrent_runs.to_string(),
        ),
        (
            "PRGATE_PIPELINE_TIMEOUT_SECONDS",
            config.pipeline.timeout_seconds.to_string(),
        ),
        ("PRGATE_PIPELINE_ACTIONS", config.pipeline.actions.join(",")),
        (
            "PRGATE_LOGGING_USE_BUNYAN",
            config.logging.use_bunyan.to_string(),
        ),
        ("PRGATE_SENTRY_URL", secret(&config.sentry.url)),
        (
            "PRGATE_SENTRY_TRACES_SAMPLE_RATE",
            config.sentry.traces_sample_rate.to_string(),
        ),
    ]
}
