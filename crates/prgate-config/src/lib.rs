//! Config module.

mod drivers;

use std::{env, path::PathBuf, str::FromStr, time::Duration};

pub use drivers::{DriverError, GitDriver};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {source}")]
    InvalidDriver { name: String, source: DriverError },
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server bind IP.
    pub bind_ip: String,
    /// Server bind port.
    pub bind_port: u16,
    /// Server workers count.
    pub workers_count: Option<u16>,
    /// Path of the webhook endpoint.
    pub webhook_path: String,
}

#[derive(Debug, Clone)]
pub struct GitConfig {
    /// Git driver.
    pub driver: GitDriver,
    /// Git executable used by the CLI driver.
    pub executable: String,
}

#[derive(Debug, Clone)]
pub struct WorkspaceConfig {
    /// Directory under which workspaces are allocated.
    pub temp_root: PathBuf,
    /// Workspace directory name prefix.
    pub prefix: String,
    /// Prefix the synthetic local branch with the pull request number.
    pub namespace_local_branch: bool,
}

#[derive(Debug, Clone)]
pub struct VerifyConfig {
    /// Verification entry point (`self` for the current executable).
    pub executable: String,
    /// Verification subcommand.
    pub command: String,
    /// Reporter passed to the verification process.
    pub reporter: String,
    /// Credential forwarded to the verification process.
    pub token: String,
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Maximum simultaneous runs (0 means unbounded).
    pub max_concurrent_runs: u16,
    /// Per-run deadline in seconds (0 means none).
    pub timeout_seconds: u64,
    /// Pull request actions triggering a run (empty means all).
    pub actions: Vec<String>,
}

impl PipelineConfig {
    /// Per-run deadline, if any.
    pub fn timeout(&self) -> Option<Duration> {
        if self.timeout_seconds == 0 {
            None
        } else {
            Some(Duration::from_secs(self.timeout_seconds))
        }
    }

    /// Whether a pull request action should trigger a run.
    pub fn accepts_action(&self, action: &str) -> bool {
        self.actions.is_empty() || self.actions.iter().any(|a| a == action)
    }
}

#[derive(Debug, Clone)]
pub struct SentryConfig {
    /// Sentry URL.
    pub url: String,
    /// Traces sample rate (between 0 and 1) for Sentry
    pub traces_sample_rate: f32,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Use bunyan logging.
    pub use_bunyan: bool,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server options.
    pub server: ServerConfig,
    /// Git options.
    pub git: GitConfig,
    /// Workspace options.
    pub workspace: WorkspaceConfig,
    /// Verification options.
    pub verify: VerifyConfig,
    /// Pipeline options.
    pub pipeline: PipelineConfig,
    /// Logging options.
    pub logging: LoggingConfig,
    /// Sentry options.
    pub sentry: SentryConfig,
    /// App version
    pub version: String,
}

impl Config {
    /// Create configuration from environment.
    pub fn from_env(version: String) -> Result<Config, ConfigError> {
        Ok(Config {
            server: ServerConfig {
                bind_ip: env_to_str("PRGATE_SERVER_BIND_IP", "0.0.0.0"),
                bind_port: env_to_u16("PRGATE_SERVER_BIND_PORT", 3000),
                workers_count: env_to_optional_u16("PRGATE_SERVER_WORKERS_COUNT", None),
                webhook_path: env_to_str("PRGATE_SERVER_WEBHOOK_PATH", "/github"),
            },
            git: GitConfig {
                driver: env_to_driver("PRGATE_GIT_DRIVER", "cli")?,
                executable: env_to_str("PRGATE_GIT_EXECUTABLE", "git"),
            },
            workspace: WorkspaceConfig {
                temp_root: PathBuf::from(env_to_str("PRGATE_WORKSPACE_TEMP_ROOT", "/tmp")),
                prefix: env_to_str("PRGATE_WORKSPACE_PREFIX", "prgate"),
                namespace_local_branch: env_to_bool(
                    "PRGATE_WORKSPACE_NAMESPACE_LOCAL_BRANCH",
                    false,
                ),
            },
            verify: VerifyConfig {
                executable: env_to_str("PRGATE_VERIFY_EXECUTABLE", ""),
                command: env_to_str("PRGATE_VERIFY_COMMAND", "enforce"),
                reporter: env_to_str("PRGATE_VERIFY_REPORTER", "github"),
                token: env_to_raw_str(
                    "PRGATE_VERIFY_TOKEN",
                    &env_to_raw_str("INPUT_TOKEN", ""),
                ),
            },
            pipeline: PipelineConfig {
                max_concurrent_runs: env_to_u16("PRGATE_PIPELINE_MAX_CONCURRENT_RUNS", 0),
                timeout_seconds: env_to_u64("PRGATE_PIPELINE_TIMEOUT_SECONDS", 0),
                actions: parse_list(&env_to_str("PRGATE_PIPELINE_ACTIONS", "")),
            },
            logging: LoggingConfig {
                use_bunyan: env_to_bool("PRGATE_LOGGING_USE_BUNYAN", false),
            },
            sentry: SentryConfig {
                url: env_to_str("PRGATE_SENTRY_URL", ""),
                traces_sample_rate: env_to_f32("PRGATE_SENTRY_TRACES_SAMPLE_RATE", 0.0),
            },
            version,
        })
    }

    pub fn from_env_no_version() -> Result<Self, ConfigError> {
        Self::from_env("0.0.0".into())
    }
}

fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

fn env_to_driver(name: &str, default: &str) -> Result<GitDriver, ConfigError> {
    GitDriver::from_str(&env_to_str(name, default)).map_err(|e| ConfigError::InvalidDriver {
        name: name.into(),
        source: e,
    })
}

fn env_to_u16(name: &str, default: u16) -> u16 {
    env::var(name)
        .map(|e| e.parse().unwrap_or(default))
        .unwrap_or(default)
}

fn env_to_optional_u16(name: &str, default: Option<u16>) -> Option<u16> {
    env::var(name)
        .map(|e| e.parse::<u16>().map(Some).unwrap_or(default))
        .unwrap_or(default)
}

fn env_to_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .map(|e| e.parse().unwrap_or(default))
        .unwrap_or(default)
}

fn env_to_f32(name: &str, default: f32) -> f32 {
    env::var(name)
        .map(|e| e.parse().unwrap_or(default))
        .unwrap_or(default)
}

fn env_to_bool(name: &str, default: bool) -> bool {
    env::var(name).map(|e| !e.is_empty()).unwrap_or(default)
}

fn env_to_str(name: &str, default: &str) -> String {
    env::var(name)
        .unwrap_or_else(|_e| default.to_string())
        .replace("\\n", "\n")
}

/// Read a value forwarded as-is, without escape handling.
fn env_to_raw_str(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_e| default.to_string())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn list_values_are_trimmed() {
        assert_eq!(
            parse_list(" opened, synchronize ,,reopened"),
            vec!["opened", "synchronize", "reopened"]
        );
        assert!(parse_list("").is_empty());
    }

    #[test]
    fn empty_action_filter_accepts_everything() {
        let mut config = PipelineConfig {
            max_concurrent_runs: 0,
            timeout_seconds: 0,
            actions: vec![],
        };
        assert!(config.accepts_action("closed"));
        assert_eq!(config.timeout(), None);

        config.actions = vec!["opened".into()];
        config.timeout_seconds = 30;
        assert!(config.accepts_action("opened"));
        assert!(!config.accepts_action("closed"));
        assert_eq!(config.timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn raw_values_keep_escapes() {
        env::set_var("PRGATE_TEST_RAW_TOKEN", "ghs_abc\\ndef");
        assert_eq!(env_to_raw_str("PRGATE_TEST_RAW_TOKEN", ""), "ghs_abc\\ndef");
        assert_eq!(env_to_str("PRGATE_TEST_RAW_TOKEN", ""), "ghs_abc\ndef");
        assert_eq!(
            env_to_raw_str("PRGATE_TEST_RAW_TOKEN_UNSET", "fallback"),
            "fallback"
        );
    }
}
