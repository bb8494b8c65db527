//! Validation utilities.

use prgate_config::Config;
use prgate_sentry::is_valid_dsn;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Errors on environment variables:\n{}", errors)]
    EnvVarsError { errors: String },
}

fn validate_env_vars(config: &Config) -> Result<(), ValidationError> {
    #[inline]
    fn _missing(error: &mut String, name: &str) {
        error.push_str(&format!("\n  - Missing env. var.: {}", name));
    }

    #[inline]
    fn _invalid(error: &mut String, name: &str, reason: &str) {
        error.push_str(&format!("\n  - Invalid env. var.: {} ({})", name, reason));
    }

    let mut error = String::new();

    // Check server configuration
    if config.server.bind_ip.is_empty() {
        _missing(&mut error, "PRGATE_SERVER_BIND_IP");
    }
    if config.server.bind_port == 0 {
        _missing(&mut error, "PRGATE_SERVER_BIND_PORT");
    }
    if !config.server.webhook_path.starts_with('/') {
        _invalid(
            &mut error,
            "PRGATE_SERVER_WEBHOOK_PATH",
            "must start with '/'",
        );
    }

    // Check workspace configuration
    if config.workspace.temp_root.as_os_str().is_empty() {
        _missing(&mut error, "PRGATE_WORKSPACE_TEMP_ROOT");
    }

    // Check verification configuration
    if config.verify.executable.is_empty() {
        _missing(&mut error, "PRGATE_VERIFY_EXECUTABLE");
    }
    if config.verify.command.is_empty() {
        _missing(&mut error, "PRGATE_VERIFY_COMMAND");
    }

    if !config.sentry.url.is_empty() && !is_valid_dsn(&config.sentry.url) {
        _invalid(&mut error, "PRGATE_SENTRY_URL", "not a valid DSN");
    }

    if error.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::EnvVarsError { errors: error })
    }
}

/// Validate configuration.
pub fn validate_configuration(config: &Config) -> Result<(), ValidationError> {
    validate_env_vars(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        let mut config = Config::from_env_no_version().unwrap();
        config.server.bind_ip = "127.0.0.1".into();
        config.server.bind_port = 3000;
        config.server.webhook_path = "/github".into();
        config.workspace.temp_root = "/tmp".into();
        config.verify.executable = "/usr/local/bin/verifier".into();
        config.verify.command = "enforce".into();
        config.sentry.url = String::new();
        config
    }

    #[test]
    fn test_valid_configuration() {
        assert!(validate_configuration(&valid_config()).is_ok());
    }

    #[test]
    fn test_all_errors_are_reported() {
        let mut config = valid_config();
        config.server.bind_port = 0;
        config.server.webhook_path = "github".into();
        config.verify.command = String::new();
        config.sentry.url = "not a dsn".into();

        let ValidationError::EnvVarsError { errors } =
            validate_configuration(&config).unwrap_err();
        assert!(errors.contains("PRGATE_SERVER_BIND_PORT"));
        assert!(errors.contains("PRGATE_SERVER_WEBHOOK_PATH"));
        assert!(errors.contains("PRGATE_VERIFY_COMMAND"));
        assert!(errors.contains("PRGATE_SENTRY_URL"));
        assert!(!errors.contains("PRGATE_SERVER_BIND_IP"));
    }

    #[test]
    fn test_verification_executable_is_required() {
        let mut config = valid_config();
        config.verify.executable = String::new();

        let ValidationError::EnvVarsError { errors } =
            validate_configuration(&config).unwrap_err();
        assert!(errors.contains("Missing env. var.: PRGATE_VERIFY_EXECUTABLE"));
    }
}
