//! Sentry integration.

use std::{future::Future, str::FromStr};

use prgate_config::Config;
pub use sentry::integrations::tracing as sentry_tracing;
use sentry::{integrations::debug_images::DebugImagesIntegration, types::Dsn, ClientOptions};
use tracing::{info, warn};

/// Check that a Sentry DSN can be parsed.
pub fn is_valid_dsn(url: &str) -> bool {
    Dsn::from_str(url).is_ok()
}

/// Configure Sentry integration by wrapping a function.
pub async fn with_sentry_configuration<T, Fut, E>(config: &Config, func: T) -> Result<(), E>
where
    T: FnOnce() -> Fut,
    Fut: Future<Output = Result<(), E>>,
{
    let _guard = {
        if config.sentry.url.is_empty() {
            None
        } else {
            match Dsn::from_str(&config.sentry.url) {
                Ok(dsn) => {
                    info!("Sentry integration enabled.");

                    // Enable backtraces
                    std::env::set_var("RUST_BACKTRACE", "1");

                    let mut options =
                        ClientOptions::new().add_integration(DebugImagesIntegration::default());

                    options.dsn = Some(dsn);
                    options.default_integrations = true;
                    options.in_app_exclude.push("actix");
                    options.in_app_exclude.push("sentry");
                    options.in_app_exclude.push("tokio");
                    options.release = Some(config.version.to_string().into());
                    options.attach_stacktrace = true;
                    options.traces_sample_rate = config.sentry.traces_sample_rate;
                    options.debug = false;

                    Some(sentry::init(options))
                }
                Err(e) => {
                    warn!(error = %e, "Invalid Sentry URL, Sentry integration disabled.");
                    None
                }
            }
        }
    };

    func().await
}
