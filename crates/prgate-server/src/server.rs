//! Server module.

use std::sync::Arc;

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    middleware::Logger,
    web::{self, Data},
    App, HttpResponse, HttpServer,
};
use actix_web_prom::PrometheusMetrics;
use prgate_config::Config;
use prgate_core::{workspace::WorkspaceManager, CoreContext, CoreModule};
use prgate_git_interface::GitService;
use prgate_process_interface::ProcessService;
use sentry_actix::Sentry;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::{
    health::health_check_route, metrics::build_metrics_handler, webhook::event_handler, Result,
    ServerError,
};

/// App context.
pub struct AppContext {
    /// Config.
    pub config: Config,
    /// Core module.
    pub core_module: CoreModule,
    /// Git adapter.
    pub git_service: Box<dyn GitService>,
    /// Process adapter.
    pub process_service: Box<dyn ProcessService>,
    /// Bound on simultaneous runs, if any.
    pub run_limiter: Option<Arc<Semaphore>>,
    /// Parent of every run cancellation token.
    pub cancellation: CancellationToken,
}

impl AppContext {
    /// Create new app context using adapters.
    pub fn new_with_adapters(
        config: Config,
        core_module: CoreModule,
        git_service: Box<dyn GitService>,
        process_service: Box<dyn ProcessService>,
    ) -> Self {
        let run_limiter = match config.pipeline.max_concurrent_runs {
            0 => None,
            count => Some(Arc::new(Semaphore::new(count as usize))),
        };

        Self {
            config,
            core_module,
            git_service,
            process_service,
            run_limiter,
            cancellation: CancellationToken::new(),
        }
    }

    /// Convert the context for the core module.
    pub fn as_core_context(&self) -> CoreContext {
        CoreContext {
            config: &self.config,
            core_module: &self.core_module,
            git_service: self.git_service.as_ref(),
            process_service: self.process_service.as_ref(),
        }
    }

    /// Wait for a run slot. `None` when the server is shutting down.
    pub(crate) async fn acquire_run_permit(&self) -> Option<Option<OwnedSemaphorePermit>> {
        let limiter = match &self.run_limiter {
            Some(limiter) => limiter.clone(),
            None => return Some(None),
        };

        tokio::select! {
            permit = limiter.acquire_owned() => permit.ok().map(Some),
            _ = self.cancellation.cancelled() => None,
        }
    }
}

/// Build Actix app.
pub fn build_actix_app(
    context: Data<AppContext>,
    prometheus: PrometheusMetrics,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let webhook_path = context.config.server.webhook_path.clone();

    App::new()
        .app_data(context)
        .wrap(prometheus)
        .wrap(Sentry::new())
        .wrap(Logger::default())
        .route(&webhook_path, web::post().to(event_handler))
        .route("/health", web::get().to(health_check_route))
        .route(
            "/",
            web::get().to(|| async {
                HttpResponse::Ok().json(serde_json::json!({"message": "Welcome on prgate!" }))
            }),
        )
}

/// Run server until it stops, then cancel every pending run.
pub async fn run_server(context: AppContext) -> Result<()> {
    WorkspaceManager::from_config(&context.config.workspace)
        .ensure_root()
        .await
        .map_err(|e| ServerError::WorkspaceRootError { source: e })?;

    let address = get_bind_address(&context.config);

    info!(
        version = context.config.version,
        address = %address,
        webhook_path = %context.config.server.webhook_path,
        temp_root = %context.config.workspace.temp_root.display(),
        message = "Starting server",
    );

    let context = Data::new(context);
    let result = run_server_internal(address, context.clone()).await;

    info!("Server stopped, cancelling pending runs");
    context.cancellation.cancel();

    result
}

fn get_bind_address(config: &Config) -> String {
    format!("{}:{}", config.server.bind_ip, config.server.bind_port)
}

async fn run_server_internal(ip_with_port: String, context: Data<AppContext>) -> Result<()> {
    let prometheus = build_metrics_handler()?;
    let workers_count = context.config.server.workers_count;

    let mut server =
        HttpServer::new(move || build_actix_app(context.clone(), prometheus.clone()));

    if let Some(workers) = workers_count {
        server = server.workers(workers as usize);
    }

    server
        .bind(ip_with_port)
        .map_err(|e| ServerError::IoError { source: e })?
        .run()
        .await
        .map_err(|e| ServerError::IoError { source: e })
}
