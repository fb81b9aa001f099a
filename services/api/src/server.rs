use crate::cli::ServeArgs;
use crate::infra::{AppServices, AppState};
use crate::routes::build_router;
use axum::{middleware, Extension};
use axum_prometheus::PrometheusMetricLayer;
use divorce_prep::auth::{SessionDirectory, StaticSessionDirectory};
use divorce_prep::config::AppConfig;
use divorce_prep::error::AppError;
use divorce_prep::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let directory = StaticSessionDirectory::from_config(&config.admin);
    if directory.is_empty() {
        warn!("no admin tokens configured; back-office routes will reject every request");
    }
    let directory: Arc<dyn SessionDirectory> = Arc::new(directory);

    let services = AppServices::in_memory();
    let app = build_router(&services, directory)
        .layer(Extension(app_state))
        .layer(middleware::from_fn(telemetry::log_requests))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "divorce-prep service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
