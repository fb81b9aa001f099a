use crate::infra::{AppServices, AppState};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use divorce_prep::admin::admin_router;
use divorce_prep::auth::SessionDirectory;
use divorce_prep::consultation::consultation_router;
use divorce_prep::content::blog::blog_router;
use divorce_prep::content::guides::guides_router;
use divorce_prep::tools::calculator::calculator_router;
use divorce_prep::tools::diagnosis::diagnosis_router;
use serde_json::json;
use std::sync::Arc;

/// Public API, admin API and the operational endpoints in one router.
pub(crate) fn build_router(services: &AppServices, directory: Arc<dyn SessionDirectory>) -> Router {
    calculator_router(services.calculator.clone())
        .merge(diagnosis_router(services.diagnosis.clone()))
        .merge(blog_router(services.blog.clone()))
        .merge(guides_router())
        .merge(consultation_router(services.consultations.clone()))
        .merge(admin_router(
            services.blog.clone(),
            services.consultations.clone(),
            directory,
        ))
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Acquire);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
