use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};

use super::domain::DiagnosisQuestion;
use super::repository::{DiagnosisRecord, DiagnosisRepository};
use super::service::{DiagnosisResponse, DiagnosisService};
use super::validation::DiagnosisRequest;
use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::session::SessionId;

/// Router builder exposing the diagnosis questionnaire.
pub fn diagnosis_router<R>(service: Arc<DiagnosisService<R>>) -> Router
where
    R: DiagnosisRepository + 'static,
{
    Router::new()
        .route("/api/diagnosis", post(diagnose_handler::<R>))
        .route("/api/diagnosis/questions", get(questions_handler::<R>))
        .route(
            "/api/diagnosis/sessions/:session_id",
            get(history_handler::<R>),
        )
        .with_state(service)
}

pub(crate) async fn diagnose_handler<R>(
    State(service): State<Arc<DiagnosisService<R>>>,
    payload: Result<Json<DiagnosisRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<DiagnosisResponse>>, ApiError>
where
    R: DiagnosisRepository + 'static,
{
    let Json(request) = payload?;
    let response = service.diagnose(request)?;
    Ok(Json(ApiResponse::ok(response)))
}

pub(crate) async fn questions_handler<R>(
    State(service): State<Arc<DiagnosisService<R>>>,
) -> Json<ApiResponse<&'static [DiagnosisQuestion]>>
where
    R: DiagnosisRepository + 'static,
{
    Json(ApiResponse::ok(service.questions()))
}

pub(crate) async fn history_handler<R>(
    State(service): State<Arc<DiagnosisService<R>>>,
    Path(session_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<DiagnosisRecord>>>, ApiError>
where
    R: DiagnosisRepository + 'static,
{
    let records = service.history(&SessionId(session_id))?;
    Ok(Json(ApiResponse::ok(records)))
}
