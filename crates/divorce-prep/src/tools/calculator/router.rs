use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};

use super::repository::{CalculationRecord, CalculationRepository};
use super::service::{CalculationResponse, ChildSupportService};
use super::validation::CalculatorRequest;
use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::session::SessionId;

/// Router builder exposing the child-support calculator.
pub fn calculator_router<R>(service: Arc<ChildSupportService<R>>) -> Router
where
    R: CalculationRepository + 'static,
{
    Router::new()
        .route("/api/calculator", post(calculate_handler::<R>))
        .route(
            "/api/calculator/sessions/:session_id",
            get(history_handler::<R>),
        )
        .with_state(service)
}

pub(crate) async fn calculate_handler<R>(
    State(service): State<Arc<ChildSupportService<R>>>,
    payload: Result<Json<CalculatorRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<CalculationResponse>>, ApiError>
where
    R: CalculationRepository + 'static,
{
    let Json(request) = payload?;
    let response = service.calculate(request)?;
    Ok(Json(ApiResponse::ok(response)))
}

pub(crate) async fn history_handler<R>(
    State(service): State<Arc<ChildSupportService<R>>>,
    Path(session_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<CalculationRecord>>>, ApiError>
where
    R: CalculationRepository + 'static,
{
    let records = service.history(&SessionId(session_id))?;
    Ok(Json(ApiResponse::ok(records)))
}
