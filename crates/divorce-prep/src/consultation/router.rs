use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use serde::Deserialize;
use tracing::info;

use super::domain::{ConsultationReceipt, ConsultationTicket, TicketId, TicketStatus, TicketUpdate};
use super::repository::ConsultationRepository;
use super::service::ConsultationService;
use super::validation::ConsultationRequest;
use crate::auth::AdminCapability;
use crate::error::ApiError;
use crate::response::ApiResponse;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct TicketListQuery {
    pub(crate) status: Option<TicketStatus>,
}

pub fn consultation_router<R>(service: Arc<ConsultationService<R>>) -> Router
where
    R: ConsultationRepository + 'static,
{
    Router::new()
        .route("/api/consultations", post(submit_handler::<R>))
        .with_state(service)
}

/// Ticket management routes. Callers must layer admin authentication on top.
pub fn consultation_admin_router<R>(service: Arc<ConsultationService<R>>) -> Router
where
    R: ConsultationRepository + 'static,
{
    Router::new()
        .route("/api/admin/consultations", get(list_handler::<R>))
        .route(
            "/api/admin/consultations/:id",
            get(get_handler::<R>).patch(update_handler::<R>),
        )
        .with_state(service)
}

pub(crate) async fn submit_handler<R>(
    State(service): State<Arc<ConsultationService<R>>>,
    payload: Result<Json<ConsultationRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<ConsultationReceipt>>), ApiError>
where
    R: ConsultationRepository + 'static,
{
    let Json(request) = payload?;
    let receipt = service.submit(request)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(receipt))))
}

pub(crate) async fn list_handler<R>(
    State(service): State<Arc<ConsultationService<R>>>,
    Extension(_admin): Extension<AdminCapability>,
    query: Result<Query<TicketListQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<ConsultationTicket>>>, ApiError>
where
    R: ConsultationRepository + 'static,
{
    let Query(query) = query?;
    Ok(Json(ApiResponse::ok(service.list(query.status)?)))
}

pub(crate) async fn get_handler<R>(
    State(service): State<Arc<ConsultationService<R>>>,
    Extension(_admin): Extension<AdminCapability>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ConsultationTicket>>, ApiError>
where
    R: ConsultationRepository + 'static,
{
    Ok(Json(ApiResponse::ok(service.get(&TicketId(id))?)))
}

pub(crate) async fn update_handler<R>(
    State(service): State<Arc<ConsultationService<R>>>,
    Extension(admin): Extension<AdminCapability>,
    Path(id): Path<String>,
    payload: Result<Json<TicketUpdate>, JsonRejection>,
) -> Result<Json<ApiResponse<ConsultationTicket>>, ApiError>
where
    R: ConsultationRepository + 'static,
{
    let Json(update) = payload?;
    let ticket = service.update(&TicketId(id), update)?;
    info!(admin = %admin.user_id(), id = %ticket.id.0, status = %ticket.status, "admin updated consultation");
    Ok(Json(ApiResponse::ok(ticket)))
}
