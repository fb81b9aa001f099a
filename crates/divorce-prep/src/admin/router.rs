use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Extension, Json, Router};
use serde::Serialize;

use crate::auth::{require_admin, AdminCapability, SessionDirectory};
use crate::consultation::{
    consultation_admin_router, ConsultationRepository, ConsultationService, TicketStatus,
};
use crate::content::blog::{blog_admin_router, BlogRepository, BlogService};
use crate::error::ApiError;
use crate::response::ApiResponse;

struct OverviewState<B, C> {
    blog: Arc<BlogService<B>>,
    consultations: Arc<ConsultationService<C>>,
}

/// Counts shown on the back-office landing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminOverview {
    pub total_posts: usize,
    pub published_posts: usize,
    pub total_consultations: usize,
    pub consultations_by_status: BTreeMap<String, usize>,
}

/// All admin routes, guarded by the session directory.
pub fn admin_router<B, C>(
    blog: Arc<BlogService<B>>,
    consultations: Arc<ConsultationService<C>>,
    directory: Arc<dyn SessionDirectory>,
) -> Router
where
    B: BlogRepository + 'static,
    C: ConsultationRepository + 'static,
{
    let overview = Router::new()
        .route("/api/admin/overview", get(overview_handler::<B, C>))
        .with_state(Arc::new(OverviewState {
            blog: blog.clone(),
            consultations: consultations.clone(),
        }));

    overview
        .merge(blog_admin_router(blog))
        .merge(consultation_admin_router(consultations))
        .layer(axum::middleware::from_fn_with_state(directory, require_admin))
}

async fn overview_handler<B, C>(
    State(state): State<Arc<OverviewState<B, C>>>,
    Extension(_admin): Extension<AdminCapability>,
) -> Result<Json<ApiResponse<AdminOverview>>, ApiError>
where
    B: BlogRepository + 'static,
    C: ConsultationRepository + 'static,
{
    let posts = state.blog.all()?;
    let tickets = state.consultations.list(None)?;

    let mut consultations_by_status = BTreeMap::new();
    for status in [
        TicketStatus::Pending,
        TicketStatus::Contacted,
        TicketStatus::InProgress,
        TicketStatus::Completed,
        TicketStatus::Cancelled,
    ] {
        let count = tickets.iter().filter(|ticket| ticket.status == status).count();
        consultations_by_status.insert(status.to_string(), count);
    }

    Ok(Json(ApiResponse::ok(AdminOverview {
        total_posts: posts.len(),
        published_posts: posts.iter().filter(|post| post.published).count(),
        total_consultations: tickets.len(),
        consultations_by_status,
    })))
}
