use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Extension, Json, Router};
use serde::Deserialize;
use tracing::info;

use super::domain::{BlogCategory, BlogPost, BlogPostSummary, NewPost, PostId, PostUpdate};
use super::repository::BlogRepository;
use super::service::BlogService;
use crate::auth::AdminCapability;
use crate::error::ApiError;
use crate::response::ApiResponse;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct BlogListQuery {
    pub(crate) category: Option<BlogCategory>,
}

/// Public blog endpoints.
pub fn blog_router<R>(service: Arc<BlogService<R>>) -> Router
where
    R: BlogRepository + 'static,
{
    Router::new()
        .route("/api/blog", get(list_handler::<R>))
        .route("/api/blog/:slug", get(read_handler::<R>))
        .with_state(service)
}

/// Back-office blog endpoints. Callers must layer admin authentication on top.
pub fn blog_admin_router<R>(service: Arc<BlogService<R>>) -> Router
where
    R: BlogRepository + 'static,
{
    Router::new()
        .route(
            "/api/admin/posts",
            get(admin_list_handler::<R>).post(create_handler::<R>),
        )
        .route(
            "/api/admin/posts/:id",
            get(admin_get_handler::<R>)
                .put(update_handler::<R>)
                .delete(delete_handler::<R>),
        )
        .with_state(service)
}

pub(crate) async fn list_handler<R>(
    State(service): State<Arc<BlogService<R>>>,
    query: Result<Query<BlogListQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<BlogPostSummary>>>, ApiError>
where
    R: BlogRepository + 'static,
{
    let Query(query) = query?;
    let posts = service.published(query.category)?;
    Ok(Json(ApiResponse::ok(posts)))
}

pub(crate) async fn read_handler<R>(
    State(service): State<Arc<BlogService<R>>>,
    Path(slug): Path<String>,
) -> Result<Json<ApiResponse<BlogPost>>, ApiError>
where
    R: BlogRepository + 'static,
{
    let post = service.read(&slug)?;
    Ok(Json(ApiResponse::ok(post)))
}

pub(crate) async fn admin_list_handler<R>(
    State(service): State<Arc<BlogService<R>>>,
    Extension(_admin): Extension<AdminCapability>,
) -> Result<Json<ApiResponse<Vec<BlogPost>>>, ApiError>
where
    R: BlogRepository + 'static,
{
    Ok(Json(ApiResponse::ok(service.all()?)))
}

pub(crate) async fn admin_get_handler<R>(
    State(service): State<Arc<BlogService<R>>>,
    Extension(_admin): Extension<AdminCapability>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<BlogPost>>, ApiError>
where
    R: BlogRepository + 'static,
{
    Ok(Json(ApiResponse::ok(service.get(&PostId(id))?)))
}

pub(crate) async fn create_handler<R>(
    State(service): State<Arc<BlogService<R>>>,
    Extension(admin): Extension<AdminCapability>,
    payload: Result<Json<NewPost>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<BlogPost>>), ApiError>
where
    R: BlogRepository + 'static,
{
    let Json(new_post) = payload?;
    let post = service.create(new_post)?;
    info!(admin = %admin.user_id(), id = %post.id.0, "admin created blog post");
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(post))))
}

pub(crate) async fn update_handler<R>(
    State(service): State<Arc<BlogService<R>>>,
    Extension(admin): Extension<AdminCapability>,
    Path(id): Path<String>,
    payload: Result<Json<PostUpdate>, JsonRejection>,
) -> Result<Json<ApiResponse<BlogPost>>, ApiError>
where
    R: BlogRepository + 'static,
{
    let Json(update) = payload?;
    let post = service.update(&PostId(id), update)?;
    info!(admin = %admin.user_id(), id = %post.id.0, "admin updated blog post");
    Ok(Json(ApiResponse::ok(post)))
}

pub(crate) async fn delete_handler<R>(
    State(service): State<Arc<BlogService<R>>>,
    Extension(admin): Extension<AdminCapability>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError>
where
    R: BlogRepository + 'static,
{
    let id = PostId(id);
    service.delete(&id)?;
    info!(admin = %admin.user_id(), id = %id.0, "admin deleted blog post");
    Ok(StatusCode::NO_CONTENT)
}
