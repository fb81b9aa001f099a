use std::sync::{Arc, Mutex};

use axum::response::Response;
use axum::{Extension, Router};
use serde_json::Value;

use crate::auth::{AdminCapability, AuthenticatedUser, Role};
use crate::content::blog::domain::{BlogCategory, BlogPost, NewPost, PostId};
use crate::content::blog::repository::BlogRepository;
use crate::content::blog::{blog_admin_router, blog_router, BlogService};
use crate::store::RepositoryError;

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    posts: Arc<Mutex<Vec<BlogPost>>>,
}

impl BlogRepository for MemoryRepository {
    fn insert(&self, post: BlogPost) -> Result<BlogPost, RepositoryError> {
        let mut guard = self.posts.lock().expect("repository mutex poisoned");
        if guard.iter().any(|existing| existing.slug == post.slug) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(post.clone());
        Ok(post)
    }

    fn update(&self, post: BlogPost) -> Result<(), RepositoryError> {
        let mut guard = self.posts.lock().expect("repository mutex poisoned");
        let slot = guard
            .iter_mut()
            .find(|existing| existing.id == post.id)
            .ok_or(RepositoryError::NotFound)?;
        *slot = post;
        Ok(())
    }

    fn delete(&self, id: &PostId) -> Result<(), RepositoryError> {
        let mut guard = self.posts.lock().expect("repository mutex poisoned");
        let before = guard.len();
        guard.retain(|post| &post.id != id);
        if guard.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    fn fetch(&self, id: &PostId) -> Result<Option<BlogPost>, RepositoryError> {
        let guard = self.posts.lock().expect("repository mutex poisoned");
        Ok(guard.iter().find(|post| &post.id == id).cloned())
    }

    fn fetch_by_slug(&self, slug: &str) -> Result<Option<BlogPost>, RepositoryError> {
        let guard = self.posts.lock().expect("repository mutex poisoned");
        Ok(guard.iter().find(|post| post.slug == slug).cloned())
    }

    fn list(&self) -> Result<Vec<BlogPost>, RepositoryError> {
        Ok(self.posts.lock().expect("repository mutex poisoned").clone())
    }

    fn increment_views(&self, id: &PostId) -> Result<BlogPost, RepositoryError> {
        let mut guard = self.posts.lock().expect("repository mutex poisoned");
        let post = guard
            .iter_mut()
            .find(|post| &post.id == id)
            .ok_or(RepositoryError::NotFound)?;
        post.view_count += 1;
        Ok(post.clone())
    }
}

pub(super) fn new_post(slug: &str, category: BlogCategory, published: bool) -> NewPost {
    NewPost {
        slug: slug.to_string(),
        title: format!("{slug} 안내"),
        excerpt: None,
        content: "협의이혼은 가정법원에 부부가 함께 출석하여 의사를 확인받는 절차입니다.".to_string(),
        category,
        tags: vec!["이혼".to_string()],
        published,
    }
}

pub(super) fn build_service() -> Arc<BlogService<MemoryRepository>> {
    Arc::new(BlogService::new(Arc::new(MemoryRepository::default())))
}

pub(super) fn admin() -> AdminCapability {
    AdminCapability::grant(&AuthenticatedUser {
        user_id: "admin-1".to_string(),
        role: Role::Admin,
    })
    .expect("admin role grants capability")
}

/// Public and back-office routes, with the admin capability already attached
/// the way the auth layer would.
pub(super) fn router(service: Arc<BlogService<MemoryRepository>>) -> Router {
    blog_router(service.clone()).merge(blog_admin_router(service).layer(Extension(admin())))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 16 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
