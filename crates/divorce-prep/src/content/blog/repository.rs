use super::domain::{BlogPost, PostId};
use crate::store::RepositoryError;

/// Storage abstraction for blog posts.
pub trait BlogRepository: Send + Sync {
    fn insert(&self, post: BlogPost) -> Result<BlogPost, RepositoryError>;
    fn update(&self, post: BlogPost) -> Result<(), RepositoryError>;
    fn delete(&self, id: &PostId) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &PostId) -> Result<Option<BlogPost>, RepositoryError>;
    fn fetch_by_slug(&self, slug: &str) -> Result<Option<BlogPost>, RepositoryError>;
    fn list(&self) -> Result<Vec<BlogPost>, RepositoryError>;
    /// Bump the view counter atomically and return the updated post.
    fn increment_views(&self, id: &PostId) -> Result<BlogPost, RepositoryError>;
}
