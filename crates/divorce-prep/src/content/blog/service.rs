use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use super::domain::{
    check_content, check_slug, check_title, normalize_tags, resolve_excerpt, BlogCategory,
    BlogPost, BlogPostSummary, BlogValidationError, NewPost, PostId, PostUpdate,
};
use super::repository::BlogRepository;
use crate::store::{IdSequence, RepositoryError};

static POST_SEQUENCE: IdSequence = IdSequence::new("post");

/// Blog operations for the public site and the back-office.
pub struct BlogService<R> {
    repository: Arc<R>,
}

impl<R> BlogService<R>
where
    R: BlogRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Published posts, newest first, optionally narrowed to one category.
    pub fn published(
        &self,
        category: Option<BlogCategory>,
    ) -> Result<Vec<BlogPostSummary>, BlogServiceError> {
        let mut posts: Vec<BlogPost> = self
            .repository
            .list()?
            .into_iter()
            .filter(|post| post.published)
            .filter(|post| category.map_or(true, |category| post.category == category))
            .collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts.iter().map(BlogPostSummary::from).collect())
    }

    /// Load a published post for reading and count the view.
    pub fn read(&self, slug: &str) -> Result<BlogPost, BlogServiceError> {
        let post = self
            .repository
            .fetch_by_slug(slug)?
            .filter(|post| post.published)
            .ok_or(RepositoryError::NotFound)?;
        Ok(self.repository.increment_views(&post.id)?)
    }

    /// Every post including drafts, newest first.
    pub fn all(&self) -> Result<Vec<BlogPost>, BlogServiceError> {
        let mut posts = self.repository.list()?;
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts)
    }

    pub fn get(&self, id: &PostId) -> Result<BlogPost, BlogServiceError> {
        Ok(self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?)
    }

    pub fn create(&self, new_post: NewPost) -> Result<BlogPost, BlogServiceError> {
        let slug = check_slug(&new_post.slug)?;
        let title = check_title(&new_post.title)?;
        let content = check_content(&new_post.content)?;
        let excerpt = resolve_excerpt(new_post.excerpt.as_deref(), &content)?;
        self.ensure_slug_free(&slug, None)?;

        let now = Utc::now();
        let post = BlogPost {
            id: PostId(POST_SEQUENCE.next_id()),
            slug,
            title,
            excerpt,
            content,
            category: new_post.category,
            tags: normalize_tags(new_post.tags),
            published: new_post.published,
            view_count: 0,
            created_at: now,
            updated_at: now,
        };

        let stored = self.repository.insert(post)?;
        info!(id = %stored.id.0, slug = %stored.slug, "blog post created");
        Ok(stored)
    }

    pub fn update(&self, id: &PostId, update: PostUpdate) -> Result<BlogPost, BlogServiceError> {
        let mut post = self.get(id)?;

        if let Some(slug) = update.slug {
            let slug = check_slug(&slug)?;
            self.ensure_slug_free(&slug, Some(id))?;
            post.slug = slug;
        }
        if let Some(title) = update.title {
            post.title = check_title(&title)?;
        }
        let content_changed = update.content.is_some();
        if let Some(content) = update.content {
            post.content = check_content(&content)?;
        }
        match update.excerpt {
            Some(excerpt) => post.excerpt = resolve_excerpt(Some(&excerpt), &post.content)?,
            None if content_changed => post.excerpt = resolve_excerpt(None, &post.content)?,
            None => {}
        }
        if let Some(category) = update.category {
            post.category = category;
        }
        if let Some(tags) = update.tags {
            post.tags = normalize_tags(tags);
        }
        if let Some(published) = update.published {
            post.published = published;
        }
        post.updated_at = Utc::now();

        self.repository.update(post.clone())?;
        info!(id = %post.id.0, published = post.published, "blog post updated");
        Ok(post)
    }

    pub fn delete(&self, id: &PostId) -> Result<(), BlogServiceError> {
        self.repository.delete(id)?;
        info!(id = %id.0, "blog post deleted");
        Ok(())
    }

    fn ensure_slug_free(&self, slug: &str, owner: Option<&PostId>) -> Result<(), BlogServiceError> {
        match self.repository.fetch_by_slug(slug)? {
            Some(existing) if Some(&existing.id) != owner => {
                Err(BlogServiceError::DuplicateSlug(slug.to_string()))
            }
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BlogServiceError {
    #[error(transparent)]
    Validation(#[from] BlogValidationError),
    #[error("이미 사용 중인 슬러그입니다: {0}")]
    DuplicateSlug(String),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
