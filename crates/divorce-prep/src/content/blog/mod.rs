pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    BlogCategory, BlogPost, BlogPostSummary, BlogValidationError, NewPost, PostId, PostUpdate,
};
pub use repository::BlogRepository;
pub use router::{blog_admin_router, blog_router};
pub use service::{BlogService, BlogServiceError};
