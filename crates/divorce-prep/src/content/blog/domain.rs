use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlogCategory {
    Procedure,
    Custody,
    ChildSupport,
    Property,
    Alimony,
    Other,
}

impl BlogCategory {
    pub const fn label(self) -> &'static str {
        match self {
            BlogCategory::Procedure => "이혼절차",
            BlogCategory::Custody => "양육권",
            BlogCategory::ChildSupport => "양육비",
            BlogCategory::Property => "재산분할",
            BlogCategory::Alimony => "위자료",
            BlogCategory::Other => "기타",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: PostId,
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub category: BlogCategory,
    pub tags: Vec<String>,
    pub published: bool,
    pub view_count: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Listing entry for public index pages; omits the body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPostSummary {
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub category: BlogCategory,
    pub category_label: &'static str,
    pub tags: Vec<String>,
    pub view_count: u64,
    pub created_at: DateTime<Utc>,
}

impl From<&BlogPost> for BlogPostSummary {
    fn from(post: &BlogPost) -> Self {
        Self {
            slug: post.slug.clone(),
            title: post.title.clone(),
            excerpt: post.excerpt.clone(),
            category: post.category,
            category_label: post.category.label(),
            tags: post.tags.clone(),
            view_count: post.view_count,
            created_at: post.created_at,
        }
    }
}

/// Back-office payload for a new post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    pub content: String,
    pub category: BlogCategory,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub published: bool,
}

/// Partial update; absent fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostUpdate {
    pub slug: Option<String>,
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub category: Option<BlogCategory>,
    pub tags: Option<Vec<String>>,
    pub published: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BlogValidationError {
    #[error("제목을 입력해주세요. (최대 200자)")]
    InvalidTitle,
    #[error("본문을 입력해주세요.")]
    EmptyContent,
    #[error("요약은 300자를 넘을 수 없습니다.")]
    ExcerptTooLong,
    #[error("슬러그는 영문 소문자, 숫자, 하이픈만 사용할 수 있습니다: {0}")]
    InvalidSlug(String),
}

const MAX_TITLE_CHARS: usize = 200;
const MAX_EXCERPT_CHARS: usize = 300;
const MAX_SLUG_CHARS: usize = 100;
const DERIVED_EXCERPT_CHARS: usize = 120;

pub(crate) fn check_title(title: &str) -> Result<String, BlogValidationError> {
    let title = title.trim();
    if title.is_empty() || title.chars().count() > MAX_TITLE_CHARS {
        return Err(BlogValidationError::InvalidTitle);
    }
    Ok(title.to_string())
}

pub(crate) fn check_content(content: &str) -> Result<String, BlogValidationError> {
    if content.trim().is_empty() {
        return Err(BlogValidationError::EmptyContent);
    }
    Ok(content.to_string())
}

pub(crate) fn check_slug(slug: &str) -> Result<String, BlogValidationError> {
    let slug = slug.trim();
    let well_formed = !slug.is_empty()
        && slug.len() <= MAX_SLUG_CHARS
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if !well_formed {
        return Err(BlogValidationError::InvalidSlug(slug.to_string()));
    }
    Ok(slug.to_string())
}

/// Explicit excerpt when given, otherwise the opening of the body.
pub(crate) fn resolve_excerpt(
    excerpt: Option<&str>,
    content: &str,
) -> Result<String, BlogValidationError> {
    match excerpt.map(str::trim).filter(|excerpt| !excerpt.is_empty()) {
        Some(excerpt) if excerpt.chars().count() > MAX_EXCERPT_CHARS => {
            Err(BlogValidationError::ExcerptTooLong)
        }
        Some(excerpt) => Ok(excerpt.to_string()),
        None => {
            let flattened = content.split_whitespace().collect::<Vec<_>>().join(" ");
            if flattened.chars().count() <= DERIVED_EXCERPT_CHARS {
                Ok(flattened)
            } else {
                let cut: String = flattened.chars().take(DERIVED_EXCERPT_CHARS).collect();
                Ok(format!("{}…", cut.trim_end()))
            }
        }
    }
}

pub(crate) fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim();
        if !tag.is_empty() && !normalized.iter().any(|existing| existing == tag) {
            normalized.push(tag.to_string());
        }
    }
    normalized
}
