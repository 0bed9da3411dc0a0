// src/domain/post/entity.rs
use crate::domain::category::CategorySummary;
use crate::domain::post::value_objects::{PostContent, PostId, PostSlug, PostTitle};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct Post {
    pub id: PostId,
    pub title: PostTitle,
    pub content: PostContent,
    pub slug: PostSlug,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A post together with the summaries of its linked categories, the shape
/// every read path returns.
#[derive(Debug, Clone)]
pub struct PostWithCategories {
    pub post: Post,
    pub categories: Vec<CategorySummary>,
}

/// Reduced shape embedded in category detail reads.
#[derive(Debug, Clone)]
pub struct PostSummary {
    pub id: PostId,
    pub title: PostTitle,
    pub slug: PostSlug,
    pub published: bool,
}

/// Insert payload. `slug_base` is the generated candidate before uniqueness
/// resolution; the repository suffixes it as needed inside the insert
/// transaction.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: PostTitle,
    pub slug_base: String,
    pub content: PostContent,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial-field patch for a post. `None` means "leave the column alone";
/// `slug_base` is set only when the title actually changed value.
#[derive(Debug, Clone)]
pub struct PostUpdate {
    pub id: PostId,
    pub title: Option<PostTitle>,
    pub slug_base: Option<String>,
    pub content: Option<PostContent>,
    pub published: Option<bool>,
    pub updated_at: DateTime<Utc>,
}

impl PostUpdate {
    pub fn new(id: PostId, updated_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: None,
            slug_base: None,
            content: None,
            published: None,
            updated_at,
        }
    }

    pub fn with_title(mut self, title: PostTitle) -> Self {
        self.title = Some(title);
        self
    }

    pub fn with_slug_base(mut self, base: impl Into<String>) -> Self {
        self.slug_base = Some(base.into());
        self
    }

    pub fn with_content(mut self, content: PostContent) -> Self {
        self.content = Some(content);
        self
    }

    pub fn with_published(mut self, published: bool) -> Self {
        self.published = Some(published);
        self
    }
}
