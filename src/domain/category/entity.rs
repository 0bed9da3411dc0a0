// src/domain/category/entity.rs
use crate::domain::category::value_objects::{CategoryId, CategoryName, CategorySlug};
use crate::domain::post::{PostId, PostSummary};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct Category {
    pub id: CategoryId,
    pub name: CategoryName,
    pub description: Option<String>,
    pub slug: CategorySlug,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Reduced shape nested under posts.
#[derive(Debug, Clone)]
pub struct CategorySummary {
    pub id: CategoryId,
    pub name: CategoryName,
    pub slug: CategorySlug,
}

/// A category with the summaries of its posts, returned by detail reads.
#[derive(Debug, Clone)]
pub struct CategoryWithPosts {
    pub category: Category,
    pub posts: Vec<PostSummary>,
}

/// Listing shape: every category plus how many posts link to it.
#[derive(Debug, Clone)]
pub struct CategoryWithCount {
    pub category: Category,
    pub post_count: u64,
}

/// One row of the post/category link table.
#[derive(Debug, Clone)]
pub struct CategoryAssignment {
    pub id: i64,
    pub post_id: PostId,
    pub category_id: CategoryId,
    pub created_at: DateTime<Utc>,
}

/// Insert payload; `slug_base` is the pre-resolution candidate.
#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: CategoryName,
    pub description: Option<String>,
    pub slug_base: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial-field patch for a category. `slug_base` is set only when the
/// name changed value; a `None` description leaves the column alone.
#[derive(Debug, Clone)]
pub struct CategoryUpdate {
    pub id: CategoryId,
    pub name: Option<CategoryName>,
    pub slug_base: Option<String>,
    pub description: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl CategoryUpdate {
    pub fn new(id: CategoryId, updated_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: None,
            slug_base: None,
            description: None,
            updated_at,
        }
    }

    pub fn with_name(mut self, name: CategoryName) -> Self {
        self.name = Some(name);
        self
    }

    pub fn with_slug_base(mut self, base: impl Into<String>) -> Self {
        self.slug_base = Some(base.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
