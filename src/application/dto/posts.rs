use crate::domain::category::CategorySummary;
use crate::domain::post::{PostSummary, PostWithCategories};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PostDto {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub slug: String,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub categories: Vec<CategorySummaryDto>,
}

impl From<PostWithCategories> for PostDto {
    fn from(record: PostWithCategories) -> Self {
        let PostWithCategories { post, categories } = record;
        Self {
            id: post.id.into(),
            title: post.title.into(),
            content: post.content.into(),
            slug: post.slug.into(),
            published: post.published,
            created_at: post.created_at,
            updated_at: post.updated_at,
            categories: categories.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategorySummaryDto {
    pub id: i64,
    pub name: String,
    pub slug: String,
}

impl From<CategorySummary> for CategorySummaryDto {
    fn from(summary: CategorySummary) -> Self {
        Self {
            id: summary.id.into(),
            name: summary.name.into(),
            slug: summary.slug.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PostSummaryDto {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub published: bool,
}

impl From<PostSummary> for PostSummaryDto {
    fn from(summary: PostSummary) -> Self {
        Self {
            id: summary.id.into(),
            title: summary.title.into(),
            slug: summary.slug.into(),
            published: summary.published,
        }
    }
}
