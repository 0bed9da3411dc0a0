use crate::application::dto::posts::PostSummaryDto;
use crate::domain::category::{
    Category, CategoryAssignment, CategoryWithCount, CategoryWithPosts,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryDto {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub slug: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Category> for CategoryDto {
    fn from(category: Category) -> Self {
        Self {
            id: category.id.into(),
            name: category.name.into(),
            description: category.description,
            slug: category.slug.into(),
            created_at: category.created_at,
            updated_at: category.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryWithCountDto {
    #[serde(flatten)]
    pub category: CategoryDto,
    pub post_count: u64,
}

impl From<CategoryWithCount> for CategoryWithCountDto {
    fn from(record: CategoryWithCount) -> Self {
        Self {
            category: record.category.into(),
            post_count: record.post_count,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryWithPostsDto {
    #[serde(flatten)]
    pub category: CategoryDto,
    pub posts: Vec<PostSummaryDto>,
}

impl From<CategoryWithPosts> for CategoryWithPostsDto {
    fn from(record: CategoryWithPosts) -> Self {
        Self {
            category: record.category.into(),
            posts: record.posts.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryAssignmentDto {
    pub id: i64,
    pub post_id: i64,
    pub category_id: i64,
    pub created_at: DateTime<Utc>,
}

impl From<CategoryAssignment> for CategoryAssignmentDto {
    fn from(assignment: CategoryAssignment) -> Self {
        Self {
            id: assignment.id,
            post_id: assignment.post_id.into(),
            category_id: assignment.category_id.into(),
            created_at: assignment.created_at,
        }
    }
}
