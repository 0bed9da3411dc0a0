use crate::domain::category::entity::{
    CategoryAssignment, CategoryUpdate, CategoryWithCount, CategoryWithPosts, NewCategory,
};
use crate::domain::category::value_objects::{CategoryId, CategorySlug};
use crate::domain::category::Category;
use crate::domain::errors::DomainResult;
use crate::domain::post::PostId;
use async_trait::async_trait;

/// Category writes share the transactional contract of the post side:
/// slug resolution and the row write commit together.
#[async_trait]
pub trait CategoryWriteRepository: Send + Sync {
    async fn insert(&self, category: NewCategory) -> DomainResult<Category>;
    async fn update(&self, update: CategoryUpdate) -> DomainResult<Category>;
    /// Deletes the row; link rows vanish through the cascade.
    async fn delete(&self, id: CategoryId) -> DomainResult<()>;
}

#[async_trait]
pub trait CategoryReadRepository: Send + Sync {
    async fn find_by_id(&self, id: CategoryId) -> DomainResult<Option<CategoryWithPosts>>;
    async fn find_by_slug(&self, slug: &CategorySlug) -> DomainResult<Option<CategoryWithPosts>>;
    async fn list_with_counts(&self) -> DomainResult<Vec<CategoryWithCount>>;
}

/// Direct single-pair operations on the link table. Parent existence is
/// checked by the command service; the unique pair constraint backs up the
/// duplicate probe.
#[async_trait]
pub trait CategoryAssignmentRepository: Send + Sync {
    async fn assign(
        &self,
        post_id: PostId,
        category_id: CategoryId,
    ) -> DomainResult<CategoryAssignment>;

    async fn remove(&self, post_id: PostId, category_id: CategoryId) -> DomainResult<()>;
}
