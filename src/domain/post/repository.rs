use crate::domain::category::CategoryId;
use crate::domain::errors::DomainResult;
use crate::domain::post::entity::{NewPost, PostUpdate, PostWithCategories};
use crate::domain::post::value_objects::{PostId, PostSlug};
use async_trait::async_trait;

/// Filter and window for post listings.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostListFilter {
    pub published: Option<bool>,
    pub category_id: Option<CategoryId>,
    pub limit: u32,
    pub offset: u32,
}

/// One page of posts plus the total row count under the same filter.
#[derive(Debug, Clone)]
pub struct PostPage {
    pub posts: Vec<PostWithCategories>,
    pub total_count: u64,
}

/// Write operations run as single transactions: slug resolution, the row
/// write, and any category-link reconciliation commit or roll back together.
#[async_trait]
pub trait PostWriteRepository: Send + Sync {
    /// Insert a post, resolving `slug_base` to a unique slug. A non-empty
    /// `category_ids` list is verified in bulk and linked; any unknown id
    /// fails the whole operation.
    async fn insert(
        &self,
        post: NewPost,
        category_ids: &[CategoryId],
    ) -> DomainResult<PostWithCategories>;

    /// Apply a partial update. `category_ids` of `None` leaves links
    /// untouched; `Some` replaces them wholesale (empty clears all).
    async fn update(
        &self,
        update: PostUpdate,
        category_ids: Option<&[CategoryId]>,
    ) -> DomainResult<PostWithCategories>;

    async fn delete(&self, id: PostId) -> DomainResult<()>;
}

#[async_trait]
pub trait PostReadRepository: Send + Sync {
    async fn find_by_id(&self, id: PostId) -> DomainResult<Option<PostWithCategories>>;
    async fn find_by_slug(&self, slug: &PostSlug) -> DomainResult<Option<PostWithCategories>>;
    async fn list(&self, filter: PostListFilter) -> DomainResult<PostPage>;
}
