// src/application/queries/posts.rs
use crate::{
    application::{
        dto::{Page, PostDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        category::CategoryId,
        post::{PostId, PostListFilter, PostReadRepository, PostSlug},
    },
};
use std::sync::Arc;

pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;

pub struct ListPostsQuery {
    pub published: Option<bool>,
    pub category_id: Option<i64>,
    pub limit: u32,
    pub offset: u32,
}

pub struct GetPostQuery {
    pub id: i64,
}

pub struct GetPostBySlugQuery {
    pub slug: String,
}

pub struct PostQueryService {
    read_repo: Arc<dyn PostReadRepository>,
}

impl PostQueryService {
    pub fn new(read_repo: Arc<dyn PostReadRepository>) -> Self {
        Self { read_repo }
    }

    pub async fn list_posts(&self, query: ListPostsQuery) -> ApplicationResult<Page<PostDto>> {
        let category_id = query.category_id.map(CategoryId::new).transpose()?;
        let filter = PostListFilter {
            published: query.published,
            category_id,
            limit: query.limit.clamp(1, MAX_PAGE_SIZE),
            offset: query.offset,
        };

        let page = self.read_repo.list(filter).await?;
        Ok(Page::new(
            page.posts.into_iter().map(Into::into).collect(),
            page.total_count,
            filter.offset,
        ))
    }

    pub async fn get_post_by_id(&self, query: GetPostQuery) -> ApplicationResult<PostDto> {
        let id = PostId::new(query.id)?;
        let record = self
            .read_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("post not found"))?;
        Ok(record.into())
    }

    pub async fn get_post_by_slug(&self, query: GetPostBySlugQuery) -> ApplicationResult<PostDto> {
        let slug = PostSlug::new(query.slug)?;
        let record = self
            .read_repo
            .find_by_slug(&slug)
            .await?
            .ok_or_else(|| ApplicationError::not_found("post not found"))?;
        Ok(record.into())
    }
}
