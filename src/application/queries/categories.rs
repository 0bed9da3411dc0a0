// src/application/queries/categories.rs
use crate::{
    application::{
        dto::{CategoryWithCountDto, CategoryWithPostsDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::category::{CategoryId, CategoryReadRepository, CategorySlug},
};
use std::sync::Arc;

pub struct GetCategoryQuery {
    pub id: i64,
}

pub struct GetCategoryBySlugQuery {
    pub slug: String,
}

pub struct CategoryQueryService {
    read_repo: Arc<dyn CategoryReadRepository>,
}

impl CategoryQueryService {
    pub fn new(read_repo: Arc<dyn CategoryReadRepository>) -> Self {
        Self { read_repo }
    }

    pub async fn list_categories(&self) -> ApplicationResult<Vec<CategoryWithCountDto>> {
        let records = self.read_repo.list_with_counts().await?;
        Ok(records.into_iter().map(Into::into).collect())
    }

    pub async fn get_category_by_id(
        &self,
        query: GetCategoryQuery,
    ) -> ApplicationResult<CategoryWithPostsDto> {
        let id = CategoryId::new(query.id)?;
        let record = self
            .read_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("category not found"))?;
        Ok(record.into())
    }

    pub async fn get_category_by_slug(
        &self,
        query: GetCategoryBySlugQuery,
    ) -> ApplicationResult<CategoryWithPostsDto> {
        let slug = CategorySlug::new(query.slug)?;
        let record = self
            .read_repo
            .find_by_slug(&slug)
            .await?
            .ok_or_else(|| ApplicationError::not_found("category not found"))?;
        Ok(record.into())
    }
}
