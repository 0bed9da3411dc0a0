// src/infrastructure/repositories/postgres_category.rs
use super::error::map_sqlx;
use super::slug::{resolve_unique_slug, SlugTable};
use crate::domain::category::{
    Category, CategoryAssignment, CategoryAssignmentRepository, CategoryId, CategoryName,
    CategoryReadRepository, CategorySlug, CategoryUpdate, CategoryWithCount, CategoryWithPosts,
    CategoryWriteRepository, NewCategory,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::post::{PostId, PostSlug, PostSummary, PostTitle};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

const CATEGORY_COLUMNS: &str = "id, name, description, slug, created_at, updated_at";

#[derive(Clone)]
pub struct PostgresCategoryWriteRepository {
    pool: PgPool,
}

impl PostgresCategoryWriteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Clone)]
pub struct PostgresCategoryReadRepository {
    pool: PgPool,
}

impl PostgresCategoryReadRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Clone)]
pub struct PostgresCategoryAssignmentRepository {
    pool: PgPool,
}

impl PostgresCategoryAssignmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct CategoryRow {
    id: i64,
    name: String,
    description: Option<String>,
    slug: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<CategoryRow> for Category {
    type Error = DomainError;

    fn try_from(row: CategoryRow) -> Result<Self, Self::Error> {
        Ok(Category {
            id: CategoryId::new(row.id)?,
            name: CategoryName::new(row.name)?,
            description: row.description,
            slug: CategorySlug::new(row.slug)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, FromRow)]
struct CategoryCountRow {
    id: i64,
    name: String,
    description: Option<String>,
    slug: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    post_count: i64,
}

#[derive(Debug, FromRow)]
struct PostSummaryRow {
    id: i64,
    title: String,
    slug: String,
    published: bool,
}

impl TryFrom<PostSummaryRow> for PostSummary {
    type Error = DomainError;

    fn try_from(row: PostSummaryRow) -> Result<Self, Self::Error> {
        Ok(PostSummary {
            id: PostId::new(row.id)?,
            title: PostTitle::new(row.title)?,
            slug: PostSlug::new(row.slug)?,
            published: row.published,
        })
    }
}

#[derive(Debug, FromRow)]
struct AssignmentRow {
    id: i64,
    post_id: i64,
    category_id: i64,
    created_at: DateTime<Utc>,
}

impl TryFrom<AssignmentRow> for CategoryAssignment {
    type Error = DomainError;

    fn try_from(row: AssignmentRow) -> Result<Self, Self::Error> {
        Ok(CategoryAssignment {
            id: row.id,
            post_id: PostId::new(row.post_id)?,
            category_id: CategoryId::new(row.category_id)?,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl CategoryWriteRepository for PostgresCategoryWriteRepository {
    async fn insert(&self, category: NewCategory) -> DomainResult<Category> {
        let NewCategory {
            name,
            description,
            slug_base,
            created_at,
            updated_at,
        } = category;

        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        let slug = resolve_unique_slug(&mut tx, SlugTable::Categories, &slug_base, None).await?;

        let row = sqlx::query_as::<_, CategoryRow>(
            "INSERT INTO categories (name, description, slug, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id, name, description, slug, created_at, updated_at",
        )
        .bind(name.as_str())
        .bind(&description)
        .bind(&slug)
        .bind(created_at)
        .bind(updated_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_sqlx)?;

        tx.commit().await.map_err(map_sqlx)?;

        row.try_into()
    }

    async fn update(&self, update: CategoryUpdate) -> DomainResult<Category> {
        let CategoryUpdate {
            id,
            name,
            slug_base,
            description,
            updated_at,
        } = update;
        let id = i64::from(id);

        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        let slug = match slug_base {
            Some(base) => {
                Some(resolve_unique_slug(&mut tx, SlugTable::Categories, &base, Some(id)).await?)
            }
            None => None,
        };

        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("UPDATE categories SET updated_at = ");
        builder.push_bind(updated_at);

        if let Some(name) = name {
            builder.push(", name = ");
            builder.push_bind(String::from(name));
        }

        if let Some(slug) = slug {
            builder.push(", slug = ");
            builder.push_bind(slug);
        }

        if let Some(description) = description {
            builder.push(", description = ");
            builder.push_bind(description);
        }

        builder.push(" WHERE id = ");
        builder.push_bind(id);
        builder.push(" RETURNING id, name, description, slug, created_at, updated_at");

        let row = builder
            .build_query_as::<CategoryRow>()
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_sqlx)?
            .ok_or_else(|| DomainError::NotFound("category not found".into()))?;

        tx.commit().await.map_err(map_sqlx)?;

        row.try_into()
    }

    async fn delete(&self, id: CategoryId) -> DomainResult<()> {
        // Link rows go with the row via ON DELETE CASCADE.
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(i64::from(id))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("category not found".into()));
        }
        Ok(())
    }
}

impl PostgresCategoryReadRepository {
    async fn with_posts(&self, row: Option<CategoryRow>) -> DomainResult<Option<CategoryWithPosts>> {
        let Some(row) = row else {
            return Ok(None);
        };

        let posts = sqlx::query_as::<_, PostSummaryRow>(
            "SELECT p.id, p.title, p.slug, p.published
             FROM posts p
             INNER JOIN post_categories pc ON p.id = pc.post_id
             WHERE pc.category_id = $1
             ORDER BY p.created_at DESC, p.id DESC",
        )
        .bind(row.id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?
        .into_iter()
        .map(TryInto::try_into)
        .collect::<DomainResult<Vec<_>>>()?;

        Ok(Some(CategoryWithPosts {
            category: row.try_into()?,
            posts,
        }))
    }
}

#[async_trait]
impl CategoryReadRepository for PostgresCategoryReadRepository {
    async fn find_by_id(&self, id: CategoryId) -> DomainResult<Option<CategoryWithPosts>> {
        let row = sqlx::query_as::<_, CategoryRow>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories WHERE id = $1"
        ))
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        self.with_posts(row).await
    }

    async fn find_by_slug(&self, slug: &CategorySlug) -> DomainResult<Option<CategoryWithPosts>> {
        let row = sqlx::query_as::<_, CategoryRow>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories WHERE slug = $1"
        ))
        .bind(slug.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        self.with_posts(row).await
    }

    async fn list_with_counts(&self) -> DomainResult<Vec<CategoryWithCount>> {
        let rows = sqlx::query_as::<_, CategoryCountRow>(
            "SELECT c.id, c.name, c.description, c.slug, c.created_at, c.updated_at,
                    COUNT(pc.id) AS post_count
             FROM categories c
             LEFT JOIN post_categories pc ON c.id = pc.category_id
             GROUP BY c.id
             ORDER BY c.created_at DESC, c.id DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        rows.into_iter()
            .map(|row| {
                let post_count = row.post_count as u64;
                let category = Category {
                    id: CategoryId::new(row.id)?,
                    name: CategoryName::new(row.name)?,
                    description: row.description,
                    slug: CategorySlug::new(row.slug)?,
                    created_at: row.created_at,
                    updated_at: row.updated_at,
                };
                Ok(CategoryWithCount {
                    category,
                    post_count,
                })
            })
            .collect()
    }
}

#[async_trait]
impl CategoryAssignmentRepository for PostgresCategoryAssignmentRepository {
    async fn assign(
        &self,
        post_id: PostId,
        category_id: CategoryId,
    ) -> DomainResult<CategoryAssignment> {
        let post_id = i64::from(post_id);
        let category_id = i64::from(category_id);

        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM post_categories WHERE post_id = $1 AND category_id = $2)",
        )
        .bind(post_id)
        .bind(category_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_sqlx)?;

        if exists {
            return Err(DomainError::Conflict(
                "category is already assigned to this post".into(),
            ));
        }

        let row = sqlx::query_as::<_, AssignmentRow>(
            "INSERT INTO post_categories (post_id, category_id)
             VALUES ($1, $2)
             RETURNING id, post_id, category_id, created_at",
        )
        .bind(post_id)
        .bind(category_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_sqlx)?;

        tx.commit().await.map_err(map_sqlx)?;

        row.try_into()
    }

    async fn remove(&self, post_id: PostId, category_id: CategoryId) -> DomainResult<()> {
        let result =
            sqlx::query("DELETE FROM post_categories WHERE post_id = $1 AND category_id = $2")
                .bind(i64::from(post_id))
                .bind(i64::from(category_id))
                .execute(&self.pool)
                .await
                .map_err(map_sqlx)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound(
                "category assignment not found".into(),
            ));
        }
        Ok(())
    }
}
