// src/infrastructure/repositories/postgres_post.rs
use super::error::map_sqlx;
use super::slug::{resolve_unique_slug, SlugTable};
use crate::domain::category::{CategoryId, CategoryName, CategorySlug, CategorySummary};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::post::{
    NewPost, Post, PostContent, PostId, PostListFilter, PostPage, PostReadRepository, PostSlug,
    PostTitle, PostUpdate, PostWithCategories, PostWriteRepository,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgConnection, PgPool, Postgres, QueryBuilder};
use std::collections::HashMap;

const POST_COLUMNS: &str = "id, title, content, slug, published, created_at, updated_at";

#[derive(Clone)]
pub struct PostgresPostWriteRepository {
    pool: PgPool,
}

impl PostgresPostWriteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Clone)]
pub struct PostgresPostReadRepository {
    pool: PgPool,
}

impl PostgresPostReadRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct PostRow {
    id: i64,
    title: String,
    content: String,
    slug: String,
    published: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<PostRow> for Post {
    type Error = DomainError;

    fn try_from(row: PostRow) -> Result<Self, Self::Error> {
        Ok(Post {
            id: PostId::new(row.id)?,
            title: PostTitle::new(row.title)?,
            content: PostContent::new(row.content)?,
            slug: PostSlug::new(row.slug)?,
            published: row.published,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, FromRow)]
struct CategoryRefRow {
    id: i64,
    name: String,
    slug: String,
}

impl TryFrom<CategoryRefRow> for CategorySummary {
    type Error = DomainError;

    fn try_from(row: CategoryRefRow) -> Result<Self, Self::Error> {
        Ok(CategorySummary {
            id: CategoryId::new(row.id)?,
            name: CategoryName::new(row.name)?,
            slug: CategorySlug::new(row.slug)?,
        })
    }
}

#[derive(Debug, FromRow)]
struct LinkedCategoryRow {
    post_id: i64,
    id: i64,
    name: String,
    slug: String,
}

/// Verify every id resolves to a category (single set-membership query),
/// then bulk-insert the link rows. Rejects the whole batch on any shortfall
/// without naming the missing id. Must run on the caller's transaction.
async fn link_categories(
    conn: &mut PgConnection,
    post_id: i64,
    category_ids: &[CategoryId],
) -> DomainResult<Vec<CategorySummary>> {
    let ids: Vec<i64> = category_ids.iter().copied().map(i64::from).collect();

    let rows = sqlx::query_as::<_, CategoryRefRow>(
        "SELECT id, name, slug FROM categories WHERE id = ANY($1) ORDER BY name, id",
    )
    .bind(&ids)
    .fetch_all(&mut *conn)
    .await
    .map_err(map_sqlx)?;

    if rows.len() != ids.len() {
        return Err(DomainError::Validation(
            "one or more categories do not exist".into(),
        ));
    }

    sqlx::query("INSERT INTO post_categories (post_id, category_id) SELECT $1, unnest($2::bigint[])")
        .bind(post_id)
        .bind(&ids)
        .execute(&mut *conn)
        .await
        .map_err(map_sqlx)?;

    rows.into_iter().map(TryInto::try_into).collect()
}

/// One batched join for the whole page of post ids, grouped per post.
async fn fetch_linked_categories(
    conn: &mut PgConnection,
    post_ids: &[i64],
) -> DomainResult<HashMap<i64, Vec<CategorySummary>>> {
    if post_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = sqlx::query_as::<_, LinkedCategoryRow>(
        "SELECT pc.post_id, c.id, c.name, c.slug
         FROM categories c
         INNER JOIN post_categories pc ON c.id = pc.category_id
         WHERE pc.post_id = ANY($1)
         ORDER BY c.name, c.id",
    )
    .bind(post_ids)
    .fetch_all(&mut *conn)
    .await
    .map_err(map_sqlx)?;

    let mut grouped: HashMap<i64, Vec<CategorySummary>> = HashMap::new();
    for row in rows {
        let summary = CategorySummary {
            id: CategoryId::new(row.id)?,
            name: CategoryName::new(row.name)?,
            slug: CategorySlug::new(row.slug)?,
        };
        grouped.entry(row.post_id).or_default().push(summary);
    }
    Ok(grouped)
}

#[async_trait]
impl PostWriteRepository for PostgresPostWriteRepository {
    async fn insert(
        &self,
        post: NewPost,
        category_ids: &[CategoryId],
    ) -> DomainResult<PostWithCategories> {
        let NewPost {
            title,
            slug_base,
            content,
            published,
            created_at,
            updated_at,
        } = post;

        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        let slug = resolve_unique_slug(&mut tx, SlugTable::Posts, &slug_base, None).await?;

        let row = sqlx::query_as::<_, PostRow>(
            "INSERT INTO posts (title, content, slug, published, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING id, title, content, slug, published, created_at, updated_at",
        )
        .bind(title.as_str())
        .bind(content.as_str())
        .bind(&slug)
        .bind(published)
        .bind(created_at)
        .bind(updated_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_sqlx)?;

        let categories = if category_ids.is_empty() {
            Vec::new()
        } else {
            link_categories(&mut tx, row.id, category_ids).await?
        };

        tx.commit().await.map_err(map_sqlx)?;

        Ok(PostWithCategories {
            post: row.try_into()?,
            categories,
        })
    }

    async fn update(
        &self,
        update: PostUpdate,
        category_ids: Option<&[CategoryId]>,
    ) -> DomainResult<PostWithCategories> {
        let PostUpdate {
            id,
            title,
            slug_base,
            content,
            published,
            updated_at,
        } = update;
        let id = i64::from(id);

        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        let slug = match slug_base {
            Some(base) => {
                Some(resolve_unique_slug(&mut tx, SlugTable::Posts, &base, Some(id)).await?)
            }
            None => None,
        };

        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("UPDATE posts SET updated_at = ");
        builder.push_bind(updated_at);

        if let Some(title) = title {
            builder.push(", title = ");
            builder.push_bind(String::from(title));
        }

        if let Some(slug) = slug {
            builder.push(", slug = ");
            builder.push_bind(slug);
        }

        if let Some(content) = content {
            builder.push(", content = ");
            builder.push_bind(String::from(content));
        }

        if let Some(published) = published {
            builder.push(", published = ");
            builder.push_bind(published);
        }

        builder.push(" WHERE id = ");
        builder.push_bind(id);
        builder.push(" RETURNING id, title, content, slug, published, created_at, updated_at");

        let row = builder
            .build_query_as::<PostRow>()
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_sqlx)?
            .ok_or_else(|| DomainError::NotFound("post not found".into()))?;

        // Replace-not-merge: a supplied list is authoritative, an omitted
        // one leaves the links alone.
        let categories = match category_ids {
            Some(ids) => {
                sqlx::query("DELETE FROM post_categories WHERE post_id = $1")
                    .bind(id)
                    .execute(&mut *tx)
                    .await
                    .map_err(map_sqlx)?;

                if ids.is_empty() {
                    Vec::new()
                } else {
                    link_categories(&mut tx, id, ids).await?
                }
            }
            None => fetch_linked_categories(&mut tx, &[id])
                .await?
                .remove(&id)
                .unwrap_or_default(),
        };

        tx.commit().await.map_err(map_sqlx)?;

        Ok(PostWithCategories {
            post: row.try_into()?,
            categories,
        })
    }

    async fn delete(&self, id: PostId) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(i64::from(id))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("post not found".into()));
        }
        Ok(())
    }
}

impl PostgresPostReadRepository {
    fn apply_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &PostListFilter) {
        let mut has_where = false;

        if let Some(published) = filter.published {
            builder.push(" WHERE p.published = ");
            builder.push_bind(published);
            has_where = true;
        }

        if let Some(category_id) = filter.category_id {
            builder.push(if has_where { " AND " } else { " WHERE " });
            builder.push(
                "EXISTS (SELECT 1 FROM post_categories pc \
                 WHERE pc.post_id = p.id AND pc.category_id = ",
            );
            builder.push_bind(i64::from(category_id));
            builder.push(")");
        }
    }

    async fn fetch_one_with_categories(
        &self,
        row: Option<PostRow>,
    ) -> DomainResult<Option<PostWithCategories>> {
        let Some(row) = row else {
            return Ok(None);
        };

        let mut conn = self.pool.acquire().await.map_err(map_sqlx)?;
        let categories = fetch_linked_categories(&mut conn, &[row.id])
            .await?
            .remove(&row.id)
            .unwrap_or_default();

        Ok(Some(PostWithCategories {
            post: row.try_into()?,
            categories,
        }))
    }
}

#[async_trait]
impl PostReadRepository for PostgresPostReadRepository {
    async fn find_by_id(&self, id: PostId) -> DomainResult<Option<PostWithCategories>> {
        let row = sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE id = $1"
        ))
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        self.fetch_one_with_categories(row).await
    }

    async fn find_by_slug(&self, slug: &PostSlug) -> DomainResult<Option<PostWithCategories>> {
        let row = sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE slug = $1"
        ))
        .bind(slug.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        self.fetch_one_with_categories(row).await
    }

    async fn list(&self, filter: PostListFilter) -> DomainResult<PostPage> {
        let mut conn = self.pool.acquire().await.map_err(map_sqlx)?;

        let mut count_builder: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM posts p");
        Self::apply_filter(&mut count_builder, &filter);
        let total_count: i64 = count_builder
            .build_query_scalar()
            .fetch_one(&mut *conn)
            .await
            .map_err(map_sqlx)?;

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
            "SELECT p.id, p.title, p.content, p.slug, p.published, p.created_at, p.updated_at \
             FROM posts p",
        );
        Self::apply_filter(&mut builder, &filter);
        builder.push(" ORDER BY p.created_at DESC, p.id DESC LIMIT ");
        builder.push_bind(i64::from(filter.limit));
        builder.push(" OFFSET ");
        builder.push_bind(i64::from(filter.offset));

        let rows = builder
            .build_query_as::<PostRow>()
            .fetch_all(&mut *conn)
            .await
            .map_err(map_sqlx)?;

        let post_ids: Vec<i64> = rows.iter().map(|row| row.id).collect();
        let mut grouped = fetch_linked_categories(&mut conn, &post_ids).await?;

        let posts = rows
            .into_iter()
            .map(|row| {
                let categories = grouped.remove(&row.id).unwrap_or_default();
                Ok(PostWithCategories {
                    post: row.try_into()?,
                    categories,
                })
            })
            .collect::<DomainResult<Vec<_>>>()?;

        Ok(PostPage {
            posts,
            total_count: total_count as u64,
        })
    }
}
