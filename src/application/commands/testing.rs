//! In-memory repository fakes shared by the command/query service tests.
//! They mirror the transactional contracts of the Postgres repositories:
//! slug suffixing on insert, bulk category verification before any link
//! change, and replace semantics for supplied category lists.

use crate::application::ports::time::Clock;
use crate::domain::category::{
    Category, CategoryAssignment, CategoryAssignmentRepository, CategoryId, CategoryName,
    CategoryReadRepository, CategorySlug, CategorySummary, CategoryUpdate, CategoryWithCount,
    CategoryWithPosts, CategoryWriteRepository, NewCategory,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::post::{
    NewPost, Post, PostContent, PostId, PostListFilter, PostPage, PostReadRepository, PostSlug,
    PostTitle, PostUpdate, PostWithCategories, PostWriteRepository,
};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;

/// Deterministic clock that advances one second per reading.
pub struct TickingClock {
    base: DateTime<Utc>,
    ticks: AtomicI64,
}

impl Default for TickingClock {
    fn default() -> Self {
        Self {
            base: Utc::now(),
            ticks: AtomicI64::new(0),
        }
    }
}

impl Clock for TickingClock {
    fn now(&self) -> DateTime<Utc> {
        let tick = self.ticks.fetch_add(1, Ordering::SeqCst) + 1;
        self.base + Duration::seconds(tick)
    }
}

pub fn sample_post(id: i64, title: &str, slug: &str) -> PostWithCategories {
    let then = Utc::now() - Duration::hours(1);
    PostWithCategories {
        post: Post {
            id: PostId::new(id).unwrap(),
            title: PostTitle::new(title).unwrap(),
            content: PostContent::new("body").unwrap(),
            slug: PostSlug::new(slug).unwrap(),
            published: false,
            created_at: then,
            updated_at: then,
        },
        categories: vec![],
    }
}

fn resolve_slug(taken: &[String], base: &str) -> String {
    let mut candidate = base.to_string();
    let mut counter = 0u32;
    while taken.iter().any(|slug| slug == &candidate) {
        counter += 1;
        candidate = format!("{base}-{counter}");
    }
    candidate
}

#[derive(Default)]
pub struct InMemoryPostRepo {
    posts: Mutex<Vec<PostWithCategories>>,
    known_categories: Mutex<BTreeSet<i64>>,
    next_id: AtomicI64,
    last_update_slug_base: Mutex<Option<String>>,
}

impl InMemoryPostRepo {
    pub fn seed(&self, record: PostWithCategories) {
        let id = i64::from(record.post.id);
        self.next_id.fetch_max(id, Ordering::SeqCst);
        self.posts.lock().unwrap().push(record);
    }

    pub fn register_categories(&self, ids: &[i64]) {
        self.known_categories.lock().unwrap().extend(ids);
    }

    pub fn category_summaries(&self, ids: &[i64]) -> Vec<CategorySummary> {
        ids.iter()
            .map(|id| CategorySummary {
                id: CategoryId::new(*id).unwrap(),
                name: CategoryName::new(format!("Category {id}")).unwrap(),
                slug: CategorySlug::new(format!("category-{id}")).unwrap(),
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.lock().unwrap().is_empty()
    }

    pub fn last_update_slug_base(&self) -> Option<String> {
        self.last_update_slug_base.lock().unwrap().clone()
    }

    fn verify_categories(&self, ids: &[CategoryId]) -> DomainResult<()> {
        let known = self.known_categories.lock().unwrap();
        let found = ids
            .iter()
            .filter(|id| known.contains(&i64::from(**id)))
            .count();
        if found != ids.len() {
            return Err(DomainError::Validation(
                "one or more categories do not exist".into(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl PostWriteRepository for InMemoryPostRepo {
    async fn insert(
        &self,
        post: NewPost,
        category_ids: &[CategoryId],
    ) -> DomainResult<PostWithCategories> {
        if !category_ids.is_empty() {
            self.verify_categories(category_ids)?;
        }

        let mut posts = self.posts.lock().unwrap();
        let taken: Vec<String> = posts
            .iter()
            .map(|p| p.post.slug.as_str().to_string())
            .collect();
        let slug = PostSlug::new(resolve_slug(&taken, &post.slug_base))?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;

        let raw_ids: Vec<i64> = category_ids.iter().copied().map(i64::from).collect();
        let record = PostWithCategories {
            post: Post {
                id: PostId::new(id)?,
                title: post.title,
                content: post.content,
                slug,
                published: post.published,
                created_at: post.created_at,
                updated_at: post.updated_at,
            },
            categories: self.category_summaries(&raw_ids),
        };
        posts.push(record.clone());
        Ok(record)
    }

    async fn update(
        &self,
        update: PostUpdate,
        category_ids: Option<&[CategoryId]>,
    ) -> DomainResult<PostWithCategories> {
        *self.last_update_slug_base.lock().unwrap() = update.slug_base.clone();

        if let Some(ids) = category_ids {
            if !ids.is_empty() {
                self.verify_categories(ids)?;
            }
        }

        let mut posts = self.posts.lock().unwrap();
        let taken: Vec<String> = posts
            .iter()
            .filter(|p| p.post.id != update.id)
            .map(|p| p.post.slug.as_str().to_string())
            .collect();

        let record = posts
            .iter_mut()
            .find(|p| p.post.id == update.id)
            .ok_or_else(|| DomainError::NotFound("post not found".into()))?;

        if let Some(title) = update.title {
            record.post.title = title;
        }
        if let Some(base) = update.slug_base {
            record.post.slug = PostSlug::new(resolve_slug(&taken, &base))?;
        }
        if let Some(content) = update.content {
            record.post.content = content;
        }
        if let Some(published) = update.published {
            record.post.published = published;
        }
        record.post.updated_at = update.updated_at;

        if let Some(ids) = category_ids {
            let raw_ids: Vec<i64> = ids.iter().copied().map(i64::from).collect();
            record.categories = self.category_summaries(&raw_ids);
        }

        Ok(record.clone())
    }

    async fn delete(&self, id: PostId) -> DomainResult<()> {
        let mut posts = self.posts.lock().unwrap();
        let before = posts.len();
        posts.retain(|p| p.post.id != id);
        if posts.len() == before {
            return Err(DomainError::NotFound("post not found".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl PostReadRepository for InMemoryPostRepo {
    async fn find_by_id(&self, id: PostId) -> DomainResult<Option<PostWithCategories>> {
        Ok(self
            .posts
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.post.id == id)
            .cloned())
    }

    async fn find_by_slug(&self, slug: &PostSlug) -> DomainResult<Option<PostWithCategories>> {
        Ok(self
            .posts
            .lock()
            .unwrap()
            .iter()
            .find(|p| &p.post.slug == slug)
            .cloned())
    }

    async fn list(&self, filter: PostListFilter) -> DomainResult<PostPage> {
        let posts = self.posts.lock().unwrap();
        let matching: Vec<PostWithCategories> = posts
            .iter()
            .filter(|p| filter.published.is_none_or(|flag| p.post.published == flag))
            .filter(|p| {
                filter
                    .category_id
                    .is_none_or(|id| p.categories.iter().any(|c| c.id == id))
            })
            .cloned()
            .collect();

        let total_count = matching.len() as u64;
        let window = matching
            .into_iter()
            .skip(filter.offset as usize)
            .take(filter.limit as usize)
            .collect();

        Ok(PostPage {
            posts: window,
            total_count,
        })
    }
}

#[derive(Default)]
pub struct InMemoryCategoryRepo {
    categories: Mutex<Vec<Category>>,
    assignments: Mutex<Vec<CategoryAssignment>>,
    next_id: AtomicI64,
    next_assignment_id: AtomicI64,
}

#[async_trait]
impl CategoryWriteRepository for InMemoryCategoryRepo {
    async fn insert(&self, category: NewCategory) -> DomainResult<Category> {
        let mut categories = self.categories.lock().unwrap();
        let taken: Vec<String> = categories
            .iter()
            .map(|c| c.slug.as_str().to_string())
            .collect();
        let slug = CategorySlug::new(resolve_slug(&taken, &category.slug_base))?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;

        let record = Category {
            id: CategoryId::new(id)?,
            name: category.name,
            description: category.description,
            slug,
            created_at: category.created_at,
            updated_at: category.updated_at,
        };
        categories.push(record.clone());
        Ok(record)
    }

    async fn update(&self, update: CategoryUpdate) -> DomainResult<Category> {
        let mut categories = self.categories.lock().unwrap();
        let taken: Vec<String> = categories
            .iter()
            .filter(|c| c.id != update.id)
            .map(|c| c.slug.as_str().to_string())
            .collect();

        let record = categories
            .iter_mut()
            .find(|c| c.id == update.id)
            .ok_or_else(|| DomainError::NotFound("category not found".into()))?;

        if let Some(name) = update.name {
            record.name = name;
        }
        if let Some(base) = update.slug_base {
            record.slug = CategorySlug::new(resolve_slug(&taken, &base))?;
        }
        if let Some(description) = update.description {
            record.description = Some(description);
        }
        record.updated_at = update.updated_at;

        Ok(record.clone())
    }

    async fn delete(&self, id: CategoryId) -> DomainResult<()> {
        let mut categories = self.categories.lock().unwrap();
        let before = categories.len();
        categories.retain(|c| c.id != id);
        if categories.len() == before {
            return Err(DomainError::NotFound("category not found".into()));
        }
        // Emulate the FK cascade.
        self.assignments
            .lock()
            .unwrap()
            .retain(|a| a.category_id != id);
        Ok(())
    }
}

#[async_trait]
impl CategoryReadRepository for InMemoryCategoryRepo {
    async fn find_by_id(&self, id: CategoryId) -> DomainResult<Option<CategoryWithPosts>> {
        Ok(self
            .categories
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .map(|category| CategoryWithPosts {
                category,
                posts: vec![],
            }))
    }

    async fn find_by_slug(&self, slug: &CategorySlug) -> DomainResult<Option<CategoryWithPosts>> {
        Ok(self
            .categories
            .lock()
            .unwrap()
            .iter()
            .find(|c| &c.slug == slug)
            .cloned()
            .map(|category| CategoryWithPosts {
                category,
                posts: vec![],
            }))
    }

    async fn list_with_counts(&self) -> DomainResult<Vec<CategoryWithCount>> {
        let assignments = self.assignments.lock().unwrap();
        Ok(self
            .categories
            .lock()
            .unwrap()
            .iter()
            .map(|category| CategoryWithCount {
                post_count: assignments
                    .iter()
                    .filter(|a| a.category_id == category.id)
                    .count() as u64,
                category: category.clone(),
            })
            .collect())
    }
}

#[async_trait]
impl CategoryAssignmentRepository for InMemoryCategoryRepo {
    async fn assign(
        &self,
        post_id: PostId,
        category_id: CategoryId,
    ) -> DomainResult<CategoryAssignment> {
        let mut assignments = self.assignments.lock().unwrap();
        if assignments
            .iter()
            .any(|a| a.post_id == post_id && a.category_id == category_id)
        {
            return Err(DomainError::Conflict(
                "category is already assigned to this post".into(),
            ));
        }

        let assignment = CategoryAssignment {
            id: self.next_assignment_id.fetch_add(1, Ordering::SeqCst) + 1,
            post_id,
            category_id,
            created_at: Utc::now(),
        };
        assignments.push(assignment.clone());
        Ok(assignment)
    }

    async fn remove(&self, post_id: PostId, category_id: CategoryId) -> DomainResult<()> {
        let mut assignments = self.assignments.lock().unwrap();
        let before = assignments.len();
        assignments.retain(|a| !(a.post_id == post_id && a.category_id == category_id));
        if assignments.len() == before {
            return Err(DomainError::NotFound(
                "category assignment not found".into(),
            ));
        }
        Ok(())
    }
}
