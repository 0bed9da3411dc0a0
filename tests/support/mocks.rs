// tests/support/mocks.rs
// In-memory repository fakes backing the HTTP end-to-end tests. They follow
// the transactional contracts of the Postgres repositories: slug suffixing
// on insert, bulk category verification before any link change, and replace
// semantics for supplied category lists.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use kawaraban::application::ports::time::Clock;
use kawaraban::domain::category::{
    Category, CategoryAssignment, CategoryAssignmentRepository, CategoryId, CategoryName,
    CategoryReadRepository, CategorySlug, CategorySummary, CategoryUpdate, CategoryWithCount,
    CategoryWithPosts, CategoryWriteRepository, NewCategory,
};
use kawaraban::domain::errors::{DomainError, DomainResult};
use kawaraban::domain::post::{
    NewPost, Post, PostId, PostListFilter, PostPage, PostReadRepository, PostSlug, PostUpdate,
    PostWithCategories, PostWriteRepository,
};
use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, Ordering};

pub struct FixedClock;

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
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
pub struct MockPostRepo {
    posts: Mutex<Vec<PostWithCategories>>,
    next_id: AtomicI64,
    categories: Mutex<Vec<CategorySummary>>,
}

impl MockPostRepo {
    /// Makes the given categories visible to link verification, mirroring
    /// rows the category repository would hold.
    pub fn register_category(&self, id: i64, name: &str, slug: &str) {
        self.categories.lock().unwrap().push(CategorySummary {
            id: CategoryId::new(id).unwrap(),
            name: CategoryName::new(name).unwrap(),
            slug: CategorySlug::new(slug).unwrap(),
        });
    }

    fn summaries_for(&self, ids: &[CategoryId]) -> DomainResult<Vec<CategorySummary>> {
        let known = self.categories.lock().unwrap();
        let found: Vec<CategorySummary> = known
            .iter()
            .filter(|c| ids.contains(&c.id))
            .cloned()
            .collect();
        if found.len() != ids.len() {
            return Err(DomainError::Validation(
                "one or more categories do not exist".into(),
            ));
        }
        Ok(found)
    }
}

#[async_trait]
impl PostWriteRepository for MockPostRepo {
    async fn insert(
        &self,
        post: NewPost,
        category_ids: &[CategoryId],
    ) -> DomainResult<PostWithCategories> {
        let categories = self.summaries_for(category_ids)?;

        let mut posts = self.posts.lock().unwrap();
        let taken: Vec<String> = posts
            .iter()
            .map(|p| p.post.slug.as_str().to_string())
            .collect();
        let slug = PostSlug::new(resolve_slug(&taken, &post.slug_base))?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;

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
            categories,
        };
        posts.push(record.clone());
        Ok(record)
    }

    async fn update(
        &self,
        update: PostUpdate,
        category_ids: Option<&[CategoryId]>,
    ) -> DomainResult<PostWithCategories> {
        let replacement = match category_ids {
            Some(ids) => Some(self.summaries_for(ids)?),
            None => None,
        };

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

        if let Some(categories) = replacement {
            record.categories = categories;
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
impl PostReadRepository for MockPostRepo {
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
pub struct MockCategoryRepo {
    categories: Mutex<Vec<Category>>,
    assignments: Mutex<Vec<CategoryAssignment>>,
    next_id: AtomicI64,
    next_assignment_id: AtomicI64,
}

#[async_trait]
impl CategoryWriteRepository for MockCategoryRepo {
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
        self.assignments
            .lock()
            .unwrap()
            .retain(|a| a.category_id != id);
        Ok(())
    }
}

#[async_trait]
impl CategoryReadRepository for MockCategoryRepo {
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
impl CategoryAssignmentRepository for MockCategoryRepo {
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
